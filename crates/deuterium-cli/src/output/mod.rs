//! Terminal output formatting and utilities.
//!
//! Every command prints through an [`OutputHandler`] so that text and JSON
//! output stay consistent.

pub mod colors;
pub mod errors;

use serde::Serialize;

use deuterium_config::{ColorChoice, OutputFormat};
use deuterium_core::error::{DeuteriumError, DeuteriumResult};

use colors::ColorSupport;
use errors::ErrorFormatter;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    format: OutputFormat,
    colors: ColorSupport,
}

impl OutputHandler {
    pub fn new(format: OutputFormat, color: ColorChoice) -> Self {
        Self {
            format,
            colors: ColorSupport::from_choice(color),
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn colors(&self) -> ColorSupport {
        self.colors
    }

    pub fn error_formatter(&self) -> ErrorFormatter {
        ErrorFormatter::with_colors(self.colors)
    }

    /// Print a value as pretty JSON on stdout
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> DeuteriumResult<()> {
        println!("{}", encode_json(value)?);
        Ok(())
    }

    /// Print a heading line
    pub fn header(&self, message: &str) {
        println!("{}", self.colors.bold(message));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a numbered list entry
    pub fn item(&self, index: usize, name: &str, id: &str) {
        println!("{:>4}. {} {}", index, name, self.colors.dim(id));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{}", self.error_formatter().format_warning(message));
    }
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> DeuteriumResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| DeuteriumError::JsonEncode {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_encode_json() {
        let text = encode_json(&serde_json::json!({ "graph": "build" })).unwrap();
        assert!(text.contains("\"graph\": \"build\""));
    }

    #[test]
    fn test_unencodable_value_is_an_encode_error() {
        // JSON object keys must be strings
        let value = BTreeMap::from([((1u8, 2u8), "edge")]);
        let err = OutputHandler::new(OutputFormat::Json, ColorChoice::Never)
            .json(&value)
            .unwrap_err();

        assert!(matches!(err, DeuteriumError::JsonEncode { .. }));
        assert!(err.to_string().starts_with("Failed to encode JSON output"));
    }
}
