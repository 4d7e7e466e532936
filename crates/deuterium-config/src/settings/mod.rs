//! deuterium.toml configuration parsing and serialization

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigResult;
use deuterium_core::error::DeuteriumError;

/// Log levels accepted in `[log] level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Complete deuterium.toml configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeuteriumToml {
    /// Output formatting
    #[serde(default)]
    pub output: OutputSection,

    /// Logging
    #[serde(default)]
    pub log: LogSection,

    /// Graph selection defaults
    #[serde(default)]
    pub graph: GraphSection,
}

/// Output section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Result format
    #[serde(default)]
    pub format: OutputFormat,

    /// Colored terminal output
    #[serde(default)]
    pub color: ColorChoice,
}

/// Log section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSection {
    /// Minimum level written to stderr
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit log lines as JSON
    #[serde(default)]
    pub json: bool,
}

/// Graph section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSection {
    /// Document opened when no path is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Graph (id or name) used when a document holds more than one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// How query results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// When to use ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl FromStr for OutputFormat {
    type Err = DeuteriumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(DeuteriumError::ConfigValidation {
                field: "output.format".to_string(),
                reason: format!("unknown format '{}', expected 'text' or 'json'", other),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for ColorChoice {
    type Err = DeuteriumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(DeuteriumError::ConfigValidation {
                field: "output.color".to_string(),
                reason: format!("unknown color choice '{}', expected auto, always or never", other),
            }),
        }
    }
}

/// Parse TOML string to DeuteriumToml configuration
pub fn parse_deuterium_toml(content: &str) -> ConfigResult<DeuteriumToml> {
    let table = parse_table(content)?;
    from_table(table)
}

/// Parse TOML into an untyped table, reporting syntax errors with a location
pub fn parse_table(content: &str) -> ConfigResult<toml::Table> {
    // First try with toml_edit for better error reporting
    content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| toml_error(content, e.message(), e.span()))?;

    toml::from_str(content).map_err(|e| toml_error(content, e.message(), e.span()))
}

/// Type-check and validate a (possibly merged) table
pub fn from_table(table: toml::Table) -> ConfigResult<DeuteriumToml> {
    let config: DeuteriumToml = toml::Value::Table(table)
        .try_into()
        .map_err(|e: toml::de::Error| DeuteriumError::ConfigValidation {
            field: "deuterium.toml".to_string(),
            reason: e.message().to_string(),
        })?;

    validate_config(&config)?;
    Ok(config)
}

/// Serialize DeuteriumToml to TOML string
pub fn serialize_deuterium_toml(config: &DeuteriumToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| DeuteriumError::ConfigValidation {
        field: "deuterium.toml".to_string(),
        reason: format!("TOML serialization error: {}", e),
    })
}

/// Validate configuration values
pub fn validate_config(config: &DeuteriumToml) -> ConfigResult<()> {
    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(DeuteriumError::ConfigValidation {
            field: "log.level".to_string(),
            reason: format!(
                "unknown level '{}', expected one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if let Some(default) = &config.graph.default {
        if default.trim().is_empty() {
            return Err(DeuteriumError::ConfigValidation {
                field: "graph.default".to_string(),
                reason: "must name a graph by id or name".to_string(),
            });
        }
    }

    if let Some(document) = &config.graph.document {
        if document.trim().is_empty() {
            return Err(DeuteriumError::ConfigValidation {
                field: "graph.document".to_string(),
                reason: "must be a path to a graph document".to_string(),
            });
        }
    }

    Ok(())
}

/// Load and parse deuterium.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<DeuteriumToml> {
    from_table(load_table(path).await?).map_err(|e| in_file(path, e))
}

/// Load a configuration file without type-checking it
pub async fn load_table(path: &camino::Utf8Path) -> ConfigResult<toml::Table> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DeuteriumError::io(format!("Failed to read {}", path), e))?;

    parse_table(&content).map_err(|e| in_file(path, e))
}

fn in_file(path: &camino::Utf8Path, error: DeuteriumError) -> DeuteriumError {
    match error {
        DeuteriumError::TomlParse {
            message,
            line,
            column,
        } => DeuteriumError::TomlParse {
            message: format!("in file {}: {}", path, message),
            line,
            column,
        },
        DeuteriumError::ConfigValidation { field, reason } => DeuteriumError::ConfigValidation {
            field,
            reason: format!("in file {}: {}", path, reason),
        },
        other => other,
    }
}

fn toml_error(content: &str, message: &str, span: Option<Range<usize>>) -> DeuteriumError {
    let (line, column) = span
        .map(|span| line_column(content, span.start))
        .unwrap_or((1, 1));

    DeuteriumError::TomlParse {
        message: message.trim().to_string(),
        line,
        column,
    }
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map(|last| last.chars().count() + 1)
        .unwrap_or(1);
    (line, column)
}
