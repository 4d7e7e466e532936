//! Configuration parsing for the Deuterium CLI
//!
//! This crate handles parsing and validation of deuterium.toml files and
//! layers global, project, environment and command-line settings into a
//! single configuration.

pub mod merge;
pub mod settings;

// Re-export main types
pub use merge::{ConfigLayering, ConfigLoader, ConfigSource, LoadedConfig};
pub use settings::{ColorChoice, DeuteriumToml, GraphSection, LogSection, OutputFormat, OutputSection};

use deuterium_core::error::DeuteriumError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, DeuteriumError>;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "deuterium.toml";
