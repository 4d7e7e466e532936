//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::settings::{self, DeuteriumToml};
use crate::{ConfigResult, CONFIG_FILE_NAME};
use deuterium_core::error::DeuteriumError;

/// Prefix shared by all environment overrides
pub const ENV_PREFIX: &str = "DEUTERIUM_";

/// Environment variables and the config keys they override
const ENV_KEYS: [(&str, &str); 6] = [
    ("DEUTERIUM_OUTPUT_FORMAT", "output.format"),
    ("DEUTERIUM_COLOR", "output.color"),
    ("DEUTERIUM_LOG_LEVEL", "log.level"),
    ("DEUTERIUM_LOG_JSON", "log.json"),
    ("DEUTERIUM_GRAPH", "graph.default"),
    ("DEUTERIUM_DOCUMENT", "graph.document"),
];

/// Command-line flags and the config keys they override
const CLI_KEYS: [(&str, &str); 5] = [
    ("format", "output.format"),
    ("color", "output.color"),
    ("log-level", "log.level"),
    ("graph", "graph.default"),
    ("document", "graph.document"),
];

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
    /// Global config file, when a home directory is known
    global_path: Option<Utf8PathBuf>,
}

/// Configuration layering and merging
#[derive(Debug, Default)]
pub struct ConfigLayering {
    /// Global configuration
    global_config: Option<toml::Table>,
    /// Project configuration
    project_config: Option<toml::Table>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
    /// CLI flag overrides
    cli_overrides: HashMap<String, String>,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Built-in defaults
    Default,
    /// Global config file
    Global(Utf8PathBuf),
    /// Project deuterium.toml file
    Project(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

/// Merged configuration together with the layers that contributed to it
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: DeuteriumToml,
    pub sources: Vec<ConfigSource>,
}

impl LoadedConfig {
    /// Path of the project file, if one was found
    pub fn project_path(&self) -> Option<&Utf8Path> {
        self.sources.iter().find_map(|source| match source {
            ConfigSource::Project(path) => Some(path.as_path()),
            _ => None,
        })
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        let global_path = dirs::home_dir()
            .and_then(|home| Utf8PathBuf::try_from(home).ok())
            .map(|home| home.join(".deuterium").join("config.toml"));

        Self { cwd, global_path }
    }

    /// Use `path` instead of `~/.deuterium/config.toml`
    pub fn with_global_path(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        self.cwd
            .ancestors()
            .map(|dir| dir.join(filename))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest project deuterium.toml, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<(toml::Table, Utf8PathBuf)>> {
        match self.resolve_config_path(CONFIG_FILE_NAME) {
            Some(path) => {
                let table = settings::load_table(&path).await?;
                Ok(Some((table, path)))
            }
            None => Ok(None),
        }
    }

    /// Load global configuration
    pub async fn load_global_config(&self) -> ConfigResult<Option<(toml::Table, Utf8PathBuf)>> {
        match &self.global_path {
            Some(path) if path.is_file() => {
                let table = settings::load_table(path).await?;
                Ok(Some((table, path.clone())))
            }
            _ => Ok(None),
        }
    }

    /// Load every layer and merge it into the effective configuration
    pub async fn load(&self, cli_overrides: HashMap<String, String>) -> ConfigResult<LoadedConfig> {
        let mut sources = vec![ConfigSource::Default];
        let mut layering = ConfigLayering::new();

        if let Some((table, path)) = self.load_global_config().await? {
            debug!(path = %path, "loaded global config");
            layering = layering.with_global(table);
            sources.push(ConfigSource::Global(path));
        }

        if let Some((table, path)) = self.load_project_config().await? {
            debug!(path = %path, "loaded project config");
            layering = layering.with_project(table);
            sources.push(ConfigSource::Project(path));
        }

        let env_overrides = ConfigLayering::collect_env_overrides();
        let mut env_names: Vec<&String> = env_overrides.keys().collect();
        env_names.sort();
        sources.extend(env_names.into_iter().map(|name| ConfigSource::Environment(name.clone())));

        if !cli_overrides.is_empty() {
            sources.push(ConfigSource::CommandLine);
        }

        let config = layering
            .with_env(env_overrides)
            .with_cli(cli_overrides)
            .merge()?;

        Ok(LoadedConfig { config, sources })
    }
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, table: toml::Table) -> Self {
        self.global_config = Some(table);
        self
    }

    pub fn with_project(mut self, table: toml::Table) -> Self {
        self.project_config = Some(table);
        self
    }

    pub fn with_env(mut self, overrides: HashMap<String, String>) -> Self {
        self.env_overrides = overrides;
        self
    }

    pub fn with_cli(mut self, overrides: HashMap<String, String>) -> Self {
        self.cli_overrides = overrides;
        self
    }

    /// Merge all layers, lowest priority first, and validate the result
    pub fn merge(self) -> ConfigResult<DeuteriumToml> {
        let mut merged = toml::Table::new();

        for layer in [self.global_config, self.project_config].into_iter().flatten() {
            merge_tables(&mut merged, layer);
        }

        // Environment, then CLI flags (highest priority)
        Self::apply_overrides(&mut merged, &self.env_overrides, &ENV_KEYS)?;
        Self::apply_overrides(&mut merged, &self.cli_overrides, &CLI_KEYS)?;

        settings::from_table(merged)
    }

    fn apply_overrides(
        table: &mut toml::Table,
        overrides: &HashMap<String, String>,
        keys: &[(&str, &str)],
    ) -> ConfigResult<()> {
        for (name, path) in keys {
            let Some(value) = overrides.get(*name) else {
                continue;
            };
            set_path(table, path, override_value(name, path, value)?);
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .filter(|(key, _)| ENV_KEYS.iter().any(|(name, _)| *name == key.as_str()))
            .collect()
    }
}

/// Recursively merge `layer` into `base`; values in `layer` win
fn merge_tables(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        let toml::Value::Table(incoming) = value else {
            base.insert(key, value);
            continue;
        };

        if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, incoming);
            continue;
        }
        base.insert(key, toml::Value::Table(incoming));
    }
}

fn set_path(table: &mut toml::Table, path: &str, value: toml::Value) {
    let (section, key) = path.split_once('.').unwrap_or(("", path));
    if section.is_empty() {
        table.insert(key.to_string(), value);
        return;
    }

    let entry = table
        .entry(section.to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    if !entry.is_table() {
        *entry = toml::Value::Table(toml::Table::new());
    }
    if let toml::Value::Table(inner) = entry {
        inner.insert(key.to_string(), value);
    }
}

fn override_value(name: &str, path: &str, value: &str) -> ConfigResult<toml::Value> {
    if path == "log.json" {
        return match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(toml::Value::Boolean(true)),
            "0" | "false" | "no" | "off" | "" => Ok(toml::Value::Boolean(false)),
            other => Err(DeuteriumError::ConfigValidation {
                field: name.to_string(),
                reason: format!("expected a boolean, got '{}'", other),
            }),
        };
    }

    Ok(toml::Value::String(value.to_string()))
}
