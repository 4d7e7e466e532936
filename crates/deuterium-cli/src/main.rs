//! # deuterium
//!
//! Command-line queries over Deuterium dependency graphs.
//!
//! This is the main entry point for the Deuterium CLI. It parses arguments,
//! layers the configuration, sets up logging and dispatches to the command
//! handlers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deuterium_config::{ColorChoice, ConfigLoader, LogSection};
use deuterium_core::error::DeuteriumResult;

mod commands;
mod output;

use commands::CommandContext;
use output::colors::ColorSupport;
use output::errors::ErrorFormatter;

/// Dependency graph analysis
#[derive(Parser)]
#[command(name = "deuterium", version, about = "Dependency graph analysis")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Graph document (JSON) to load
    #[arg(short, long, global = true, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Graph to query, by id or name
    #[arg(short, long, global = true)]
    pub graph: Option<String>,

    /// Output format: text or json
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Colored output: auto, always or never
    #[arg(long, global = true)]
    pub color: Option<String>,

    /// Minimum log level written to stderr
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the graphs of a document, or the nodes and edges of one graph
    Show,
    /// Print the dependencies of a node in the order they must be handled
    Resolve {
        /// Node id or name
        node: String,
    },
    /// Print the nodes that only this node depends on
    Exclusive {
        /// Node id or name
        node: String,
    },
    /// Print the shortest dependency path between two nodes
    Path {
        /// Node id or name to start from
        from: String,
        /// Node id or name to reach
        to: String,
    },
    /// Report dependency cycles
    Check,
    /// Show version information
    Version,
}

impl Cli {
    /// Flags that override configuration, keyed the way the config layering expects
    fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();

        if let Some(document) = &self.document {
            overrides.insert("document".to_string(), document.to_string_lossy().into_owned());
        }
        let flags = [
            ("graph", &self.graph),
            ("format", &self.format),
            ("color", &self.color),
            ("log-level", &self.log_level),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                overrides.insert(key.to_string(), value.clone());
            }
        }

        overrides
    }

    /// Colors for errors raised before the configuration is loaded
    fn initial_colors(&self) -> ColorSupport {
        self.color
            .as_deref()
            .and_then(|choice| choice.parse::<ColorChoice>().ok())
            .map(ColorSupport::from_choice)
            .unwrap_or_else(ColorSupport::detect)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_panic_handler();

    let mut colors = cli.initial_colors();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            let formatter = ErrorFormatter::with_colors(colors);
            eprintln!("{}", formatter.format_simple(&format!("Failed to create async runtime: {}", e)));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_cli(cli, &mut colors)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", ErrorFormatter::with_colors(colors).format_error(&error));
            ExitCode::FAILURE
        }
    }
}

/// Run the command; `colors` is updated to the configured choice once loaded
async fn run_cli(cli: Cli, colors: &mut ColorSupport) -> DeuteriumResult<()> {
    let cwd = commands::current_dir()?;
    let loaded = ConfigLoader::new(cwd.clone())
        .load(cli.config_overrides())
        .await?;
    *colors = ColorSupport::from_choice(loaded.config.output.color);

    setup_logging(&loaded.config.log, cli.verbose);
    info!("Starting Deuterium CLI v{}", env!("CARGO_PKG_VERSION"));
    for source in &loaded.sources {
        tracing::debug!(?source, "configuration layer");
    }

    let ctx = CommandContext::new(cwd, loaded.config);
    commands::dispatch_command(cli.command, &ctx).await
}

fn setup_logging(log: &LogSection, verbose: bool) {
    let level = if verbose { "debug" } else { log.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "deuterium={level},deuterium_core={level},deuterium_graph={level},deuterium_config={level}"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Deuterium encountered an unexpected error: {}", panic_info);
        eprintln!("Deuterium crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
