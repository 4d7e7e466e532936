//! Command implementations and dispatch logic.
//!
//! Each command is an async function that takes a [`CommandContext`]. Commands
//! load the configured graph document, pick one graph and print their result
//! in the configured output format.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use deuterium_config::DeuteriumToml;
use deuterium_core::error::{DeuteriumError, DeuteriumResult};
use deuterium_core::{Node, NodeId};
use deuterium_graph::{DependencyGraph, DeuteriumFile, DeuteriumFileSnapshot};

pub mod check;
pub mod exclusive;
pub mod path;
pub mod resolve;
pub mod show;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub config: DeuteriumToml,
}

impl CommandContext {
    pub fn new(cwd: Utf8PathBuf, config: DeuteriumToml) -> Self {
        let output = OutputHandler::new(config.output.format, config.output.color);
        Self {
            cwd,
            output,
            config,
        }
    }

    /// Path of the graph document, relative paths resolved against the cwd
    pub fn document_path(&self) -> DeuteriumResult<Utf8PathBuf> {
        let document = self
            .config
            .graph
            .document
            .as_deref()
            .ok_or_else(|| DeuteriumError::ConfigValidation {
                field: "graph.document".to_string(),
                reason: "no graph document given; pass --document or set it in deuterium.toml"
                    .to_string(),
            })?;

        let path = Utf8Path::new(document);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.cwd.join(path))
        }
    }

    /// Read and validate the configured graph document
    pub async fn load_document(&self) -> DeuteriumResult<DeuteriumFile> {
        let path = self.document_path()?;
        debug!(path = %path, "loading graph document");

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DeuteriumError::io(format!("Failed to read {}", path), e))?;

        let snapshot: DeuteriumFileSnapshot =
            serde_json::from_str(&content).map_err(|e| DeuteriumError::JsonParse {
                message: format!("{}: {}", path, e),
            })?;

        DeuteriumFile::from_snapshot(snapshot)
    }

    /// The graph selected by `--graph`/`[graph] default`, or the only graph
    pub fn select_graph<'f>(&self, file: &'f DeuteriumFile) -> DeuteriumResult<&'f DependencyGraph> {
        if let Some(key) = self.config.graph.default.as_deref() {
            return file.find_graph(key);
        }

        file.sole_graph().ok_or_else(|| DeuteriumError::ConfigValidation {
            field: "graph.default".to_string(),
            reason: match file.graph_count() {
                0 => "the document contains no graphs".to_string(),
                n => format!("the document contains {} graphs; choose one with --graph", n),
            },
        })
    }
}

/// Current working directory as a UTF-8 path
pub fn current_dir() -> DeuteriumResult<Utf8PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| DeuteriumError::io("Failed to get current directory".to_string(), e))?;

    Utf8PathBuf::from_path_buf(cwd).map_err(|path| DeuteriumError::ConfigValidation {
        field: "cwd".to_string(),
        reason: format!("{} is not valid UTF-8", path.display()),
    })
}

/// Find a node by id, falling back to its display name
pub fn lookup_node<'g>(graph: &'g DependencyGraph, key: &str) -> DeuteriumResult<&'g Node> {
    if let Ok(id) = key.trim().parse::<NodeId>() {
        return graph.node(id).ok_or(DeuteriumError::NodeNotFound { id });
    }

    graph
        .find_by_name(key)
        .ok_or_else(|| DeuteriumError::NodeNameNotFound {
            name: key.to_string(),
        })
}

/// Print an ordered node list in text form
fn print_node_list(ctx: &CommandContext, nodes: &[&Node]) {
    for (index, node) in nodes.iter().enumerate() {
        ctx.output.item(index + 1, &node.name, &node.id.to_string());
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> DeuteriumResult<()> {
    match command {
        Commands::Show => {
            info!("Showing graph document");
            show::execute(ctx).await
        }
        Commands::Resolve { node } => {
            info!("Resolving dependencies of {}", node);
            resolve::execute(node, ctx).await
        }
        Commands::Exclusive { node } => {
            info!("Finding exclusive dependencies of {}", node);
            exclusive::execute(node, ctx).await
        }
        Commands::Path { from, to } => {
            info!("Finding shortest path from {} to {}", from, to);
            path::execute(from, to, ctx).await
        }
        Commands::Check => {
            info!("Checking graphs for cycles");
            check::execute(ctx).await
        }
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx)
        }
    }
}

#[derive(serde::Serialize)]
struct VersionInfo {
    version: &'static str,
    built: &'static str,
    target: &'static str,
    rustc: &'static str,
}

fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        built: env!("BUILD_DATE"),
        target: env!("BUILD_TARGET"),
        rustc: env!("RUSTC_VERSION"),
    }
}

fn show_version(ctx: &CommandContext) -> DeuteriumResult<()> {
    let info = version_info();
    if ctx.output.is_json() {
        return ctx.output.json(&info);
    }

    ctx.output.header(&format!("Deuterium v{}", info.version));
    ctx.output.info(&format!("Built: {}", info.built));
    ctx.output.info(&format!("Target: {}", info.target));
    ctx.output.info(&format!("Rust: {}", info.rustc));

    Ok(())
}
