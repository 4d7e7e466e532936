//! `deuterium show` command implementation.
//!
//! With a graph selected (or a document holding a single graph) this prints
//! its nodes and edges; otherwise it lists the graphs of the document.

use serde::Serialize;

use deuterium_core::error::DeuteriumResult;
use deuterium_graph::{DependencyGraph, DeuteriumFile};

use super::CommandContext;

/// One line of the graph listing
#[derive(Debug, Serialize)]
pub struct GraphSummary<'f> {
    pub id: String,
    pub name: &'f str,
    pub description: &'f str,
    pub nodes: usize,
    pub edges: usize,
}

impl<'f> From<&'f DependencyGraph> for GraphSummary<'f> {
    fn from(graph: &'f DependencyGraph) -> Self {
        Self {
            id: graph.id().to_string(),
            name: graph.name(),
            description: graph.description(),
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DocumentListing<'f> {
    name: &'f str,
    description: &'f str,
    graphs: Vec<GraphSummary<'f>>,
}

/// Graph the `show` command should expand, if any
pub fn graph_to_show<'f>(
    ctx: &CommandContext,
    file: &'f DeuteriumFile,
) -> DeuteriumResult<Option<&'f DependencyGraph>> {
    if ctx.config.graph.default.is_some() {
        return ctx.select_graph(file).map(Some);
    }
    Ok(file.sole_graph())
}

/// Execute the `deuterium show` command
pub async fn execute(ctx: &CommandContext) -> DeuteriumResult<()> {
    let file = ctx.load_document().await?;

    match graph_to_show(ctx, &file)? {
        Some(graph) => show_graph(ctx, graph),
        None => list_graphs(ctx, &file),
    }
}

fn list_graphs(ctx: &CommandContext, file: &DeuteriumFile) -> DeuteriumResult<()> {
    let listing = DocumentListing {
        name: &file.name,
        description: &file.description,
        graphs: file.graphs().map(GraphSummary::from).collect(),
    };

    if ctx.output.is_json() {
        return ctx.output.json(&listing);
    }

    ctx.output.header(&format!("{} ({} graphs)", listing.name, listing.graphs.len()));
    if !listing.description.is_empty() {
        ctx.output.info(listing.description);
    }
    for summary in &listing.graphs {
        println!(
            "  {} {} {}",
            summary.name,
            ctx.output.colors().dim(&summary.id),
            ctx.output
                .colors()
                .dim(&format!("{} nodes, {} edges", summary.nodes, summary.edges))
        );
    }

    Ok(())
}

fn show_graph(ctx: &CommandContext, graph: &DependencyGraph) -> DeuteriumResult<()> {
    if ctx.output.is_json() {
        return ctx.output.json(&graph.to_snapshot());
    }

    ctx.output.header(&format!(
        "{} ({} nodes, {} edges)",
        graph.name(),
        graph.node_count(),
        graph.edge_count()
    ));
    if !graph.description().is_empty() {
        ctx.output.info(graph.description());
    }

    let colors = ctx.output.colors();
    for node in graph.nodes() {
        println!("  {} {}", colors.bold(&node.name), colors.dim(&node.id.to_string()));

        for dependency in graph.nodes_by_id(graph.successors(node.id)?) {
            println!("    {} {}", colors.cyan("->"), dependency.name);
        }
    }

    Ok(())
}
