//! `deuterium check` command implementation.
//!
//! Looks for a dependency cycle in each graph of the document, or only in the
//! selected graph when one is configured. Fails if any cycle is found.

use serde::Serialize;

use deuterium_core::error::{DeuteriumError, DeuteriumResult};
use deuterium_core::Node;
use deuterium_graph::{DependencyGraph, DeuteriumFile};

use super::CommandContext;

/// Cycle status of one graph
#[derive(Debug, Serialize)]
pub struct CycleReport<'f> {
    pub graph: &'f str,
    pub id: String,
    /// Nodes of the first cycle found, or `None` for an acyclic graph
    pub cycle: Option<Vec<&'f Node>>,
}

impl CycleReport<'_> {
    pub fn is_cyclic(&self) -> bool {
        self.cycle.is_some()
    }
}

pub fn check_graph(graph: &DependencyGraph) -> CycleReport<'_> {
    let cycle = graph.find_any_cycle();
    CycleReport {
        graph: graph.name(),
        id: graph.id().to_string(),
        cycle: (!cycle.is_empty()).then(|| graph.nodes_by_id(&cycle)),
    }
}

/// Reports for every graph to check
pub fn check_document<'f>(
    ctx: &CommandContext,
    file: &'f DeuteriumFile,
) -> DeuteriumResult<Vec<CycleReport<'f>>> {
    if ctx.config.graph.default.is_some() {
        return Ok(vec![check_graph(ctx.select_graph(file)?)]);
    }
    Ok(file.graphs().map(check_graph).collect())
}

/// Execute the `deuterium check` command
pub async fn execute(ctx: &CommandContext) -> DeuteriumResult<()> {
    let file = ctx.load_document().await?;
    let reports = check_document(ctx, &file)?;

    if ctx.output.is_json() {
        ctx.output.json(&reports)?;
    } else {
        for report in &reports {
            match &report.cycle {
                None => ctx.output.success(&format!("{}: no cycles", report.graph)),
                Some(nodes) => {
                    let names = nodes
                        .iter()
                        .map(|node| node.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    ctx.output
                        .warn(&format!("{}: cycle through {}", report.graph, names));
                }
            }
        }
    }

    match reports.iter().find_map(|report| report.cycle.as_ref()) {
        Some(nodes) => Err(DeuteriumError::cycle(nodes.iter().map(|node| node.id))),
        None => Ok(()),
    }
}
