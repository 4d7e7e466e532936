//! `deuterium resolve` command implementation.
//!
//! Prints the dependencies of a node, each one before the nodes that depend
//! on it, ending with the node itself.

use serde::Serialize;

use deuterium_core::error::DeuteriumResult;
use deuterium_core::Node;
use deuterium_graph::DependencyGraph;

use super::{lookup_node, print_node_list, CommandContext};

/// Result of a resolve query
#[derive(Debug, Serialize)]
pub struct Resolution<'g> {
    pub graph: &'g str,
    pub dependent: &'g Node,
    pub order: Vec<&'g Node>,
}

/// Resolve `key` (id or name) against `graph`
pub fn resolve<'g>(graph: &'g DependencyGraph, key: &str) -> DeuteriumResult<Resolution<'g>> {
    let dependent = lookup_node(graph, key)?;
    let order = graph.solve_dependencies(dependent.id)?;

    Ok(Resolution {
        graph: graph.name(),
        dependent,
        order: graph.nodes_by_id(&order),
    })
}

/// Execute the `deuterium resolve` command
pub async fn execute(node: String, ctx: &CommandContext) -> DeuteriumResult<()> {
    let file = ctx.load_document().await?;
    let graph = ctx.select_graph(&file)?;

    let resolution = match resolve(graph, &node) {
        Ok(resolution) => resolution,
        Err(error) => {
            if let Some(cycle) = ctx.output.error_formatter().format_cycle(&error, graph) {
                eprintln!("{}", cycle);
            }
            return Err(error);
        }
    };

    if ctx.output.is_json() {
        return ctx.output.json(&resolution);
    }

    ctx.output.header(&format!(
        "Dependencies of {} ({} to handle)",
        resolution.dependent.name,
        resolution.order.len()
    ));
    print_node_list(ctx, &resolution.order);

    Ok(())
}
