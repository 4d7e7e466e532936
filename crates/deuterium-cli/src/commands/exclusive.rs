//! `deuterium exclusive` command implementation.
//!
//! Prints the dependencies that only this node (directly or through other
//! such dependencies) needs, i.e. what could be dropped along with it.

use serde::Serialize;

use deuterium_core::error::DeuteriumResult;
use deuterium_core::Node;
use deuterium_graph::DependencyGraph;

use super::{lookup_node, print_node_list, CommandContext};

#[derive(Debug, Serialize)]
pub struct ExclusiveSet<'g> {
    pub graph: &'g str,
    pub node: &'g Node,
    pub exclusive: Vec<&'g Node>,
}

pub fn exclusive<'g>(graph: &'g DependencyGraph, key: &str) -> DeuteriumResult<ExclusiveSet<'g>> {
    let node = lookup_node(graph, key)?;
    let set = graph.find_all_exclusively_dependent_on(node.id)?;

    Ok(ExclusiveSet {
        graph: graph.name(),
        node,
        exclusive: graph.nodes_by_id(&set),
    })
}

/// Execute the `deuterium exclusive` command
pub async fn execute(node: String, ctx: &CommandContext) -> DeuteriumResult<()> {
    let file = ctx.load_document().await?;
    let graph = ctx.select_graph(&file)?;
    let result = exclusive(graph, &node)?;

    if ctx.output.is_json() {
        return ctx.output.json(&result);
    }

    ctx.output.header(&format!(
        "Exclusively dependent on {} ({} node(s))",
        result.node.name,
        result.exclusive.len()
    ));
    print_node_list(ctx, &result.exclusive);

    Ok(())
}
