//! `deuterium path` command implementation.

use serde::Serialize;

use deuterium_core::error::DeuteriumResult;
use deuterium_core::Node;
use deuterium_graph::DependencyGraph;

use super::{lookup_node, print_node_list, CommandContext};

#[derive(Debug, Serialize)]
pub struct DependencyPath<'g> {
    pub graph: &'g str,
    pub from: &'g Node,
    pub to: &'g Node,
    pub path: Vec<&'g Node>,
}

/// Shortest dependency chain from `from` to `to`, both given by id or name
pub fn shortest_path<'g>(
    graph: &'g DependencyGraph,
    from: &str,
    to: &str,
) -> DeuteriumResult<DependencyPath<'g>> {
    let from = lookup_node(graph, from)?;
    let to = lookup_node(graph, to)?;
    let path = graph.shortest_path(from.id, to.id)?;

    Ok(DependencyPath {
        graph: graph.name(),
        from,
        to,
        path: graph.nodes_by_id(&path),
    })
}

/// Execute the `deuterium path` command
pub async fn execute(from: String, to: String, ctx: &CommandContext) -> DeuteriumResult<()> {
    let file = ctx.load_document().await?;
    let graph = ctx.select_graph(&file)?;
    let result = shortest_path(graph, &from, &to)?;

    if ctx.output.is_json() {
        return ctx.output.json(&result);
    }

    ctx.output.header(&format!(
        "Path from {} to {} ({} step(s))",
        result.from.name,
        result.to.name,
        result.path.len().saturating_sub(1)
    ));
    print_node_list(ctx, &result.path);

    Ok(())
}
