//! Exclusive dependency sets (choke-point analysis)

use indexmap::IndexSet;
use tracing::debug;

use deuterium_core::{DeuteriumResult, NodeId};

use super::DependencyGraph;

impl DependencyGraph {
    /// Every node reachable from `node` that no other part of the graph can
    /// reach without passing through `node`.
    ///
    /// Removing `node` would leave these nodes cut off from the rest of the
    /// graph. The result never contains `node` itself and may be empty.
    /// Fails with the cycle error from [`DependencyGraph::solve_dependencies`]
    /// when a cycle is reachable from `node`.
    pub fn find_all_exclusively_dependent_on(
        &self,
        node: NodeId,
    ) -> DeuteriumResult<IndexSet<NodeId>> {
        // Walk dependents before their dependencies. Dropping a node that has
        // an outside predecessor also drops its descendants when their turn
        // comes, because the dropped node is now outside the candidate set.
        let mut dependencies = self.solve_dependencies(node)?;
        dependencies.reverse();

        let mut exclusive: IndexSet<NodeId> = dependencies.iter().copied().collect();
        for candidate in dependencies.iter().filter(|candidate| **candidate != node) {
            let predecessors = self.predecessors(*candidate)?;
            if predecessors.iter().any(|p| !exclusive.contains(p)) {
                exclusive.shift_remove(candidate);
            }
        }
        exclusive.shift_remove(&node);

        debug!(node = %node, count = exclusive.len(), "found exclusive dependencies");
        Ok(exclusive)
    }
}
