//! Dependency resolution for a single dependent node

use std::collections::HashSet;

use tracing::debug;

use deuterium_core::{DeuteriumError, DeuteriumResult, NodeId};

use super::{find_cycle_branched_from, DependencyGraph};

impl DependencyGraph {
    /// Topologically sorted dependencies of `dependent`, with `dependent` last.
    ///
    /// Only the nodes reachable from `dependent` take part, so this is not a
    /// topological sort of the whole graph. For every edge `a -> b` between
    /// returned nodes, `b` comes before `a`. The order among siblings follows
    /// edge insertion order and is not otherwise guaranteed.
    ///
    /// Fails with [`DeuteriumError::CycleDetected`] if any cycle is reachable
    /// from `dependent`; the error carries only the nodes of that cycle.
    pub fn solve_dependencies(&self, dependent: NodeId) -> DeuteriumResult<Vec<NodeId>> {
        let dependencies = self.reachable_subgraph(dependent)?;

        let cycle = find_cycle_branched_from(&dependencies, dependent);
        if !cycle.is_empty() {
            return Err(DeuteriumError::cycle(cycle));
        }

        // Iterative depth-first search. A node is recorded once all of its
        // successors have been recorded, which puts dependencies first.
        let mut visited: HashSet<NodeId> = HashSet::from([dependent]);
        let mut sorted = Vec::with_capacity(dependencies.len());
        let mut stack = vec![(
            dependent,
            dependencies.successors(dependent).collect::<Vec<_>>().into_iter(),
        )];

        loop {
            let next = match stack.last_mut() {
                Some((_, children)) => children.next(),
                None => break,
            };

            match next {
                Some(child) => {
                    if visited.insert(child) {
                        let children = dependencies.successors(child).collect::<Vec<_>>();
                        stack.push((child, children.into_iter()));
                    }
                }
                None => {
                    if let Some((node, _)) = stack.pop() {
                        sorted.push(node);
                    }
                }
            }
        }

        debug!(dependent = %dependent, count = sorted.len(), "solved dependencies");
        Ok(sorted)
    }
}
