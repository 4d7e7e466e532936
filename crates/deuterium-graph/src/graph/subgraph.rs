//! Induced subgraph views
//!
//! A [`Subgraph`] borrows the full graph and restricts it to a node subset;
//! only edges with both endpoints in the subset are visible.

use std::collections::VecDeque;

use indexmap::IndexSet;

use deuterium_core::{DeuteriumResult, NodeId};

use super::DependencyGraph;

/// Read-only view of the subgraph induced by a node subset
#[derive(Debug, Clone)]
pub struct Subgraph<'g> {
    graph: &'g DependencyGraph,
    nodes: IndexSet<NodeId>,
}

impl<'g> Subgraph<'g> {
    /// Nodes of this view, in the order they were collected
    pub fn nodes(&self) -> &IndexSet<NodeId> {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Successors of `id` that are inside the view
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours(id, true)
    }

    /// Predecessors of `id` that are inside the view
    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours(id, false)
    }

    /// The view further restricted to the nodes reachable from `start`
    pub fn reachable_from(&self, start: NodeId) -> Subgraph<'g> {
        let mut reached = IndexSet::new();
        if self.contains(start) {
            reached.insert(start);
        }

        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in self.successors(current) {
                if reached.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Subgraph {
            graph: self.graph,
            nodes: reached,
        }
    }

    fn neighbours(&self, id: NodeId, outgoing: bool) -> impl Iterator<Item = NodeId> + '_ {
        let adjacent = if !self.contains(id) {
            None
        } else if outgoing {
            self.graph.successors(id).ok()
        } else {
            self.graph.predecessors(id).ok()
        };

        adjacent
            .into_iter()
            .flatten()
            .copied()
            .filter(move |other| self.nodes.contains(other))
    }
}

impl DependencyGraph {
    /// View of the whole graph
    pub fn as_subgraph(&self) -> Subgraph<'_> {
        Subgraph {
            graph: self,
            nodes: self.node_ids().collect(),
        }
    }

    /// Subgraph induced by `nodes`; identifiers not in the graph are ignored
    pub fn induced_subgraph<I>(&self, nodes: I) -> Subgraph<'_>
    where
        I: IntoIterator<Item = NodeId>,
    {
        Subgraph {
            graph: self,
            nodes: nodes.into_iter().filter(|id| self.contains(*id)).collect(),
        }
    }

    /// Subgraph induced by everything reachable from `start`, `start` included
    pub fn reachable_subgraph(&self, start: NodeId) -> DeuteriumResult<Subgraph<'_>> {
        self.ensure_contains(start)?;
        Ok(self.as_subgraph().reachable_from(start))
    }

    /// Every node reachable from `start` through outgoing edges, `start` first
    pub fn reachable_nodes(&self, start: NodeId) -> DeuteriumResult<IndexSet<NodeId>> {
        Ok(self.reachable_subgraph(start)?.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;

    #[test]
    fn test_reachable_nodes() {
        let graph = make_graph(&[("F", "A"), ("F", "C"), ("E", "B"), ("C", "D"), ("D", "B")]);

        let reached = graph.reachable_nodes(id(&graph, "F")).unwrap();
        assert_eq!(reached.first(), Some(&id(&graph, "F")));
        assert_eq!(sorted_names(&graph, &reached), "ABCDF");

        let reached = graph.reachable_nodes(id(&graph, "B")).unwrap();
        assert_eq!(names(&graph, &reached), "B");
    }

    #[test]
    fn test_reachable_nodes_unknown_start() {
        let graph = make_graph(&[("A", "B")]);
        assert!(graph.reachable_nodes(deuterium_core::NodeId::new()).is_err());
    }

    #[test]
    fn test_induced_subgraph_hides_outside_edges() {
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("A", "C")]);
        let (a, b, c) = (id(&graph, "A"), id(&graph, "B"), id(&graph, "C"));

        let view = graph.induced_subgraph([a, c]);
        assert_eq!(view.len(), 2);
        assert_eq!(names(&graph, &view.successors(a).collect::<Vec<_>>()), "C");
        assert_eq!(names(&graph, &view.predecessors(c).collect::<Vec<_>>()), "A");
        assert_eq!(view.successors(b).count(), 0);

        let narrowed = view.reachable_from(c);
        assert_eq!(names(&graph, narrowed.nodes()), "C");
    }

    #[test]
    fn test_reachable_from_follows_cycles_once() {
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let view = graph.as_subgraph().reachable_from(id(&graph, "B"));
        assert_eq!(names(&graph, view.nodes()), "BCA");
    }
}
