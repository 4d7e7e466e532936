//! Cycle detection from a branch point
//!
//! A global acyclicity check would report cycles that are irrelevant to the
//! dependency tree being queried. These routines only look at what is
//! reachable from the branch node and return the nodes of one concrete cycle.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexSet;
use tracing::{debug, trace};

use deuterium_core::{DeuteriumResult, NodeId};

use super::{DependencyGraph, Subgraph};

/// Find a cycle reachable from `start` inside `view`.
///
/// The cycle does not have to pass through `start`: for `A -> B <-> C` this
/// returns `{B, C}` when run on `A`. When `start` lies on a cycle, the result
/// is a shortest cycle through it. Returns an empty set when no cycle is
/// reachable.
pub fn find_cycle_branched_from(view: &Subgraph<'_>, start: NodeId) -> IndexSet<NodeId> {
    let mut scope = view.reachable_from(start);
    let mut branch = start;

    // Each restart moves to a node known to lie on a cycle, so the second
    // pass always returns through the first branch.
    loop {
        if let Some(cycle) = shortest_cycle_through(&scope, branch) {
            debug!(branch = %branch, size = cycle.len(), "cycle found");
            return cycle;
        }

        match find_reentry(&scope, branch) {
            Some(reentry) if reentry != branch => {
                trace!(from = %branch, to = %reentry, "restarting cycle search");
                scope = scope.reachable_from(reentry);
                branch = reentry;
            }
            _ => return IndexSet::new(),
        }
    }
}

/// Breadth-first search for an edge leading back to `start`.
///
/// Parent pointers give the path `start ~> v`; together with the closing edge
/// `v -> start` that path is the cycle.
fn shortest_cycle_through(scope: &Subgraph<'_>, start: NodeId) -> Option<IndexSet<NodeId>> {
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for next in scope.successors(current) {
            if next == start {
                let mut path = vec![current];
                let mut cursor = current;
                while let Some(&parent) = parents.get(&cursor) {
                    path.push(parent);
                    cursor = parent;
                }
                return Some(path.into_iter().rev().collect());
            }
            if visited.insert(next) {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Depth-first search for a node re-encountered while still on the active
/// path. Such a node is on a cycle.
fn find_reentry(scope: &Subgraph<'_>, start: NodeId) -> Option<NodeId> {
    let mut on_path: HashSet<NodeId> = HashSet::from([start]);
    let mut finished: HashSet<NodeId> = HashSet::new();
    let mut stack = vec![(start, scope.successors(start).collect::<Vec<_>>().into_iter())];

    loop {
        let next = match stack.last_mut() {
            Some((_, children)) => children.next(),
            None => return None,
        };

        match next {
            Some(child) if on_path.contains(&child) => return Some(child),
            Some(child) if finished.contains(&child) => {}
            Some(child) => {
                on_path.insert(child);
                stack.push((child, scope.successors(child).collect::<Vec<_>>().into_iter()));
            }
            None => {
                if let Some((node, _)) = stack.pop() {
                    on_path.remove(&node);
                    finished.insert(node);
                }
            }
        }
    }
}

impl DependencyGraph {
    /// Nodes of a cycle reachable from `start`, or an empty set
    pub fn find_cycle_reachable_from(&self, start: NodeId) -> DeuteriumResult<IndexSet<NodeId>> {
        let view = self.reachable_subgraph(start)?;
        Ok(find_cycle_branched_from(&view, start))
    }

    /// Any cycle in the graph, or an empty set when the graph is acyclic
    pub fn find_any_cycle(&self) -> IndexSet<NodeId> {
        let whole = self.as_subgraph();
        let mut acyclic: HashSet<NodeId> = HashSet::new();

        for start in self.node_ids() {
            if acyclic.contains(&start) {
                continue;
            }
            let view = whole.reachable_from(start);
            let cycle = find_cycle_branched_from(&view, start);
            if !cycle.is_empty() {
                return cycle;
            }
            acyclic.extend(view.nodes().iter().copied());
        }

        IndexSet::new()
    }

    /// Whether any cycle exists in the graph
    pub fn is_cyclic(&self) -> bool {
        !self.find_any_cycle().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_no_cycle() {
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("A", "C")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert!(cycle.is_empty());
        assert!(!graph.is_cyclic());
    }

    #[test]
    fn test_cycle_through_start() {
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A"), ("E", "A")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert_eq!(names(&graph, &cycle), "ABCD");
    }

    #[test]
    fn test_cycle_branched_off_start() {
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("C", "B")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert_eq!(sorted_names(&graph, &cycle), "BC");
    }

    #[test]
    fn test_cycle_excludes_side_branches() {
        // A -> B, A -> C -> A: B is reachable but not on the cycle
        let graph = make_graph(&[("A", "B"), ("A", "C"), ("C", "A")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert_eq!(sorted_names(&graph, &cycle), "AC");
    }

    #[test]
    fn test_chord_yields_shortest_cycle() {
        // A, B and C are strongly connected but A -> C -> A is shorter
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("C", "A"), ("A", "C")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert_eq!(sorted_names(&graph, &cycle), "AC");
    }

    #[test]
    fn test_chord_off_branch_yields_shortest_cycle() {
        // S -> P, then P -> Q -> R -> P with the chord R -> Q
        let graph = make_graph(&[("S", "P"), ("P", "Q"), ("Q", "R"), ("R", "P"), ("R", "Q")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "S")).unwrap();
        let found = sorted_names(&graph, &cycle);
        assert!(found == "QR" || found == "PQR", "got {found}");
        assert!(!cycle.contains(&id(&graph, "S")));
    }

    #[test]
    fn test_diamond_does_not_hide_cycle() {
        // S reaches D twice through a diamond, and a separate cycle through X/Y
        let graph = make_graph(&[
            ("S", "B"),
            ("S", "C"),
            ("B", "D"),
            ("C", "D"),
            ("S", "X"),
            ("X", "Y"),
            ("Y", "X"),
        ]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "S")).unwrap();
        assert_eq!(sorted_names(&graph, &cycle), "XY");
    }

    #[test]
    fn test_diamond_alone_is_acyclic() {
        let graph = make_graph(&[("S", "B"), ("S", "C"), ("B", "D"), ("C", "D")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "S")).unwrap();
        assert!(cycle.is_empty());
    }

    #[test]
    fn test_unreachable_cycle_is_ignored() {
        let graph = make_graph(&[("A", "B"), ("C", "D"), ("D", "C")]);
        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert!(cycle.is_empty());

        assert_eq!(sorted_names(&graph, &graph.find_any_cycle()), "CD");
    }

    #[test]
    fn test_self_loop() {
        let mut graph = make_graph(&[("A", "B")]);
        let b = id(&graph, "B");
        graph.add_dependency(b, b).unwrap();

        let cycle = graph.find_cycle_reachable_from(id(&graph, "A")).unwrap();
        assert_eq!(names(&graph, &cycle), "B");
    }
}
