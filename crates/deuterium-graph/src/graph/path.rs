//! Shortest dependency paths

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use deuterium_core::{DeuteriumError, DeuteriumResult, NodeId};

use super::DependencyGraph;

impl DependencyGraph {
    /// Fewest-edge path from `from` to `to`, following dependencies only.
    ///
    /// The path starts with `from` and ends with `to`. Fails with
    /// [`DeuteriumError::NoPathExists`] when `to` cannot be reached, including
    /// when the only route would walk an edge backwards.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> DeuteriumResult<Vec<NodeId>> {
        self.ensure_contains(from)?;
        self.ensure_contains(to)?;
        if from == to {
            return Ok(vec![from]);
        }

        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        let mut visited: HashSet<NodeId> = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        // Stop as soon as `to` is discovered rather than dequeued
        'search: while let Some(current) = queue.pop_front() {
            for next in self.successors(current)? {
                if visited.insert(*next) {
                    parents.insert(*next, current);
                    if *next == to {
                        break 'search;
                    }
                    queue.push_back(*next);
                }
            }
        }

        if !parents.contains_key(&to) {
            return Err(DeuteriumError::NoPathExists { from, to });
        }

        let mut path = vec![to];
        let mut cursor = to;
        while let Some(&parent) = parents.get(&cursor) {
            path.push(parent);
            cursor = parent;
        }
        path.reverse();

        debug!(%from, %to, length = path.len(), "found shortest path");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    fn path(graph: &DependencyGraph, from: &str, to: &str) -> DeuteriumResult<String> {
        let path = graph.shortest_path(id(graph, from), id(graph, to))?;
        Ok(names(graph, &path))
    }

    #[test]
    fn test_tree_paths() {
        let graph = make_graph(&[("A", "B"), ("A", "F"), ("B", "C"), ("B", "D")]);
        assert_eq!(path(&graph, "A", "D").unwrap(), "ABD");
        assert_eq!(path(&graph, "B", "C").unwrap(), "BC");
        assert_eq!(path(&graph, "A", "A").unwrap(), "A");
    }

    #[test]
    fn test_longer_directional_paths() {
        let graph = make_graph(&[
            ("F", "A"),
            ("F", "C"),
            ("E", "B"),
            ("E", "A"),
            ("C", "D"),
            ("D", "B"),
            ("B", "G"),
            ("G", "H"),
            ("G", "I"),
        ]);
        assert_eq!(path(&graph, "F", "I").unwrap(), "FCDBGI");
        assert_eq!(path(&graph, "E", "I").unwrap(), "EBGI");
    }

    #[test]
    fn test_picks_a_minimal_path() {
        let graph = make_graph(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "D"),
            ("B", "E"),
            ("D", "F"),
        ]);
        let found = path(&graph, "A", "D").unwrap();
        assert!(found == "ABD" || found == "ACD", "unexpected path {found}");

        // Shortcut edge wins over the longer chain
        let graph = make_graph(&[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D")]);
        assert_eq!(path(&graph, "A", "D").unwrap(), "AD");
    }

    #[test]
    fn test_no_path() {
        let graph = make_graph(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "D"),
            ("B", "E"),
            ("D", "F"),
        ]);
        let (e, f) = (id(&graph, "E"), id(&graph, "F"));
        assert!(matches!(
            graph.shortest_path(e, f),
            Err(DeuteriumError::NoPathExists { from, to }) if from == e && to == f
        ));

        // Edges are never walked backwards
        assert!(path(&graph, "D", "A").is_err());
    }

    #[test]
    fn test_unknown_endpoint() {
        let graph = make_graph(&[("A", "B")]);
        let result = graph.shortest_path(id(&graph, "A"), NodeId::new());
        assert!(matches!(result, Err(DeuteriumError::NodeNotFound { .. })));
    }

    #[test]
    fn test_path_through_cycle() {
        let graph = make_graph(&[("A", "B"), ("B", "A"), ("B", "C")]);
        assert_eq!(path(&graph, "A", "C").unwrap(), "ABC");
    }
}
