//! Dependency graph storage and queries
//!
//! Nodes are kept in insertion order together with their successor and
//! predecessor sets, so membership tests and edge lookups are O(1) and
//! traversal order is reproducible for a given history of mutations.

mod cycle;
mod exclusive;
mod path;
mod resolve;
mod subgraph;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use deuterium_core::{DeuteriumError, DeuteriumResult, GraphInfo, Node, NodeId};

pub use cycle::find_cycle_branched_from;
pub use subgraph::Subgraph;

/// Directed edge: `from` depends on `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone)]
struct NodeEntry {
    node: Node,
    successors: IndexSet<NodeId>,
    predecessors: IndexSet<NodeId>,
}

impl NodeEntry {
    fn new(node: Node) -> Self {
        Self {
            node,
            successors: IndexSet::new(),
            predecessors: IndexSet::new(),
        }
    }
}

/// Directed graph of identity-keyed nodes with dependency analyses
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    info: GraphInfo,
    entries: IndexMap<NodeId, NodeEntry>,
    edge_count: usize,
}

impl DependencyGraph {
    /// Create a new empty graph with a random identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_info(GraphInfo::new(name))
    }

    /// Create a new empty graph with the given metadata
    pub fn with_info(info: GraphInfo) -> Self {
        Self {
            info,
            entries: IndexMap::new(),
            edge_count: 0,
        }
    }

    pub fn info(&self) -> &GraphInfo {
        &self.info
    }

    pub fn id(&self) -> Uuid {
        self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn description(&self) -> &str {
        &self.info.description
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.info.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.info.description = description.into();
    }

    /// Get number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.entries.len()
    }

    /// Get number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.entries.values().map(|entry| &entry.node)
    }

    /// All node identifiers in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.keys().copied()
    }

    /// All edges as `(from, to)` pairs
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.entries.iter().flat_map(|(from, entry)| {
            entry.successors.iter().map(move |to| Edge::new(*from, *to))
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.entries.get(&id).map(|entry| &entry.node)
    }

    /// Mutable access to a node's name and details.
    ///
    /// The identifier must not be changed through this reference.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.entries.get_mut(&id).map(|entry| &mut entry.node)
    }

    /// First node (in insertion order) with the given display name
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes().find(|node| node.name == name)
    }

    /// Look up nodes for a list of identifiers, skipping unknown ones
    pub fn nodes_by_id<'i, I>(&self, ids: I) -> Vec<&Node>
    where
        I: IntoIterator<Item = &'i NodeId>,
    {
        ids.into_iter().filter_map(|id| self.node(*id)).collect()
    }

    pub fn rename_node(&mut self, id: NodeId, name: impl Into<String>) -> DeuteriumResult<()> {
        let entry = self.entry_mut(id)?;
        entry.node.name = name.into();
        Ok(())
    }

    pub fn set_node_details(
        &mut self,
        id: NodeId,
        details: impl Into<String>,
    ) -> DeuteriumResult<()> {
        let entry = self.entry_mut(id)?;
        entry.node.details = details.into();
        Ok(())
    }

    /// Add a node; returns false if a node with the same id is already present
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.entries.contains_key(&node.id) {
            return false;
        }

        trace!(node = %node.id, name = %node.name, "adding node");
        self.entries.insert(node.id, NodeEntry::new(node));
        true
    }

    /// Add an edge `from -> to`, inserting either node if absent.
    ///
    /// Returns false if the edge already existed.
    pub fn put_edge(&mut self, from: &Node, to: &Node) -> bool {
        if !self.contains(from.id) {
            self.add_node(from.clone());
        }
        if !self.contains(to.id) {
            self.add_node(to.clone());
        }
        self.link(from.id, to.id)
    }

    /// Add an edge between two nodes that must already be in the graph
    pub fn add_dependency(&mut self, from: NodeId, to: NodeId) -> DeuteriumResult<bool> {
        self.ensure_contains(from)?;
        self.ensure_contains(to)?;
        Ok(self.link(from, to))
    }

    /// Remove a node and every edge incident to it
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(entry) = self.entries.shift_remove(&id) else {
            return false;
        };

        let self_loop = entry.successors.contains(&id);
        for successor in &entry.successors {
            if let Some(other) = self.entries.get_mut(successor) {
                other.predecessors.shift_remove(&id);
            }
        }
        for predecessor in &entry.predecessors {
            if let Some(other) = self.entries.get_mut(predecessor) {
                other.successors.shift_remove(&id);
            }
        }

        let removed = entry.successors.len() + entry.predecessors.len() - usize::from(self_loop);
        self.edge_count -= removed;
        trace!(node = %id, edges = removed, "removed node");
        true
    }

    /// Remove the edge `from -> to`; returns whether it existed
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        let removed = match self.entries.get_mut(&from) {
            Some(entry) => entry.successors.shift_remove(&to),
            None => false,
        };
        if !removed {
            return false;
        }

        if let Some(entry) = self.entries.get_mut(&to) {
            entry.predecessors.shift_remove(&from);
        }
        self.edge_count -= 1;
        trace!(%from, %to, "removed edge");
        true
    }

    /// Whether `from -> to` is an edge; false when either node is absent
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.entries
            .get(&from)
            .is_some_and(|entry| entry.successors.contains(&to))
    }

    /// Whether `dependency` is a direct dependency of `node`
    pub fn depends_on(&self, node: NodeId, dependency: NodeId) -> DeuteriumResult<bool> {
        Ok(self.successors(node)?.contains(&dependency))
    }

    /// Direct dependencies of a node
    pub fn successors(&self, id: NodeId) -> DeuteriumResult<&IndexSet<NodeId>> {
        self.entry(id).map(|entry| &entry.successors)
    }

    /// Direct dependents of a node
    pub fn predecessors(&self, id: NodeId) -> DeuteriumResult<&IndexSet<NodeId>> {
        self.entry(id).map(|entry| &entry.predecessors)
    }

    /// Nodes connected to this one by an edge in either direction
    pub fn adjacent_nodes(&self, id: NodeId) -> DeuteriumResult<IndexSet<NodeId>> {
        let entry = self.entry(id)?;
        Ok(entry
            .successors
            .iter()
            .chain(entry.predecessors.iter())
            .copied()
            .collect())
    }

    /// Edges with this node as either endpoint
    pub fn incident_edges(&self, id: NodeId) -> DeuteriumResult<Vec<Edge>> {
        let entry = self.entry(id)?;
        let outgoing = entry.successors.iter().map(|to| Edge::new(id, *to));
        let incoming = entry
            .predecessors
            .iter()
            .filter(|from| **from != id)
            .map(|from| Edge::new(*from, id));
        Ok(outgoing.chain(incoming).collect())
    }

    /// In-degree plus out-degree; a self-loop counts twice
    pub fn degree(&self, id: NodeId) -> DeuteriumResult<usize> {
        let entry = self.entry(id)?;
        Ok(entry.successors.len() + entry.predecessors.len())
    }

    pub fn in_degree(&self, id: NodeId) -> DeuteriumResult<usize> {
        Ok(self.entry(id)?.predecessors.len())
    }

    pub fn out_degree(&self, id: NodeId) -> DeuteriumResult<usize> {
        Ok(self.entry(id)?.successors.len())
    }

    pub(crate) fn ensure_contains(&self, id: NodeId) -> DeuteriumResult<()> {
        self.entry(id).map(|_| ())
    }

    fn entry(&self, id: NodeId) -> DeuteriumResult<&NodeEntry> {
        self.entries
            .get(&id)
            .ok_or(DeuteriumError::NodeNotFound { id })
    }

    fn entry_mut(&mut self, id: NodeId) -> DeuteriumResult<&mut NodeEntry> {
        self.entries
            .get_mut(&id)
            .ok_or(DeuteriumError::NodeNotFound { id })
    }

    /// Insert an edge between two present nodes
    fn link(&mut self, from: NodeId, to: NodeId) -> bool {
        let inserted = match self.entries.get_mut(&from) {
            Some(entry) => entry.successors.insert(to),
            None => false,
        };
        if !inserted {
            return false;
        }

        if let Some(entry) = self.entries.get_mut(&to) {
            entry.predecessors.insert(from);
        }
        self.edge_count += 1;
        trace!(%from, %to, "added edge");
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a graph from `(from, to)` pairs of single-letter node names
    pub fn make_graph(edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new("test");
        for (from, to) in edges {
            let from = node(&mut graph, from);
            let to = node(&mut graph, to);
            graph.add_dependency(from, to).unwrap();
        }
        graph
    }

    /// Id of the node with this name, creating it if needed
    pub fn node(graph: &mut DependencyGraph, name: &str) -> NodeId {
        if let Some(existing) = graph.find_by_name(name) {
            return existing.id;
        }
        let node = Node::new(name);
        let id = node.id;
        graph.add_node(node);
        id
    }

    pub fn id(graph: &DependencyGraph, name: &str) -> NodeId {
        graph
            .find_by_name(name)
            .unwrap_or_else(|| panic!("no node named {name}"))
            .id
    }

    /// Concatenated names, e.g. "BDCAF"
    pub fn names<'a, I>(graph: &DependencyGraph, ids: I) -> String
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        ids.into_iter()
            .map(|id| graph.node(*id).unwrap().name.as_str())
            .collect()
    }

    /// Names sorted alphabetically, for comparing unordered results
    pub fn sorted_names<'a, I>(graph: &DependencyGraph, ids: I) -> String
    where
        I: IntoIterator<Item = &'a NodeId>,
    {
        let mut chars: Vec<char> = names(graph, ids).chars().collect();
        chars.sort_unstable();
        chars.into_iter().collect()
    }
}
