//! Flat node/edge representation of a graph
//!
//! This is the shape a persistence layer reads and writes. Nodes and edges may
//! appear in any order; rebuilding a graph from a snapshot reproduces the same
//! successor and predecessor relationships.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use deuterium_core::{DeuteriumError, DeuteriumResult, GraphInfo, Node};

use crate::graph::{DependencyGraph, Edge};

/// Serializable form of a [`DependencyGraph`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(flatten)]
    pub info: GraphInfo,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(info: GraphInfo) -> Self {
        Self {
            info,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl DependencyGraph {
    /// Rebuild a graph from its flat form.
    ///
    /// Duplicate node ids and edges whose endpoints are not listed as nodes are
    /// rejected; duplicate edges collapse into one.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> DeuteriumResult<Self> {
        let mut graph = DependencyGraph::with_info(snapshot.info);

        let mut seen = HashSet::with_capacity(snapshot.nodes.len());
        for node in snapshot.nodes {
            if !seen.insert(node.id) {
                return Err(DeuteriumError::DuplicateNode { id: node.id });
            }
            graph.add_node(node);
        }

        for edge in snapshot.edges {
            if !graph.contains(edge.from) || !graph.contains(edge.to) {
                return Err(DeuteriumError::DanglingEdge {
                    from: edge.from,
                    to: edge.to,
                });
            }
            graph.add_dependency(edge.from, edge.to)?;
        }

        debug!(
            graph = %graph.id(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded graph snapshot"
        );
        Ok(graph)
    }

    /// Flatten the graph into nodes, edges and metadata
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            info: self.info().clone(),
            nodes: self.nodes().cloned().collect(),
            edges: self.edges().collect(),
        }
    }
}

impl TryFrom<GraphSnapshot> for DependencyGraph {
    type Error = DeuteriumError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        DependencyGraph::from_snapshot(snapshot)
    }
}

impl From<&DependencyGraph> for GraphSnapshot {
    fn from(graph: &DependencyGraph) -> Self {
        graph.to_snapshot()
    }
}
