//! Error types and result aliases for Deuterium operations.
//!
//! Provides a unified error type that covers graph analysis failures,
//! snapshot validation, configuration and document loading.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::types::NodeId;

/// Unified error type for all Deuterium operations
#[derive(Error, Debug)]
pub enum DeuteriumError {
    // Graph analysis errors
    #[error("Dependency cycle detected among {} node(s): {}", .nodes.len(), format_ids(.nodes))]
    CycleDetected { nodes: BTreeSet<NodeId> },

    #[error("No dependency path from {from} to {to}")]
    NoPathExists { from: NodeId, to: NodeId },

    #[error("Node {id} not found in graph")]
    NodeNotFound { id: NodeId },

    #[error("No node named '{name}' in graph")]
    NodeNameNotFound { name: String },

    // Snapshot errors
    #[error("Node {id} appears more than once")]
    DuplicateNode { id: NodeId },

    #[error("Edge {from} -> {to} references a node that is not in the graph")]
    DanglingEdge { from: NodeId, to: NodeId },

    // Document errors
    #[error("Graph '{id}' not found in document")]
    GraphNotFound { id: String },

    #[error("Failed to parse graph document: {message}")]
    JsonParse { message: String },

    #[error("Failed to encode JSON output: {message}")]
    JsonEncode { message: String },

    // Config errors
    #[error("Failed to parse deuterium.toml: {message} at line {line}, column {column}")]
    TomlParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Deuterium operations
pub type DeuteriumResult<T> = Result<T, DeuteriumError>;

fn format_ids(ids: &BTreeSet<NodeId>) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DeuteriumError {
    /// Create a cycle error from any collection of node ids
    pub fn cycle<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self::CycleDetected {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a missing-graph error for a graph id or name
    pub fn graph_not_found(key: impl Into<String>) -> Self {
        Self::GraphNotFound { id: key.into() }
    }

    /// Nodes participating in the offending cycle, if this is a cycle error
    pub fn cycle_nodes(&self) -> Option<&BTreeSet<NodeId>> {
        match self {
            DeuteriumError::CycleDetected { nodes } => Some(nodes),
            _ => None,
        }
    }

    /// Check if this error was raised by a graph query rather than by loading
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            DeuteriumError::CycleDetected { .. }
                | DeuteriumError::NoPathExists { .. }
                | DeuteriumError::NodeNotFound { .. }
                | DeuteriumError::NodeNameNotFound { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DeuteriumError::CycleDetected { .. } => {
                Some("Remove one of the dependencies between the listed nodes to break the cycle")
            },
            DeuteriumError::NoPathExists { .. } => {
                Some("Paths follow dependencies only; try swapping the start and end nodes")
            },
            DeuteriumError::NodeNotFound { .. } | DeuteriumError::NodeNameNotFound { .. } => {
                Some("Run 'deuterium show' to list the nodes of the graph")
            },
            DeuteriumError::DanglingEdge { .. } => {
                Some("Every edge endpoint must also be listed in the graph's nodes")
            },
            DeuteriumError::GraphNotFound { .. } => {
                Some("Run 'deuterium show' to list the graphs in the document")
            },
            _ => None,
        }
    }
}
