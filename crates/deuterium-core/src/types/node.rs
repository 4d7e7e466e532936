//! Node identity and node values.
//!
//! A node is identified solely by its [`NodeId`]. Name and details are
//! presentation data and can change without affecting graph membership.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Placeholder name given to nodes created from a bare identifier
pub const BLANK_NODE_NAME: &str = "Blank";

/// Stable unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

/// Error returned when a string is not a valid node identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid node id '{input}': {reason}")]
pub struct ParseNodeIdError {
    pub input: String,
    pub reason: String,
}

impl NodeId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ParseNodeIdError {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

/// A single vertex of a dependency graph.
///
/// Equality and hashing only consider [`Node::id`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Stable identity
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Free-text details
    #[serde(default)]
    pub details: String,
}

impl Node {
    /// Create a node with a random identifier and empty details
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            details: String::new(),
        }
    }

    /// Create a placeholder node for a known identifier
    pub fn with_id(id: NodeId) -> Self {
        Self {
            id,
            name: BLANK_NODE_NAME.to_string(),
            details: String::new(),
        }
    }

    /// Create a node from all of its parts
    pub fn from_parts(id: NodeId, name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            details: details.into(),
        }
    }

    /// Builder-style details setter
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_node_equality_is_by_id() {
        let id = NodeId::new();
        let a = Node::from_parts(id, "compiler", "front end");
        let b = Node::from_parts(id, "renamed", "other details");

        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_fresh_nodes_are_distinct() {
        let a = Node::new("a");
        let b = Node::new("a");
        assert_ne!(a, b);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_node() {
        let id = NodeId::new();
        let node = Node::with_id(id);
        assert_eq!(node.id, id);
        assert_eq!(node.name, BLANK_NODE_NAME);
        assert!(node.details.is_empty());
    }

    #[test]
    fn test_node_id_parsing() {
        let id = NodeId::new();
        let parsed: NodeId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        let err = "not-a-uuid".parse::<NodeId>().unwrap_err();
        assert_eq!(err.input, "not-a-uuid");
    }

    #[test]
    fn test_node_serializes_id_as_string() {
        let node = Node::new("parser").with_details("recursive descent");
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["id"], serde_json::Value::String(node.id.to_string()));
        assert_eq!(json["name"], "parser");
        assert_eq!(json["details"], "recursive descent");
    }

    #[test]
    fn test_missing_details_default_to_empty() {
        let id = NodeId::new();
        let json = format!(r#"{{"id": "{}", "name": "lexer"}}"#, id);
        let node: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node.id, id);
        assert!(node.details.is_empty());
    }
}
