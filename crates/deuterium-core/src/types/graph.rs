//! Graph-level metadata.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier, name and description of a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInfo {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl GraphInfo {
    /// Create metadata with a random identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
        }
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for GraphInfo {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
