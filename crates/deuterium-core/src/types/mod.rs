//! Core data types for Deuterium graphs.
//!
//! This module provides the fundamental types used throughout Deuterium:
//! - Node identifiers and node values
//! - Graph-level metadata

pub mod graph;
pub mod node;

// Re-export all public types
pub use graph::GraphInfo;
pub use node::{Node, NodeId, ParseNodeIdError};
