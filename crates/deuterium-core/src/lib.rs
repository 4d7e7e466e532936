//! # deuterium-core
//!
//! Core types and errors shared across all Deuterium crates.
//!
//! This crate provides:
//! - `NodeId` and `Node`, the identity-keyed vertices of a dependency graph
//! - `GraphInfo`, the identifier/name/description carried by every graph
//! - `DeuteriumError` enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (NodeId, Node, GraphInfo)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{DeuteriumError, DeuteriumResult};
pub use types::{GraphInfo, Node, NodeId};
