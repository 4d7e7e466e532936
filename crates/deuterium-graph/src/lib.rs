//! Dependency graph engine for Deuterium
//!
//! This crate provides the in-memory directed graph used by Deuterium together
//! with its analyses: dependency resolution with cycle detection, exclusive
//! dependency sets and shortest paths. It performs no I/O; graphs are built
//! from and flattened into [`GraphSnapshot`] values by the caller.

pub mod document;
pub mod graph;
pub mod snapshot;

// Re-export main types
pub use document::{DeuteriumFile, DeuteriumFileSnapshot};
pub use graph::{DependencyGraph, Edge, Subgraph};
pub use snapshot::GraphSnapshot;

pub use deuterium_core::{DeuteriumError, DeuteriumResult, GraphInfo, Node, NodeId};
