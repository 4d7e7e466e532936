//! Deuterium benchmarking suite
//!
//! Benchmarks for the graph analyses (resolution, exclusive sets, shortest
//! paths) and for snapshot conversion.

pub mod common;

pub use common::*;
