//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

use deuterium_core::{Node, NodeId};
use deuterium_graph::DependencyGraph;

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(50)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// A layered acyclic graph with a single root above the first layer
pub struct LayeredGraph {
    pub graph: DependencyGraph,
    /// Depends on every node of the first layer
    pub root: NodeId,
    /// First node of the last layer
    pub leaf: NodeId,
}

/// Build `layers` layers of `width` nodes; each node depends on `fanout`
/// nodes of the next layer. The shape is deterministic.
pub fn layered_graph(layers: usize, width: usize, fanout: usize) -> LayeredGraph {
    let mut graph = DependencyGraph::new(format!("layered-{}x{}", layers, width));
    let grid: Vec<Vec<Node>> = (0..layers)
        .map(|layer| {
            (0..width)
                .map(|index| Node::new(format!("n{}_{}", layer, index)))
                .collect()
        })
        .collect();

    let root = Node::new("root");
    for node in &grid[0] {
        graph.put_edge(&root, node);
    }

    for pair in grid.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        for (index, node) in upper.iter().enumerate() {
            for k in 0..fanout {
                // Stride by a prime so that siblings share some dependencies
                let target = (index + k * 7) % width;
                graph.put_edge(node, &lower[target]);
            }
        }
    }

    let leaf = grid
        .last()
        .and_then(|layer| layer.first())
        .map(|node| node.id)
        .unwrap_or(root.id);

    LayeredGraph {
        graph,
        root: root.id,
        leaf,
    }
}

/// A single chain `0 -> 1 -> ... -> len-1`
pub fn chain_graph(len: usize) -> (DependencyGraph, NodeId, NodeId) {
    let mut graph = DependencyGraph::new(format!("chain-{}", len));
    let nodes: Vec<Node> = (0..len).map(|i| Node::new(format!("c{}", i))).collect();
    for pair in nodes.windows(2) {
        graph.put_edge(&pair[0], &pair[1]);
    }

    let first = nodes.first().map(|node| node.id).unwrap_or_default();
    let last = nodes.last().map(|node| node.id).unwrap_or_default();
    (graph, first, last)
}
