//! Snapshot conversion benchmarks
//!
//! Measures rebuilding graphs from their flat form and JSON encoding of
//! snapshots, the path taken when a document is loaded.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deuterium_benchmarks::{criterion_config, layered_graph};
use deuterium_graph::{DependencyGraph, GraphSnapshot};

fn bench_snapshot_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_conversion");

    for width in [10, 100] {
        let snapshot = layered_graph(10, width, 3).graph.to_snapshot();
        group.throughput(Throughput::Elements(snapshot.edges.len() as u64));

        group.bench_with_input(BenchmarkId::new("from_snapshot", width), &snapshot, |b, snapshot| {
            b.iter(|| black_box(DependencyGraph::from_snapshot(snapshot.clone())))
        });
    }

    group.finish();
}

fn bench_snapshot_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_json");

    for width in [10, 100] {
        let snapshot = layered_graph(10, width, 3).graph.to_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("encode", width), &snapshot, |b, snapshot| {
            b.iter(|| black_box(serde_json::to_string(snapshot)))
        });
        group.bench_with_input(BenchmarkId::new("decode", width), &json, |b, json| {
            b.iter(|| black_box(serde_json::from_str::<GraphSnapshot>(json)))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_snapshot_conversion, bench_snapshot_json
}
criterion_main!(benches);
