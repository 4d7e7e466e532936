//! Graph analysis performance benchmarks
//!
//! Benchmarks dependency resolution, exclusive-set computation and shortest
//! path search on layered graphs of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deuterium_benchmarks::{chain_graph, criterion_config, layered_graph};

const SIZES: [usize; 3] = [10, 50, 200];

/// Benchmark solve_dependencies from the root of a layered graph
fn bench_solve_dependencies(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_dependencies");

    for width in SIZES {
        let fixture = layered_graph(10, width, 3);
        group.throughput(Throughput::Elements(fixture.graph.node_count() as u64));

        group.bench_with_input(BenchmarkId::new("layered", width), &fixture, |b, fixture| {
            b.iter(|| black_box(fixture.graph.solve_dependencies(fixture.root)))
        });
    }

    group.finish();
}

/// Benchmark the exclusive dependency set of the root and of a mid-layer node
fn bench_exclusive_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("exclusive_set");

    for width in SIZES {
        let fixture = layered_graph(10, width, 3);
        group.throughput(Throughput::Elements(fixture.graph.node_count() as u64));

        group.bench_with_input(BenchmarkId::new("root", width), &fixture, |b, fixture| {
            b.iter(|| black_box(fixture.graph.find_all_exclusively_dependent_on(fixture.root)))
        });
    }

    group.finish();
}

/// Benchmark shortest_path from the root to the deepest layer
fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for width in SIZES {
        let fixture = layered_graph(10, width, 3);
        group.bench_with_input(BenchmarkId::new("layered", width), &fixture, |b, fixture| {
            b.iter(|| black_box(fixture.graph.shortest_path(fixture.root, fixture.leaf)))
        });
    }

    for len in [100, 1000] {
        let (graph, first, last) = chain_graph(len);
        group.bench_with_input(BenchmarkId::new("chain", len), &graph, |b, graph| {
            b.iter(|| black_box(graph.shortest_path(first, last)))
        });
    }

    group.finish();
}

/// Benchmark cycle detection on a long chain closed into a ring
fn bench_cycle_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_detection");

    for len in [100, 1000] {
        let (mut graph, first, last) = chain_graph(len);
        graph.add_dependency(last, first).expect("ring edge");

        group.bench_with_input(BenchmarkId::new("ring", len), &graph, |b, graph| {
            b.iter(|| black_box(graph.find_cycle_reachable_from(first)))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_solve_dependencies, bench_exclusive_set, bench_shortest_path, bench_cycle_detection
}
criterion_main!(benches);
