//! Performance benchmarks for hierarchy traversal.
//!
//! Run with: `cargo bench --bench traversal`
//!
//! ## Performance Targets
//!
//! | Operation | Target | Notes |
//! |-----------|--------|-------|
//! | max_depth | <1ms | ~600-node map, memoized walk |
//! | up_to_level | <1ms | level-bounded descent with min-hop dedup |
//! | snapshot fingerprint | <5ms | canonical serialization + xxh64 |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use mindmap_kernel::{max_depth, GraphModel, VisibleSet};

/// Build a uniform tree with the given branching factor and depth.
fn build_map(branching: usize, depth: usize) -> GraphModel {
    let mut model = GraphModel::new();
    let root = model.add_node("root", "", None).unwrap();
    let mut frontier = vec![root];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * branching);
        for parent in &frontier {
            for _ in 0..branching {
                next.push(model.add_node("node", "", Some(parent)).unwrap());
            }
        }
        frontier = next;
    }
    model
}

/// Benchmark depth computation across map sizes.
fn bench_max_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_depth");

    for branching in [4, 8, 16] {
        let model = build_map(branching, 3);

        group.throughput(Throughput::Elements(model.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(branching),
            &model,
            |b, model| {
                b.iter(|| {
                    let depth = max_depth(black_box(model));
                    assert_eq!(depth, 3);
                    depth
                })
            },
        );
    }

    group.finish();
}

/// Benchmark level-bounded visibility derivation.
fn bench_visible_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_set");

    for branching in [4, 8, 16] {
        let model = build_map(branching, 3);

        group.throughput(Throughput::Elements(model.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::new("up_to_level_2", branching),
            &model,
            |b, model| b.iter(|| VisibleSet::up_to_level(black_box(model), 2)),
        );
        group.bench_with_input(
            BenchmarkId::new("all", branching),
            &model,
            |b, model| b.iter(|| VisibleSet::all(black_box(model))),
        );
    }

    group.finish();
}

/// Benchmark snapshot fingerprinting (the autosave hot path).
fn bench_snapshot_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_fingerprint");

    for branching in [4, 8, 16] {
        let model = build_map(branching, 3);
        let snapshot = model.snapshot();

        group.throughput(Throughput::Elements(snapshot.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(branching),
            &snapshot,
            |b, snapshot| b.iter(|| black_box(snapshot).fingerprint()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_max_depth,
    bench_visible_set,
    bench_snapshot_fingerprint,
);
criterion_main!(benches);
