//! Criterion benches for the shape network: successive shortest paths
//! against the integer program on the same instances.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tsm::api::{grid_graph, planarize};
use tsm::ortho::shape_network;

fn bench_shape_network(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_network");
    group.sample_size(20);
    for n in [3usize, 5, 8] {
        let (g, pos) = grid_graph(n, n);
        let planar = planarize(&g, Some(&pos)).unwrap();
        let sn = shape_network(&planar.dcel).unwrap();
        group.bench_function(BenchmarkId::new("min_cost_flow", format!("{n}x{n}")), |b| {
            b.iter(|| sn.net.min_cost_flow().unwrap())
        });
        group.bench_function(BenchmarkId::new("ilp", format!("{n}x{n}")), |b| {
            b.iter(|| sn.net.solve_ilp(&[]).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shape_network);
criterion_main!(benches);
