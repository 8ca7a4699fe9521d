use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tsp_bench::{make_rng, CitySet};
use tsp_core::{DistanceMatrix, TspSolver};
use tsp_dynamic::DynamicSolver;
use tsp_exhaustive::ExhaustiveSolver;
use tsp_greedy::GreedySolver;

fn instance(n: usize) -> DistanceMatrix {
    CitySet::random(n, 100, &mut make_rng(Some(n as u64)))
        .distance_matrix(false)
        .unwrap()
}

fn bench_solver(c: &mut Criterion, group: &str, solver: &dyn TspSolver, sizes: &[usize]) {
    let mut group = c.benchmark_group(group);
    for &n in sizes {
        let matrix = instance(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, m| {
            b.iter(|| solver.solve(black_box(m)).unwrap())
        });
    }
    group.finish();
}

fn solvers_benchmark(c: &mut Criterion) {
    bench_solver(c, "exhaustive", &ExhaustiveSolver::new(), &[6, 8, 10]);
    bench_solver(
        c,
        "exhaustive (no pruning)",
        &ExhaustiveSolver::new().with_pruning(false),
        &[6, 8],
    );
    bench_solver(c, "dynamic", &DynamicSolver::new(), &[8, 12, 16]);
    bench_solver(c, "greedy", &GreedySolver, &[10, 100, 1000]);
}

criterion_group!(benches, solvers_benchmark);
criterion_main!(benches);
