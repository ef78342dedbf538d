//! Criterion benchmarks for the Steiner tree heuristics.
//!
//! Uses synthetic grid instances with deterministic pseudo-random weights
//! and terminals spread over the grid.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use steiner_grasp::approx::{TwoApproximation, Zelikovsky};
use steiner_grasp::cancel::CancelToken;
use steiner_grasp::construction::Construction;
use steiner_grasp::graph::{Graph, Terminals, WeightMap};
use steiner_grasp::grasp::{GraspConfig, GraspRunner};
use steiner_grasp::local_search::{FastLocalSearch, LocalSearchConfig};
use steiner_grasp::random::create_rng;
use steiner_grasp::relinking::RelinkingStrategy;
use steiner_grasp::result::SteinerResult;
use steiner_grasp::search::SearchContext;

// ===========================================================================
// Grid instances
// ===========================================================================

fn grid(n: u32) -> Graph {
    let mut graph = Graph::with_capacity((n * n) as usize, (2 * n * (n - 1)) as usize);
    for r in 0..n {
        for c in 0..n {
            let v = r * n + c;
            if c + 1 < n {
                graph.add_edge(v, v + 1, 1.0 + f64::from((v * 7 + 3) % 11));
            }
            if r + 1 < n {
                graph.add_edge(v, v + n, 1.0 + f64::from((v * 13 + 5) % 9));
            }
        }
    }
    graph
}

fn spread_terminals(n: u32, count: u32) -> Terminals {
    let total = n * n;
    (0..count).map(|i| (i * 37 + 11) % total).collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_two_approximation(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_approximation");
    group.sample_size(10);

    for &n in &[10u32, 20, 30] {
        let graph = grid(n);
        let terminals = spread_terminals(n, n);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(graph, terminals),
            |b, (g, t)| {
                b.iter(|| {
                    let tree = TwoApproximation::solve(black_box(g), black_box(t), &CancelToken::new());
                    black_box(tree)
                })
            },
        );
    }
    group.finish();
}

fn bench_zelikovsky(c: &mut Criterion) {
    let mut group = c.benchmark_group("zelikovsky");
    group.sample_size(10);

    for &n in &[10u32, 15] {
        let graph = grid(n);
        let terminals = spread_terminals(n, 8);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(graph, terminals),
            |b, (g, t)| {
                b.iter(|| {
                    let tree = Zelikovsky::solve(black_box(g), black_box(t), &CancelToken::new());
                    black_box(tree)
                })
            },
        );
    }
    group.finish();
}

fn bench_constructions(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.sample_size(10);

    let n = 20;
    let graph = grid(n);
    let terminals = spread_terminals(n, n);
    let weights = WeightMap::from_graph(&graph);
    for construction in Construction::ALL {
        group.bench_function(construction.name(), |b| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let tree = construction.construct(
                    black_box(&graph),
                    black_box(&terminals),
                    &weights,
                    &mut rng,
                    &CancelToken::new(),
                );
                black_box(tree)
            })
        });
    }
    group.finish();
}

fn bench_fast_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_local_search");
    group.sample_size(10);

    for &n in &[10u32, 15] {
        let graph = grid(n);
        let terminals = spread_terminals(n, n);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(graph, terminals),
            |b, (g, t)| {
                b.iter(|| {
                    let mut ctx = SearchContext::new(g, t, 42, CancelToken::new());
                    let mut result = SteinerResult::new();
                    let local = FastLocalSearch::new(LocalSearchConfig::all()).run(&mut ctx, &mut result);
                    black_box(local)
                })
            },
        );
    }
    group.finish();
}

fn bench_grasp(c: &mut Criterion) {
    let mut group = c.benchmark_group("grasp");
    group.sample_size(10);

    let n = 10;
    let graph = grid(n);
    let terminals = spread_terminals(n, 8);
    for strategy in [
        RelinkingStrategy::ComplementaryMoves,
        RelinkingStrategy::WeightPenalization,
    ] {
        let config = GraspConfig::default()
            .with_iterations(6)
            .with_seed(42)
            .with_relinking(strategy);
        group.bench_with_input(
            BenchmarkId::new("relinking", format!("{strategy:?}")),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut result = SteinerResult::new();
                    let report = GraspRunner::run(
                        black_box(&graph),
                        black_box(&terminals),
                        config,
                        &mut result,
                        &CancelToken::new(),
                    );
                    black_box((report, result))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_two_approximation,
    bench_zelikovsky,
    bench_constructions,
    bench_fast_local_search,
    bench_grasp
);
criterion_main!(benches);
