//! Criterion benchmarks for the simulation core.
//!
//! Measures the Hungarian matching solver (the per-generation hot spot of
//! the optimal strategy) and full world runs under each assignment strategy.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use evoassign::assign::matching::max_weight_assignment;
use evoassign::assign::{AssignmentConfig, AssignmentEngine, AssignmentStrategy};
use evoassign::crossover::{CrossoverConfig, CrossoverOperator};
use evoassign::population::Population;
use evoassign::rng::{stream_rng, Stream};
use evoassign::world::{World, WorldConfig};

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_weight_assignment");
    for size in [20usize, 60, 120] {
        let mut rng = stream_rng(1, Stream::GenomeInit);
        let weights: Vec<Vec<f64>> = (0..size)
            .map(|_| (0..size).map(|_| rng.random_range(0.0..1.0)).collect())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &weights, |b, w| {
            b.iter(|| max_weight_assignment(black_box(w)));
        });
    }
    group.finish();
}

fn bench_world(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_evolve");
    for strategy in [
        AssignmentStrategy::Random,
        AssignmentStrategy::Greedy,
        AssignmentStrategy::Optimal,
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{strategy:?}")),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    let mut genome_rng = stream_rng(2, Stream::GenomeInit);
                    let initial = Population::random(
                        60,
                        4,
                        4,
                        (0..4).collect(),
                        vec![15; 4],
                        &mut genome_rng,
                    );
                    let world = World::new(
                        initial,
                        AssignmentEngine::new(
                            AssignmentConfig::default().with_strategy(strategy),
                            2,
                        ),
                        CrossoverOperator::new(CrossoverConfig::default(), 2),
                        WorldConfig::default().with_num_generations(20).with_seed(2),
                    );
                    black_box(world.evolve())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_matching, bench_world);
criterion_main!(benches);
