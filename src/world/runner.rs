//! The generation loop.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::config::WorldConfig;
use crate::assign::AssignmentEngine;
use crate::crossover::CrossoverOperator;
use crate::metrics::{FitnessData, FitnessHistory};
use crate::population::{Group, Individual, Population};
use crate::rng::{stream_rng, Stream};

/// Where a [`World`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    /// Constructed; the generation-0 snapshot has been taken.
    Initialized,
    /// Inside [`World::evolve`].
    Stepping,
    /// All generations stepped.
    Done,
}

/// Outcome of one simulation run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Everything the run recorded, iteration 0 through the final generation.
    pub history: FitnessHistory,

    /// Number of generation steps executed (always the configured count).
    pub generations: usize,

    /// Wall-clock duration of the loop, for orchestrator scheduling.
    pub elapsed: Duration,
}

/// One simulation run: assign → measure → breed, repeated.
///
/// The world owns the population, the assignment engine, the crossover
/// operator, and the run's history. Constructing it takes the generation-0
/// snapshot; [`evolve`](Self::evolve) then steps the configured number of
/// generations and hands the history back.
///
/// # Usage
///
/// ```
/// use evoassign::assign::{AssignmentConfig, AssignmentEngine, AssignmentStrategy};
/// use evoassign::crossover::{CrossoverConfig, CrossoverOperator};
/// use evoassign::population::Population;
/// use evoassign::rng::{stream_rng, Stream};
/// use evoassign::world::{World, WorldConfig};
///
/// let mut genome_rng = stream_rng(7, Stream::GenomeInit);
/// let initial = Population::random(
///     20, 4, 4,
///     (0..4).collect(), vec![5; 4],
///     &mut genome_rng,
/// );
/// let assignment = AssignmentEngine::new(
///     AssignmentConfig::default().with_strategy(AssignmentStrategy::Greedy),
///     7,
/// );
/// let crossover = CrossoverOperator::new(CrossoverConfig::default(), 7);
/// let config = WorldConfig::default().with_num_generations(5).with_seed(7);
///
/// let result = World::new(initial, assignment, crossover, config).evolve();
/// assert_eq!(result.history.iterations().len(), 6); // generation 0 + 5 steps
/// ```
pub struct World {
    config: WorldConfig,
    assignment: AssignmentEngine,
    crossover: CrossoverOperator,
    history: FitnessHistory,
    current: Population,
    iteration: usize,
    order_rng: StdRng,
    state: WorldState,
}

impl World {
    /// Builds a world around an initial population and takes the
    /// generation-0 snapshot.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`WorldConfig::validate`]
    /// first to get a descriptive error) or if the initial population
    /// violates a capacity invariant.
    pub fn new(
        initial: Population,
        assignment: AssignmentEngine,
        crossover: CrossoverOperator,
        config: WorldConfig,
    ) -> Self {
        config.validate().expect("invalid WorldConfig");
        let history =
            FitnessHistory::new(config.time_to_thresholds.clone(), initial.genome_size());
        let order_rng = stream_rng(config.seed, Stream::ChildOrder);
        let mut world = Self {
            config,
            assignment,
            crossover,
            history,
            current: initial,
            iteration: 0,
            order_rng,
            state: WorldState::Initialized,
        };
        world.assign_and_measure();
        world
    }

    pub fn state(&self) -> WorldState {
        self.state
    }

    /// The current generation's population snapshot.
    pub fn population(&self) -> &Population {
        &self.current
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Runs all configured generations and returns the recorded history.
    ///
    /// Termination is purely by iteration count; a run either completes or
    /// the process aborts on a fatal precondition.
    pub fn evolve(mut self) -> RunResult {
        let start = Instant::now();
        self.state = WorldState::Stepping;

        for _ in 0..self.config.num_generations {
            self.current = self.next_generation();
            self.iteration += 1;
            self.assign_and_measure();
            log::debug!(
                "generation {}: population mean fitness {:.4}",
                self.iteration,
                self.current.mean_fitness()
            );
        }

        self.state = WorldState::Done;
        let elapsed = start.elapsed();
        log::info!(
            "run complete: {} generations in {:.1?}",
            self.config.num_generations,
            elapsed
        );
        RunResult {
            history: self.history,
            generations: self.config.num_generations,
            elapsed,
        }
    }

    /// Resolves assignments for the current population and records its
    /// fitness snapshot at the current iteration.
    fn assign_and_measure(&mut self) {
        self.assignment.update_assignments(&mut self.current);
        let data = FitnessData::from_population(&self.current);
        self.history.record(self.iteration, data);
    }

    /// Breeds the next generation from the current (already assigned)
    /// population. Unassigned individuals contributed nothing and do not
    /// breed.
    fn next_generation(&mut self) -> Population {
        let genome_size = self.current.genome_size();
        let population_size = self.current.population_size();
        let mut new_groups = Vec::with_capacity(self.current.num_groups());

        if self.config.restrict_crossover {
            for group in self.current.groups() {
                let pool: Vec<&Individual> = group.assigned().collect();
                let children = self.crossover.crossover(&pool, &pool, group.group_size());
                new_groups.push(Group::new(group.group_size(), genome_size, children));
            }
        } else {
            let pool: Vec<&Individual> = self
                .current
                .individuals()
                .filter(|i| i.has_assignment())
                .collect();
            let mut children = self
                .crossover
                .crossover(&pool, &pool, population_size);
            // Avoid group-position bias before re-partitioning.
            children.shuffle(&mut self.order_rng);
            let mut children = children.into_iter();
            for group in self.current.groups() {
                let members: Vec<Individual> =
                    children.by_ref().take(group.group_size()).collect();
                new_groups.push(Group::new(group.group_size(), genome_size, members));
            }
        }

        let (priorities, sizes) = self
            .assignment
            .assignment_distribution(population_size, genome_size);
        Population::new(genome_size, priorities, sizes, new_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::{AssignmentConfig, AssignmentEngine, AssignmentStrategy};
    use crate::crossover::{CrossoverConfig, CrossoverOperator};

    fn initial_population(seed: u64, population_size: usize, genome_size: usize) -> Population {
        let mut rng = stream_rng(seed, Stream::GenomeInit);
        Population::random(
            population_size,
            genome_size,
            genome_size,
            (0..genome_size).collect(),
            vec![population_size / genome_size; genome_size],
            &mut rng,
        )
    }

    fn world_with(
        seed: u64,
        assignment: AssignmentConfig,
        num_generations: usize,
        restrict_crossover: bool,
    ) -> World {
        World::new(
            initial_population(seed, 40, 4),
            AssignmentEngine::new(assignment, seed),
            CrossoverOperator::new(CrossoverConfig::default(), seed),
            WorldConfig::default()
                .with_num_generations(num_generations)
                .with_restrict_crossover(restrict_crossover)
                .with_seed(seed),
        )
    }

    #[test]
    fn test_generation_zero_snapshot_at_construction() {
        let world = world_with(51, AssignmentConfig::default(), 5, false);
        assert_eq!(world.state(), WorldState::Initialized);
        assert_eq!(world.iteration(), 0);
        assert!(world.population().individuals().all(|i| i.has_assignment()));
    }

    #[test]
    fn test_evolve_records_every_iteration() {
        let result = world_with(52, AssignmentConfig::default(), 8, false).evolve();
        assert_eq!(result.generations, 8);
        assert_eq!(result.history.iterations().len(), 9);
        assert!(result
            .history
            .iterations()
            .keys()
            .copied()
            .eq(0..=8));
    }

    #[test]
    fn test_selection_pressure_raises_fitness() {
        let config =
            AssignmentConfig::default().with_strategy(AssignmentStrategy::Greedy);
        let result = world_with(53, config, 30, false).evolve();

        let first = result.history.iteration(0).unwrap().population.mean;
        let last = result.history.iteration(30).unwrap().population.mean;
        assert!(
            last > first,
            "mean fitness should improve under greedy assignment: {first} -> {last}"
        );
    }

    #[test]
    fn test_restricted_crossover_preserves_group_structure() {
        let config = AssignmentConfig::default().with_restrict_to_groups(true);
        let world = world_with(54, config, 3, true);
        let result = world.evolve();

        assert_eq!(result.history.iterations().len(), 4);
    }

    #[test]
    fn test_crossover_by_assignment_pipeline() {
        // Group by resolved assignment, then restrict crossover to those
        // groups: breeding happens within categories.
        let config = AssignmentConfig::default()
            .with_strategy(AssignmentStrategy::Greedy)
            .with_group_by_assignment(true);
        let result = world_with(55, config, 10, true).evolve();

        assert_eq!(result.history.iterations().len(), 11);
        let last = result.history.iteration(10).unwrap();
        for stats in &last.categories {
            assert!(stats.mean > 0.0);
        }
    }

    #[test]
    fn test_optimal_strategy_runs_end_to_end() {
        let config =
            AssignmentConfig::default().with_strategy(AssignmentStrategy::Optimal);
        let result = world_with(56, config, 5, false).evolve();
        assert_eq!(result.history.iterations().len(), 6);
    }

    #[test]
    fn test_same_seed_reproduces_the_run() {
        let run = |seed: u64| {
            world_with(
                seed,
                AssignmentConfig::default()
                    .with_strategy(AssignmentStrategy::Greedy)
                    .with_randomize_priorities(true)
                    .with_randomize_sizes(true),
                6,
                false,
            )
            .evolve()
        };

        let a = run(57);
        let b = run(57);
        for (ia, ib) in a.history.iterations().values().zip(b.history.iterations().values()) {
            assert_eq!(ia, ib);
        }
        assert_eq!(
            a.history.time_to_population(),
            b.history.time_to_population()
        );
    }

    #[test]
    fn test_independent_runs_aggregate() {
        use crate::metrics::{AggregateType, FitnessHistoryAggregate};

        let histories: Vec<_> = (60..63u64)
            .map(|seed| {
                world_with(
                    seed,
                    AssignmentConfig::default().with_strategy(AssignmentStrategy::Greedy),
                    10,
                    false,
                )
                .evolve()
                .history
            })
            .collect();

        let agg = FitnessHistoryAggregate::aggregate(
            &histories,
            AggregateType::Average,
            AggregateType::Median,
        )
        .unwrap();
        assert_eq!(agg.runs(), 3);
        assert_eq!(agg.iterations().len(), 11);
    }
}
