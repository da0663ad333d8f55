//! The assignment engine: strategy, restriction flags, and distribution
//! randomization for one simulation run.

use rand::rngs::StdRng;

use super::distribution::assignment_distribution;
use super::strategy::{AssignmentStrategy, Resolver};
use crate::population::Population;
use crate::rng::{stream_rng, Stream};

/// Configuration for an [`AssignmentEngine`].
///
/// # Builder Pattern
///
/// ```
/// use evoassign::assign::{AssignmentConfig, AssignmentStrategy};
///
/// let config = AssignmentConfig::default()
///     .with_strategy(AssignmentStrategy::Optimal)
///     .with_randomize_sizes(true);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentConfig {
    /// How individual → category bindings are resolved.
    pub strategy: AssignmentStrategy,

    /// Confine category `c`'s slots to group `c`'s own members (ablation
    /// mode). Requires one group per category; overrides `strategy`.
    pub restrict_to_groups: bool,

    /// After resolution, physically regroup individuals so group `c` holds
    /// exactly the individuals assigned to category `c`. Required before
    /// crossover can be restricted to assignments. Requires one group per
    /// category.
    pub group_by_assignment: bool,

    /// Reshuffle the category priority order every generation.
    pub randomize_priorities: bool,

    /// Perturb per-category capacities every generation (unit transfers with
    /// a 50%-of-baseline floor).
    pub randomize_sizes: bool,
}

impl AssignmentConfig {
    /// Sets the resolution strategy.
    pub fn with_strategy(mut self, strategy: AssignmentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables per-group slot restriction.
    pub fn with_restrict_to_groups(mut self, restrict: bool) -> Self {
        self.restrict_to_groups = restrict;
        self
    }

    /// Enables or disables regrouping by resolved assignment.
    pub fn with_group_by_assignment(mut self, group: bool) -> Self {
        self.group_by_assignment = group;
        self
    }

    /// Enables or disables per-generation priority shuffling.
    pub fn with_randomize_priorities(mut self, randomize: bool) -> Self {
        self.randomize_priorities = randomize;
        self
    }

    /// Enables or disables per-generation capacity perturbation.
    pub fn with_randomize_sizes(mut self, randomize: bool) -> Self {
        self.randomize_sizes = randomize;
        self
    }
}

/// Binds individuals to categories, one population snapshot at a time.
///
/// The engine owns the strategy implementation (selected once at
/// construction) and the three assignment-side randomness streams: the
/// random-strategy shuffle, the priority shuffle, and the capacity
/// perturbation. Seeding the engine fixes all three independently.
pub struct AssignmentEngine {
    config: AssignmentConfig,
    resolver: Box<dyn Resolver>,
    shuffle_rng: StdRng,
    priority_rng: StdRng,
    size_rng: StdRng,
}

impl AssignmentEngine {
    pub fn new(config: AssignmentConfig, seed: u64) -> Self {
        Self {
            resolver: config.strategy.resolver(),
            config,
            shuffle_rng: stream_rng(seed, Stream::AssignmentShuffle),
            priority_rng: stream_rng(seed, Stream::PriorityShuffle),
            size_rng: stream_rng(seed, Stream::SizePerturbation),
        }
    }

    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    /// Computes the priority order and capacities for the next generation,
    /// applying this engine's randomization flags.
    pub fn assignment_distribution(
        &mut self,
        population_size: usize,
        genome_size: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        assignment_distribution(
            population_size,
            genome_size,
            self.config.randomize_priorities,
            self.config.randomize_sizes,
            &mut self.priority_rng,
            &mut self.size_rng,
        )
    }

    /// Resolves every individual's binding for the current generation.
    ///
    /// All assignments are purged first, then rebuilt per the configured
    /// strategy (or the per-group restriction), then individuals are
    /// optionally regrouped by their new category.
    pub fn update_assignments(&mut self, population: &mut Population) {
        for individual in population.individuals_mut() {
            individual.clear_assignment();
        }

        if self.config.restrict_to_groups {
            resolve_within_groups(population);
        } else {
            self.resolver.resolve(population, &mut self.shuffle_rng);
        }

        if self.config.group_by_assignment {
            regroup_by_assignment(population);
        }
    }
}

/// Restricted mode: category `c` draws only from group `c`, best genes first.
fn resolve_within_groups(population: &mut Population) {
    assert_eq!(
        population.num_groups(),
        population.genome_size(),
        "restricting assignment to groups requires one group per category"
    );
    let sizes = population.assignment_sizes().to_vec();

    for (category, group) in population.groups_mut().iter_mut().enumerate() {
        group.set_assignment(Some(category));

        let mut order: Vec<usize> = (0..group.individuals().len()).collect();
        order.sort_by(|&a, &b| {
            let va = group.individuals()[a].genome()[category];
            let vb = group.individuals()[b].genome()[category];
            vb.partial_cmp(&va).unwrap_or(std::cmp::Ordering::Equal)
        });
        for &i in order.iter().take(sizes[category]) {
            group.individuals_mut()[i].assign(category);
        }
    }
}

/// Rebuilds group `c` as exactly the individuals assigned to category `c`,
/// declared at the category's capacity. Unassigned individuals drop out of
/// the grouping entirely (they hold no slot).
fn regroup_by_assignment(population: &mut Population) {
    assert_eq!(
        population.num_groups(),
        population.genome_size(),
        "grouping by assignment requires one group per category"
    );
    let sizes = population.assignment_sizes().to_vec();

    let mut pool = Vec::with_capacity(population.population_size());
    for group in population.groups_mut().iter_mut() {
        pool.append(&mut group.take_individuals());
    }

    let mut buckets: Vec<Vec<crate::population::Individual>> =
        (0..sizes.len()).map(|_| Vec::new()).collect();
    for individual in pool {
        if let Some(category) = individual.assignment() {
            buckets[category].push(individual);
        }
    }

    for (category, (group, members)) in population
        .groups_mut()
        .iter_mut()
        .zip(buckets)
        .enumerate()
    {
        group.set_assignment(Some(category));
        group.set_group_size(sizes[category]);
        group.replace_individuals(members);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{stream_rng, Stream};

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    fn random_population(seed: u64, population_size: usize, genome_size: usize) -> Population {
        let mut rng = stream_rng(seed, Stream::GenomeInit);
        let capacity = population_size / genome_size;
        Population::random(
            population_size,
            genome_size,
            genome_size,
            identity(genome_size),
            vec![capacity; genome_size],
            &mut rng,
        )
    }

    #[test]
    fn test_update_assignments_binds_everyone() {
        let mut pop = random_population(31, 24, 4);
        let mut engine = AssignmentEngine::new(AssignmentConfig::default(), 31);

        engine.update_assignments(&mut pop);
        assert!(pop.individuals().all(|i| i.has_assignment()));
    }

    #[test]
    fn test_assignments_are_purged_before_rebinding() {
        let mut pop = random_population(32, 24, 4);
        let mut engine = AssignmentEngine::new(
            AssignmentConfig::default().with_strategy(AssignmentStrategy::Greedy),
            32,
        );

        engine.update_assignments(&mut pop);
        engine.update_assignments(&mut pop);

        // Rebinding a fully-assigned snapshot must still fill every capacity.
        let mut counts = vec![0; 4];
        for ind in pop.individuals() {
            counts[ind.assignment().unwrap()] += 1;
        }
        assert_eq!(counts, vec![6, 6, 6, 6]);
    }

    #[test]
    fn test_restricted_mode_assigns_within_groups() {
        let mut pop = random_population(33, 24, 4);
        let config = AssignmentConfig::default().with_restrict_to_groups(true);
        let mut engine = AssignmentEngine::new(config, 33);

        engine.update_assignments(&mut pop);

        for (category, group) in pop.groups().iter().enumerate() {
            assert_eq!(group.assignment(), Some(category));
            // Capacity equals group size here, so everyone is assigned to
            // the group's own category.
            assert!(group
                .individuals()
                .iter()
                .all(|i| i.assignment() == Some(category)));
        }
    }

    #[test]
    fn test_group_by_assignment_regroups() {
        let mut pop = random_population(34, 24, 4);
        let config = AssignmentConfig::default()
            .with_strategy(AssignmentStrategy::Greedy)
            .with_group_by_assignment(true);
        let mut engine = AssignmentEngine::new(config, 34);

        engine.update_assignments(&mut pop);

        for (category, group) in pop.groups().iter().enumerate() {
            assert_eq!(group.assignment(), Some(category));
            assert_eq!(group.group_size(), 6);
            assert_eq!(group.len(), 6);
            assert!(group
                .individuals()
                .iter()
                .all(|i| i.assignment() == Some(category)));
        }
    }

    #[test]
    fn test_distribution_uses_engine_flags() {
        let config = AssignmentConfig::default().with_randomize_sizes(true);
        let mut engine = AssignmentEngine::new(config, 35);

        let (priorities, sizes) = engine.assignment_distribution(40, 4);
        assert_eq!(priorities, vec![0, 1, 2, 3]);
        assert_eq!(sizes.iter().sum::<usize>(), 40);
        for &s in &sizes {
            assert!(s >= 5);
        }
    }

    #[test]
    fn test_same_seed_reproduces_random_assignment() {
        let pop_a = random_population(36, 24, 4);
        let mut pop_b = pop_a.clone();
        let mut pop_a = pop_a;

        let mut engine_a = AssignmentEngine::new(AssignmentConfig::default(), 99);
        let mut engine_b = AssignmentEngine::new(AssignmentConfig::default(), 99);

        engine_a.update_assignments(&mut pop_a);
        engine_b.update_assignments(&mut pop_b);

        let a: Vec<_> = pop_a.individuals().map(|i| i.assignment()).collect();
        let b: Vec<_> = pop_b.individuals().map(|i| i.assignment()).collect();
        assert_eq!(a, b);
    }
}
