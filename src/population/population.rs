//! The per-generation population value.

use std::fmt;

use rand::Rng;

use super::{Group, Individual};

/// One generation's worth of individuals, partitioned into groups, together
/// with the generation's assignment capacities and priorities.
///
/// # Invariants
///
/// Checked at construction, fatal when violated:
///
/// - `assignment_sizes` sums to `population_size` (every individual gets
///   exactly one slot),
/// - declared group sizes sum to `population_size`,
/// - `assignment_priorities` is a permutation of `0..genome_size`.
///
/// A `Population` is a value: the next generation is always a new
/// `Population` built from this one's data, so histories that captured a
/// snapshot of this generation are never aliased by later mutation. The one
/// sanctioned in-place write is the assignment pass updating each
/// individual's `assignment` field within the current generation.
#[derive(Debug, Clone)]
pub struct Population {
    population_size: usize,
    num_groups: usize,
    genome_size: usize,
    assignment_priorities: Vec<usize>,
    assignment_sizes: Vec<usize>,
    groups: Vec<Group>,
}

impl Population {
    /// Assembles a population from explicit groups.
    ///
    /// `population_size` and `num_groups` are derived from the declared group
    /// sizes.
    ///
    /// # Panics
    /// Panics if any invariant listed on [`Population`] is violated.
    pub fn new(
        genome_size: usize,
        assignment_priorities: Vec<usize>,
        assignment_sizes: Vec<usize>,
        groups: Vec<Group>,
    ) -> Self {
        let population_size: usize = groups.iter().map(Group::group_size).sum();
        let capacity_total: usize = assignment_sizes.iter().sum();
        assert_eq!(
            capacity_total, population_size,
            "assignment capacities must sum to the population size"
        );
        assert_eq!(assignment_sizes.len(), genome_size);
        assert!(
            is_permutation(&assignment_priorities, genome_size),
            "assignment priorities must be a permutation of 0..genome_size"
        );
        debug_assert!(groups.iter().all(|g| g.genome_size() == genome_size));

        Self {
            population_size,
            num_groups: groups.len(),
            genome_size,
            assignment_priorities,
            assignment_sizes,
            groups,
        }
    }

    /// Creates a generation-0 population of randomized genomes, split into
    /// `num_groups` equal groups.
    ///
    /// # Panics
    /// Panics if `num_groups` does not divide `population_size`, or if any
    /// invariant listed on [`Population`] is violated.
    pub fn random<R: Rng>(
        population_size: usize,
        num_groups: usize,
        genome_size: usize,
        assignment_priorities: Vec<usize>,
        assignment_sizes: Vec<usize>,
        rng: &mut R,
    ) -> Self {
        assert!(num_groups > 0, "num_groups must be positive");
        assert_eq!(
            population_size % num_groups,
            0,
            "population_size must be divisible by num_groups"
        );
        let group_size = population_size / num_groups;
        let groups = (0..num_groups)
            .map(|_| Group::random(group_size, genome_size, rng))
            .collect();
        Self::new(genome_size, assignment_priorities, assignment_sizes, groups)
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    pub fn genome_size(&self) -> usize {
        self.genome_size
    }

    /// Category processing order for the greedy assignment strategy.
    pub fn assignment_priorities(&self) -> &[usize] {
        &self.assignment_priorities
    }

    /// Per-category capacities for this generation.
    pub fn assignment_sizes(&self) -> &[usize] {
        &self.assignment_sizes
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub(crate) fn groups_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }

    /// All individuals in group order.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.groups.iter().flat_map(|g| g.individuals().iter())
    }

    pub(crate) fn individuals_mut(&mut self) -> impl Iterator<Item = &mut Individual> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.individuals_mut().iter_mut())
    }

    /// Mean fitness over the whole population, counting unassigned
    /// individuals as zero.
    pub fn mean_fitness(&self) -> f64 {
        let total: f64 = self.individuals().map(Individual::fitness).sum();
        total / self.population_size as f64
    }

    /// Sum of all individuals' fitness under the current bindings.
    pub fn total_fitness(&self) -> f64 {
        self.individuals().map(Individual::fitness).sum()
    }
}

fn is_permutation(priorities: &[usize], genome_size: usize) -> bool {
    if priorities.len() != genome_size {
        return false;
    }
    let mut seen = vec![false; genome_size];
    for &p in priorities {
        if p >= genome_size || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "POPULATION (size: {}, groups: {}, categories: {})",
            self.population_size, self.num_groups, self.genome_size
        )?;
        writeln!(f, "priorities: {:?}", self.assignment_priorities)?;
        writeln!(f, "capacities: {:?}", self.assignment_sizes)?;
        for group in &self.groups {
            write!(f, "{group}")?;
        }
        Ok(())
    }
}
