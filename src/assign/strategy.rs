//! Assignment resolution strategies.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::matching::max_weight_assignment;
use crate::population::Population;

/// Which resolution strategy an [`AssignmentEngine`](super::AssignmentEngine)
/// uses. Selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentStrategy {
    /// Uniform shuffle, then sequential fill in priority order.
    #[default]
    Random,
    /// Highest gene value wins, one category at a time in priority order.
    Greedy,
    /// Globally optimal maximum-weight matching over capacity slots.
    Optimal,
}

impl AssignmentStrategy {
    pub(super) fn resolver(self) -> Box<dyn Resolver> {
        match self {
            AssignmentStrategy::Random => Box::new(RandomResolver),
            AssignmentStrategy::Greedy => Box::new(GreedyResolver),
            AssignmentStrategy::Optimal => Box::new(OptimalResolver),
        }
    }
}

/// Common interface of the strategy implementations.
///
/// `resolve` binds every individual in the population to a category within
/// the snapshot's capacities. All individuals are unassigned on entry. Only
/// the random strategy draws from `rng`.
pub(super) trait Resolver {
    fn resolve(&self, population: &mut Population, rng: &mut StdRng);
}

/// Flattened (group, member) coordinates in enumeration order.
fn member_coordinates(population: &Population) -> Vec<(usize, usize)> {
    let mut coords = Vec::with_capacity(population.population_size());
    for (g, group) in population.groups().iter().enumerate() {
        for i in 0..group.individuals().len() {
            coords.push((g, i));
        }
    }
    coords
}

fn assert_capacities_filled(population: &Population) {
    assert_eq!(
        population.assignment_sizes().iter().sum::<usize>(),
        population.population_size(),
        "assignment capacities must sum to the population size"
    );
}

struct RandomResolver;

impl Resolver for RandomResolver {
    fn resolve(&self, population: &mut Population, rng: &mut StdRng) {
        assert_capacities_filled(population);
        let priorities = population.assignment_priorities().to_vec();
        let sizes = population.assignment_sizes().to_vec();

        let mut coords = member_coordinates(population);
        coords.shuffle(rng);

        let mut cursor = 0;
        for &category in &priorities {
            for _ in 0..sizes[category] {
                let (g, i) = coords[cursor];
                cursor += 1;
                population.groups_mut()[g].individuals_mut()[i].assign(category);
            }
        }
    }
}

struct GreedyResolver;

impl Resolver for GreedyResolver {
    fn resolve(&self, population: &mut Population, _rng: &mut StdRng) {
        assert_capacities_filled(population);
        let priorities = population.assignment_priorities().to_vec();
        let sizes = population.assignment_sizes().to_vec();
        let coords = member_coordinates(population);

        for &category in &priorities {
            // Stable sort: ties keep enumeration order, so results are
            // deterministic for a given snapshot.
            let mut unassigned: Vec<(usize, usize)> = coords
                .iter()
                .copied()
                .filter(|&(g, i)| {
                    !population.groups()[g].individuals()[i].has_assignment()
                })
                .collect();
            unassigned.sort_by(|&(ga, ia), &(gb, ib)| {
                let a = population.groups()[ga].individuals()[ia].genome()[category];
                let b = population.groups()[gb].individuals()[ib].genome()[category];
                b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
            });
            for &(g, i) in unassigned.iter().take(sizes[category]) {
                population.groups_mut()[g].individuals_mut()[i].assign(category);
            }
        }
    }
}

struct OptimalResolver;

impl Resolver for OptimalResolver {
    fn resolve(&self, population: &mut Population, _rng: &mut StdRng) {
        // The slot matrix is only square (every individual matchable) when
        // capacities sum to the population size.
        assert_capacities_filled(population);
        let sizes = population.assignment_sizes().to_vec();
        let coords = member_coordinates(population);

        // One column per capacity slot; identical columns share a category.
        let mut slot_category = Vec::with_capacity(population.population_size());
        for (category, &capacity) in sizes.iter().enumerate() {
            slot_category.extend(std::iter::repeat(category).take(capacity));
        }

        let weights: Vec<Vec<f64>> = coords
            .iter()
            .map(|&(g, i)| {
                let genome = population.groups()[g].individuals()[i].genome();
                slot_category.iter().map(|&c| genome[c]).collect()
            })
            .collect();

        let matched = max_weight_assignment(&weights);
        for (&(g, i), &slot) in coords.iter().zip(matched.iter()) {
            population.groups_mut()[g].individuals_mut()[i].assign(slot_category[slot]);
        }
    }
}
