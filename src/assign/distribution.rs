//! Per-generation capacity and priority distributions.

use rand::seq::SliceRandom;
use rand::Rng;

/// Computes the priority order and per-category capacities for one generation.
///
/// Priorities default to the identity permutation and are shuffled when
/// `randomize_priorities` is set. Capacities default to an even split
/// (`population_size / genome_size` each); when `randomize_sizes` is set,
/// `population_size` single-unit transfers are attempted between randomly
/// chosen donor/recipient categories, rejecting any transfer that would drop
/// the donor below half its default capacity. The capacity total always
/// equals `population_size` exactly.
///
/// # Panics
/// Panics if `population_size` is 0 or `genome_size` does not divide it
/// evenly (an uneven default split could never sum back to the population
/// size).
pub fn assignment_distribution<R: Rng>(
    population_size: usize,
    genome_size: usize,
    randomize_priorities: bool,
    randomize_sizes: bool,
    priority_rng: &mut R,
    size_rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert!(population_size > 0, "population_size must be positive");
    assert!(genome_size > 0, "genome_size must be positive");
    assert_eq!(
        population_size % genome_size,
        0,
        "population_size must be divisible by genome_size"
    );

    let mut priorities: Vec<usize> = (0..genome_size).collect();
    if randomize_priorities {
        priorities.shuffle(priority_rng);
    }

    let default_capacity = population_size / genome_size;
    let mut sizes = vec![default_capacity; genome_size];
    if randomize_sizes {
        for _ in 0..population_size {
            let donor = size_rng.random_range(0..genome_size);
            let recipient = size_rng.random_range(0..genome_size);
            if donor == recipient {
                continue;
            }
            // Keep every category at >= 50% of its baseline share.
            if 2 * (sizes[donor] - 1) < default_capacity {
                continue;
            }
            sizes[donor] -= 1;
            sizes[recipient] += 1;
        }
    }

    (priorities, sizes)
}
