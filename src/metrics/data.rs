//! Per-iteration fitness snapshots.

use serde::{Deserialize, Serialize};

use crate::population::Population;

/// The percentile ladder recorded for every subgroup.
pub const PERCENTILE_STEPS: [usize; 11] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Fitness statistics for one subgroup (the whole population or one
/// assignment category) at one iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubgroupStats {
    /// Sum of member fitness divided by the subgroup's *expected* size (its
    /// capacity). An under-filled category therefore shows depressed mean
    /// fitness instead of hiding the shortfall.
    pub mean: f64,

    /// Fitness values at [`PERCENTILE_STEPS`], ascending. All NaN for an
    /// empty subgroup.
    pub percentiles: [f64; 11],
}

impl SubgroupStats {
    /// Computes stats from ascending-sorted member fitness values.
    ///
    /// # Panics
    /// Panics if `expected_size` is 0.
    pub fn from_sorted_fitness(sorted: &[f64], expected_size: usize) -> Self {
        assert!(expected_size > 0, "expected subgroup size must be positive");
        debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        let mean = sorted.iter().sum::<f64>() / expected_size as f64;
        let percentiles = if sorted.is_empty() {
            [f64::NAN; 11]
        } else {
            PERCENTILE_STEPS.map(|p| sorted[(p * sorted.len() / 100).min(sorted.len() - 1)])
        };
        Self { mean, percentiles }
    }
}

/// One generation's fitness snapshot: the whole population plus every
/// assignment category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessData {
    pub population: SubgroupStats,
    /// Indexed by category.
    pub categories: Vec<SubgroupStats>,
}

impl FitnessData {
    /// Snapshots a population under its current assignments.
    pub fn from_population(population: &Population) -> Self {
        let mut all: Vec<f64> = population
            .individuals()
            .map(|i| i.fitness())
            .collect();
        all.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let categories = (0..population.genome_size())
            .map(|category| {
                let mut members: Vec<f64> = population
                    .individuals()
                    .filter(|i| i.assignment() == Some(category))
                    .map(|i| i.fitness())
                    .collect();
                members.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                SubgroupStats::from_sorted_fitness(
                    &members,
                    population.assignment_sizes()[category],
                )
            })
            .collect();

        Self {
            population: SubgroupStats::from_sorted_fitness(&all, population.population_size()),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::{AssignmentConfig, AssignmentEngine, AssignmentStrategy};
    use crate::rng::{stream_rng, Stream};

    #[test]
    fn test_percentile_ladder_endpoints() {
        let sorted: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let stats = SubgroupStats::from_sorted_fitness(&sorted, 10);

        assert_eq!(stats.percentiles[0], 0.0); // min
        assert_eq!(stats.percentiles[10], 0.9); // max
        assert_eq!(stats.percentiles[5], 0.5); // median slot
        assert!((stats.mean - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_mean_divides_by_expected_size() {
        // Three members but an expected size of six: shortfall shows up as
        // a halved mean.
        let stats = SubgroupStats::from_sorted_fitness(&[0.4, 0.5, 0.6], 6);
        assert!((stats.mean - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_empty_subgroup_has_nan_percentiles() {
        let stats = SubgroupStats::from_sorted_fitness(&[], 5);
        assert_eq!(stats.mean, 0.0);
        assert!(stats.percentiles.iter().all(|p| p.is_nan()));
    }

    #[test]
    fn test_snapshot_covers_all_categories() {
        let mut rng = stream_rng(41, Stream::GenomeInit);
        let mut pop = Population::random(
            24,
            4,
            4,
            (0..4).collect(),
            vec![6; 4],
            &mut rng,
        );
        let mut engine = AssignmentEngine::new(
            AssignmentConfig::default().with_strategy(AssignmentStrategy::Greedy),
            41,
        );
        engine.update_assignments(&mut pop);

        let data = FitnessData::from_population(&pop);
        assert_eq!(data.categories.len(), 4);
        assert!(data.population.mean > 0.0);
        for stats in &data.categories {
            // Six members at capacity six: percentiles are real values.
            assert!(stats.percentiles.iter().all(|p| !p.is_nan()));
        }
        // Population mean is the capacity-weighted mean of category means.
        let weighted: f64 = data.categories.iter().map(|s| s.mean * 6.0).sum::<f64>() / 24.0;
        assert!((data.population.mean - weighted).abs() < 1e-12);
    }

    #[test]
    fn test_serde_round_trip() {
        let stats = SubgroupStats::from_sorted_fitness(&[0.1, 0.2, 0.3], 3);
        let data = FitnessData {
            population: stats.clone(),
            categories: vec![stats],
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: FitnessData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
