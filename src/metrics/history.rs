//! Per-run fitness history and time-to-fitness tracking.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::data::FitnessData;

/// Everything one simulation run records: a [`FitnessData`] snapshot per
/// iteration plus, for the population and each category, the first iteration
/// at which mean fitness exceeded each configured threshold.
///
/// Time-to entries are write-once: once a (subgroup, threshold) crossing is
/// recorded it is never overwritten, no matter what later iterations report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessHistory {
    thresholds: Vec<f64>,
    genome_size: usize,
    iterations: BTreeMap<usize, FitnessData>,
    /// Indexed parallel to `thresholds`; `None` = not crossed yet.
    time_to_population: Vec<Option<usize>>,
    /// `[category][threshold index]`.
    time_to_categories: Vec<Vec<Option<usize>>>,
}

impl FitnessHistory {
    /// Creates an empty history tracking the given fitness thresholds.
    pub fn new(thresholds: Vec<f64>, genome_size: usize) -> Self {
        Self {
            time_to_population: vec![None; thresholds.len()],
            time_to_categories: vec![vec![None; thresholds.len()]; genome_size],
            thresholds,
            genome_size,
            iterations: BTreeMap::new(),
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn genome_size(&self) -> usize {
        self.genome_size
    }

    pub fn iterations(&self) -> &BTreeMap<usize, FitnessData> {
        &self.iterations
    }

    pub fn iteration(&self, iteration_no: usize) -> Option<&FitnessData> {
        self.iterations.get(&iteration_no)
    }

    /// First crossing iterations for the population, parallel to
    /// [`thresholds`](Self::thresholds).
    pub fn time_to_population(&self) -> &[Option<usize>] {
        &self.time_to_population
    }

    /// First crossing iterations for one category.
    pub fn time_to_category(&self, category: usize) -> &[Option<usize>] {
        &self.time_to_categories[category]
    }

    /// Records one iteration's snapshot and updates the time-to tables.
    pub fn record(&mut self, iteration_no: usize, data: FitnessData) {
        self.update_time_to(iteration_no, &data);
        self.update_iteration(iteration_no, data);
    }

    /// Stores (or replaces) the snapshot for `iteration_no`.
    pub fn update_iteration(&mut self, iteration_no: usize, data: FitnessData) {
        debug_assert_eq!(data.categories.len(), self.genome_size);
        self.iterations.insert(iteration_no, data);
    }

    /// Marks first crossings for every (subgroup, threshold) pair that
    /// `data` exceeds and that has not been marked before.
    pub fn update_time_to(&mut self, iteration_no: usize, data: &FitnessData) {
        for (t, &threshold) in self.thresholds.iter().enumerate() {
            if self.time_to_population[t].is_none() && data.population.mean > threshold {
                self.time_to_population[t] = Some(iteration_no);
            }
            for (category, stats) in data.categories.iter().enumerate() {
                if self.time_to_categories[category][t].is_none() && stats.mean > threshold {
                    self.time_to_categories[category][t] = Some(iteration_no);
                }
            }
        }
    }

    /// Nested textual report for human inspection.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "FITNESS HISTORY ({} iterations, {} categories)\n",
            self.iterations.len(),
            self.genome_size
        ));
        for (iteration_no, data) in &self.iterations {
            out.push_str(&format!(
                "  iteration {iteration_no}: population {:.4}",
                data.population.mean
            ));
            for (category, stats) in data.categories.iter().enumerate() {
                out.push_str(&format!("  [{category}] {:.4}", stats.mean));
            }
            out.push('\n');
        }
        out.push_str("TIME TO FITNESS\n");
        out.push_str(&format!(
            "  population: {}\n",
            format_time_to(&self.thresholds, &self.time_to_population)
        ));
        for (category, row) in self.time_to_categories.iter().enumerate() {
            out.push_str(&format!(
                "  category {category}: {}\n",
                format_time_to(&self.thresholds, row)
            ));
        }
        out
    }
}

fn format_time_to(thresholds: &[f64], crossings: &[Option<usize>]) -> String {
    thresholds
        .iter()
        .zip(crossings)
        .map(|(threshold, crossing)| match crossing {
            Some(iteration) => format!("{threshold}: {iteration}"),
            None => format!("{threshold}: N/A"),
        })
        .collect::<Vec<_>>()
        .join("\t")
}

impl fmt::Display for FitnessHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SubgroupStats;

    fn data(population_mean: f64, category_means: &[f64]) -> FitnessData {
        let stats = |mean: f64| SubgroupStats {
            mean,
            percentiles: [mean; 11],
        };
        FitnessData {
            population: stats(population_mean),
            categories: category_means.iter().map(|&m| stats(m)).collect(),
        }
    }

    #[test]
    fn test_record_tracks_iterations() {
        let mut history = FitnessHistory::new(vec![0.5], 2);
        history.record(0, data(0.3, &[0.2, 0.4]));
        history.record(1, data(0.4, &[0.3, 0.5]));

        assert_eq!(history.iterations().len(), 2);
        assert_eq!(history.iteration(1).unwrap().population.mean, 0.4);
        assert!(history.iteration(7).is_none());
    }

    #[test]
    fn test_time_to_first_crossing() {
        let mut history = FitnessHistory::new(vec![0.5, 0.8], 2);
        history.record(0, data(0.3, &[0.6, 0.1]));
        history.record(1, data(0.55, &[0.7, 0.2]));
        history.record(2, data(0.9, &[0.85, 0.3]));

        assert_eq!(history.time_to_population(), &[Some(1), Some(2)]);
        assert_eq!(history.time_to_category(0), &[Some(0), Some(2)]);
        assert_eq!(history.time_to_category(1), &[None, None]);
    }

    #[test]
    fn test_time_to_is_write_once() {
        let mut history = FitnessHistory::new(vec![0.5], 1);
        history.record(3, data(0.6, &[0.6]));
        // A later, even higher crossing must not move the recorded entry.
        history.record(9, data(0.99, &[0.99]));

        assert_eq!(history.time_to_population(), &[Some(3)]);
        assert_eq!(history.time_to_category(0), &[Some(3)]);
    }

    #[test]
    fn test_threshold_requires_strict_excess() {
        let mut history = FitnessHistory::new(vec![0.5], 1);
        history.record(0, data(0.5, &[0.5]));
        assert_eq!(history.time_to_population(), &[None]);

        history.record(1, data(0.5000001, &[0.5]));
        assert_eq!(history.time_to_population(), &[Some(1)]);
    }

    #[test]
    fn test_dump_mentions_uncrossed_thresholds() {
        let mut history = FitnessHistory::new(vec![0.5, 0.9], 1);
        history.record(0, data(0.6, &[0.6]));

        let dump = history.dump();
        assert!(dump.contains("TIME TO FITNESS"));
        assert!(dump.contains("0.5: 0"));
        assert!(dump.contains("0.9: N/A"));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut history = FitnessHistory::new(vec![0.5], 2);
        history.record(0, data(0.6, &[0.55, 0.65]));

        let json = serde_json::to_string(&history).unwrap();
        let back: FitnessHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(back.thresholds(), history.thresholds());
        assert_eq!(back.time_to_population(), history.time_to_population());
        assert_eq!(back.iterations().len(), 1);
    }
}
