//! Statistical aggregation across independent runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::data::{FitnessData, SubgroupStats};
use super::history::FitnessHistory;

/// Statistic applied to one metric's values across runs.
///
/// `Average` and `Stdev` use whatever non-missing values exist. The ordinal
/// statistics (`Min`, `Max`, `Median`, percentiles) additionally require at
/// least half the runs to report a value — an order statistic over a small
/// surviving sample would read as misleadingly confident. Unsatisfied, they
/// yield the NaN sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateType {
    Average,
    Stdev,
    Min,
    Max,
    Median,
    Percentile10,
    Percentile20,
    Percentile80,
    Percentile90,
}

impl AggregateType {
    fn is_ordinal(self) -> bool {
        !matches!(self, AggregateType::Average | AggregateType::Stdev)
    }

    /// Applies the statistic to the non-missing `values` out of `total_runs`
    /// runs. Returns NaN when the statistic cannot be computed.
    pub fn apply(self, mut values: Vec<f64>, total_runs: usize) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }
        if self.is_ordinal() && 2 * values.len() < total_runs {
            return f64::NAN;
        }

        match self {
            AggregateType::Average => mean(&values),
            AggregateType::Stdev => {
                let m = mean(&values);
                let variance =
                    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
                variance.sqrt()
            }
            _ => {
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                match self {
                    AggregateType::Min => values[0],
                    AggregateType::Max => values[values.len() - 1],
                    AggregateType::Median => {
                        let n = values.len();
                        if n % 2 == 1 {
                            values[n / 2]
                        } else {
                            (values[n / 2 - 1] + values[n / 2]) / 2.0
                        }
                    }
                    AggregateType::Percentile10 => nearest_rank(&values, 10),
                    AggregateType::Percentile20 => nearest_rank(&values, 20),
                    AggregateType::Percentile80 => nearest_rank(&values, 80),
                    AggregateType::Percentile90 => nearest_rank(&values, 90),
                    AggregateType::Average | AggregateType::Stdev => unreachable!(),
                }
            }
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn nearest_rank(sorted: &[f64], percentile: usize) -> f64 {
    sorted[(percentile * sorted.len() / 100).min(sorted.len() - 1)]
}

/// The merge of N independent runs' histories.
///
/// Shaped like a [`FitnessHistory`], except every metric holds the chosen
/// statistic over the runs, and time-to values are `f64` (a median of
/// iteration numbers may be fractional; NaN = too little data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessHistoryAggregate {
    runs: usize,
    thresholds: Vec<f64>,
    genome_size: usize,
    fitness_aggregation: AggregateType,
    time_aggregation: AggregateType,
    iterations: BTreeMap<usize, FitnessData>,
    time_to_population: Vec<f64>,
    time_to_categories: Vec<Vec<f64>>,
}

impl FitnessHistoryAggregate {
    /// Merges the histories of independent runs.
    ///
    /// `fitness_aggregation` is applied to every fitness metric (means and
    /// percentile slots, population and per-category); `time_aggregation` to
    /// every time-to-threshold entry. Runs that never crossed a threshold
    /// contribute a missing value there, not a number.
    ///
    /// Returns `Err` if `histories` is empty or the histories disagree on
    /// genome size or threshold list.
    pub fn aggregate(
        histories: &[FitnessHistory],
        fitness_aggregation: AggregateType,
        time_aggregation: AggregateType,
    ) -> Result<Self, String> {
        let first = histories
            .first()
            .ok_or_else(|| "cannot aggregate zero histories".to_string())?;
        let genome_size = first.genome_size();
        let thresholds = first.thresholds().to_vec();
        for history in histories {
            if history.genome_size() != genome_size {
                return Err("histories disagree on genome size".into());
            }
            if history.thresholds() != thresholds {
                return Err("histories disagree on time-to thresholds".into());
            }
        }
        let runs = histories.len();

        let iteration_numbers: BTreeSet<usize> = histories
            .iter()
            .flat_map(|h| h.iterations().keys().copied())
            .collect();

        let mut iterations = BTreeMap::new();
        for iteration_no in iteration_numbers {
            let present: Vec<&FitnessData> = histories
                .iter()
                .filter_map(|h| h.iteration(iteration_no))
                .collect();

            let merge = |extract: &dyn Fn(&FitnessData) -> f64| -> f64 {
                let values: Vec<f64> = present
                    .iter()
                    .map(|data| extract(data))
                    .filter(|v| !v.is_nan())
                    .collect();
                fitness_aggregation.apply(values, runs)
            };

            let merge_subgroup = |select: &dyn Fn(&FitnessData) -> &SubgroupStats| SubgroupStats {
                mean: merge(&|data| select(data).mean),
                percentiles: std::array::from_fn(|p| merge(&|data| select(data).percentiles[p])),
            };

            let population = merge_subgroup(&|data| &data.population);
            let categories = (0..genome_size)
                .map(|c| merge_subgroup(&move |data: &FitnessData| &data.categories[c]))
                .collect();
            iterations.insert(
                iteration_no,
                FitnessData {
                    population,
                    categories,
                },
            );
        }

        let merge_time = |crossings: &dyn Fn(&FitnessHistory) -> &[Option<usize>]| -> Vec<f64> {
            (0..thresholds.len())
                .map(|t| {
                    let values: Vec<f64> = histories
                        .iter()
                        .filter_map(|h| crossings(h)[t].map(|i| i as f64))
                        .collect();
                    time_aggregation.apply(values, runs)
                })
                .collect()
        };

        let time_to_population = merge_time(&|h: &FitnessHistory| h.time_to_population());
        let time_to_categories = (0..genome_size)
            .map(|c| merge_time(&move |h: &FitnessHistory| h.time_to_category(c)))
            .collect();

        Ok(Self {
            runs,
            thresholds,
            genome_size,
            fitness_aggregation,
            time_aggregation,
            iterations,
            time_to_population,
            time_to_categories,
        })
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn genome_size(&self) -> usize {
        self.genome_size
    }

    pub fn fitness_aggregation(&self) -> AggregateType {
        self.fitness_aggregation
    }

    pub fn time_aggregation(&self) -> AggregateType {
        self.time_aggregation
    }

    pub fn iterations(&self) -> &BTreeMap<usize, FitnessData> {
        &self.iterations
    }

    pub fn iteration(&self, iteration_no: usize) -> Option<&FitnessData> {
        self.iterations.get(&iteration_no)
    }

    /// Aggregated first-crossing values, NaN where too few runs crossed.
    pub fn time_to_population(&self) -> &[f64] {
        &self.time_to_population
    }

    pub fn time_to_category(&self, category: usize) -> &[f64] {
        &self.time_to_categories[category]
    }

    /// Nested textual report for human inspection.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "AGGREGATE over {} runs (fitness: {:?}, time-to: {:?})\n",
            self.runs, self.fitness_aggregation, self.time_aggregation
        ));
        for (iteration_no, data) in &self.iterations {
            out.push_str(&format!(
                "  iteration {iteration_no}: population {:.4}\n",
                data.population.mean
            ));
        }
        out.push_str("TIME TO FITNESS\n");
        out.push_str(&format!(
            "  population: {}\n",
            format_time_row(&self.thresholds, &self.time_to_population)
        ));
        for (category, row) in self.time_to_categories.iter().enumerate() {
            out.push_str(&format!(
                "  category {category}: {}\n",
                format_time_row(&self.thresholds, row)
            ));
        }
        out
    }
}

fn format_time_row(thresholds: &[f64], values: &[f64]) -> String {
    thresholds
        .iter()
        .zip(values)
        .map(|(threshold, value)| {
            if value.is_nan() {
                format!("{threshold}: N/A")
            } else {
                format!("{threshold}: {value}")
            }
        })
        .collect::<Vec<_>>()
        .join("\t")
}

impl fmt::Display for FitnessHistoryAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
