//! World configuration.

/// Configuration for a [`World`](super::World) run.
///
/// # Defaults
///
/// ```
/// use evoassign::world::WorldConfig;
///
/// let config = WorldConfig::default();
/// assert_eq!(config.num_generations, 100);
/// assert!(!config.restrict_crossover);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoassign::world::WorldConfig;
///
/// let config = WorldConfig::default()
///     .with_num_generations(250)
///     .with_restrict_crossover(true)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Number of generation steps to run. Termination is always by count.
    pub num_generations: usize,

    /// Restrict breeding pools to each group's own assigned members instead
    /// of pooling the whole population.
    pub restrict_crossover: bool,

    /// Mean-fitness thresholds whose first-crossing iterations are recorded.
    pub time_to_thresholds: Vec<f64>,

    /// Seed for the world's own randomness (the child-order shuffle).
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            num_generations: 100,
            restrict_crossover: false,
            time_to_thresholds: vec![0.7, 0.8, 0.9, 0.95, 0.98, 0.99],
            seed: 0,
        }
    }
}

impl WorldConfig {
    /// Sets the number of generations.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Enables or disables group-restricted crossover.
    pub fn with_restrict_crossover(mut self, restrict: bool) -> Self {
        self.restrict_crossover = restrict;
        self
    }

    /// Sets the time-to-fitness thresholds.
    pub fn with_time_to_thresholds(mut self, thresholds: Vec<f64>) -> Self {
        self.time_to_thresholds = thresholds;
        self
    }

    /// Sets the world seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_generations == 0 {
            return Err("num_generations must be at least 1".into());
        }
        if self
            .time_to_thresholds
            .iter()
            .any(|t| !t.is_finite())
        {
            return Err("time_to_thresholds must be finite".into());
        }
        Ok(())
    }
}
