//! Crossover configuration.

/// How the breeding sub-pool is carved out of a fitness-ranked input pool.
///
/// Bounding the breeding pool raises selection pressure: only the top of the
/// ranking gets to parent children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreedingPool {
    /// Keep a fixed top fraction of the ranked pool (0.0–1.0].
    TopFraction(f64),

    /// Keep `sqrt(pool_size) * multiplier` individuals. Square-root scaling
    /// keeps selection pressure roughly constant as the pool grows.
    SqrtScaled(f64),
}

impl BreedingPool {
    /// Number of individuals kept from a ranked pool of `pool_size`, always
    /// in `1..=pool_size` for a non-empty pool.
    pub fn size(self, pool_size: usize) -> usize {
        let kept = match self {
            BreedingPool::TopFraction(fraction) => (pool_size as f64 * fraction).ceil() as usize,
            BreedingPool::SqrtScaled(multiplier) => {
                ((pool_size as f64).sqrt() * multiplier).round() as usize
            }
        };
        kept.clamp(1, pool_size.max(1))
    }
}

/// Configuration for the [`CrossoverOperator`](super::CrossoverOperator).
///
/// # Defaults
///
/// The defaults are the tuned values from the reference study: β = 2.5
/// (midpoint-biased interpolation), 1% per-gene mutation, top half of each
/// pool breeding.
///
/// ```
/// use evoassign::crossover::CrossoverConfig;
///
/// let config = CrossoverConfig::default();
/// assert_eq!(config.beta_param, 2.5);
/// assert_eq!(config.mutation_rate, 0.01);
/// assert!(config.interpolate);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoassign::crossover::{BreedingPool, CrossoverConfig};
///
/// let config = CrossoverConfig::default()
///     .with_interpolate(false)
///     .with_mutation_rate(0.05)
///     .with_breeding(BreedingPool::SqrtScaled(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverConfig {
    /// Shape parameter of the `Beta(β, β)` gene-mixing distribution.
    ///
    /// β < 1 biases mixing toward one parent's value; β > 1 biases toward
    /// the midpoint. Only used in interpolation mode.
    pub beta_param: f64,

    /// Per-gene probability of replacing the recombined value with a fresh
    /// uniform `[0, 1)` sample (0.0–1.0). Checked after recombination, so a
    /// mutation overrides either parent's contribution.
    pub mutation_rate: f64,

    /// Interpolate genes through the beta mixing coefficient (`true`) or
    /// copy each gene verbatim from a fair-coin-chosen parent (`false`).
    pub interpolate: bool,

    /// Breeding sub-pool sizing policy.
    pub breeding: BreedingPool,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            beta_param: 2.5,
            mutation_rate: 0.01,
            interpolate: true,
            breeding: BreedingPool::TopFraction(0.5),
        }
    }
}

impl CrossoverConfig {
    /// Sets the beta shape parameter.
    pub fn with_beta_param(mut self, beta: f64) -> Self {
        self.beta_param = beta;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Selects interpolation (`true`) or discrete (`false`) gene mixing.
    pub fn with_interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    /// Sets the breeding sub-pool policy.
    pub fn with_breeding(mut self, breeding: BreedingPool) -> Self {
        self.breeding = breeding;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.beta_param > 0.0) {
            return Err("beta_param must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        match self.breeding {
            BreedingPool::TopFraction(f) if !(f > 0.0 && f <= 1.0) => {
                Err("breeding top fraction must be within (0, 1]".into())
            }
            BreedingPool::SqrtScaled(m) if !(m > 0.0) => {
                Err("breeding sqrt multiplier must be positive".into())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrossoverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.breeding, BreedingPool::TopFraction(0.5));
    }

    #[test]
    fn test_builder_pattern() {
        let config = CrossoverConfig::default()
            .with_beta_param(0.5)
            .with_mutation_rate(0.2)
            .with_interpolate(false)
            .with_breeding(BreedingPool::SqrtScaled(1.5));

        assert_eq!(config.beta_param, 0.5);
        assert_eq!(config.mutation_rate, 0.2);
        assert!(!config.interpolate);
        assert_eq!(config.breeding, BreedingPool::SqrtScaled(1.5));
    }

    #[test]
    fn test_mutation_rate_clamps() {
        let config = CrossoverConfig::default().with_mutation_rate(1.5);
        assert_eq!(config.mutation_rate, 1.0);
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        assert!(CrossoverConfig::default()
            .with_beta_param(0.0)
            .validate()
            .is_err());
        assert!(CrossoverConfig::default()
            .with_breeding(BreedingPool::TopFraction(0.0))
            .validate()
            .is_err());
        assert!(CrossoverConfig::default()
            .with_breeding(BreedingPool::SqrtScaled(-1.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_breeding_pool_sizes() {
        assert_eq!(BreedingPool::TopFraction(0.5).size(10), 5);
        assert_eq!(BreedingPool::TopFraction(0.5).size(1), 1);
        assert_eq!(BreedingPool::TopFraction(1.0).size(7), 7);
        // sqrt(100) * 2 = 20
        assert_eq!(BreedingPool::SqrtScaled(2.0).size(100), 20);
        // never exceeds the pool
        assert_eq!(BreedingPool::SqrtScaled(10.0).size(4), 4);
        // never below one parent candidate
        assert_eq!(BreedingPool::SqrtScaled(0.1).size(4), 1);
    }
}
