//! The seeded crossover operator.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Beta, Distribution};

use super::config::CrossoverConfig;
use crate::population::{Genome, Individual};
use crate::rng::{stream_rng, Stream};

/// Give up looking for distinct parents after this many redraws. The pools
/// can be the same slice, and a tiny breeding pool may not contain two
/// distinct individuals at all.
const MAX_PARENT_REDRAWS: usize = 32;

/// Produces a new generation's individuals from breeding pools.
///
/// The operator owns four independent randomness streams: parent index
/// draws, gene mixing, the mutation gate, and mutated-value resampling.
/// Re-seeding the operator reproduces its exact output for the same inputs.
pub struct CrossoverOperator {
    config: CrossoverConfig,
    mixing: Beta<f64>,
    parent_rng: StdRng,
    mix_rng: StdRng,
    gate_rng: StdRng,
    value_rng: StdRng,
}

impl CrossoverOperator {
    /// Creates an operator from a validated config and a seed.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`CrossoverConfig::validate`] first to get a descriptive error).
    pub fn new(config: CrossoverConfig, seed: u64) -> Self {
        config.validate().expect("invalid CrossoverConfig");
        let mixing = Beta::new(config.beta_param, config.beta_param)
            .expect("beta_param already validated");
        Self {
            config,
            mixing,
            parent_rng: stream_rng(seed, Stream::ParentSelection),
            mix_rng: stream_rng(seed, Stream::GeneMix),
            gate_rng: stream_rng(seed, Stream::MutationGate),
            value_rng: stream_rng(seed, Stream::MutationValue),
        }
    }

    pub fn config(&self) -> &CrossoverConfig {
        &self.config
    }

    /// Breeds `out_size` children from two parent pools.
    ///
    /// The pools may overlap or be the very same individuals (self-breeding
    /// group). Each input pool is ranked by fitness and cut down to its
    /// breeding sub-pool; one parent is then drawn uniformly from each side
    /// per child, redrawing when both draws land on the same individual.
    /// Children are born unassigned.
    ///
    /// Returns an empty vector when either pool is empty.
    ///
    /// # Panics
    /// Panics if the pools disagree on genome size.
    pub fn crossover(
        &mut self,
        pool_a: &[&Individual],
        pool_b: &[&Individual],
        out_size: usize,
    ) -> Vec<Individual> {
        if pool_a.is_empty() || pool_b.is_empty() {
            return Vec::new();
        }
        let genome_size = pool_a[0].genome_size();
        assert_eq!(
            genome_size,
            pool_b[0].genome_size(),
            "crossover pools must share one genome size"
        );

        let ranked_a = self.breeding_pool(pool_a);
        let ranked_b = self.breeding_pool(pool_b);

        (0..out_size)
            .map(|_| {
                let (p1, p2) = self.pick_parents(&ranked_a, &ranked_b);
                Individual::new(self.recombine(p1.genome(), p2.genome()))
            })
            .collect()
    }

    /// Ranks a pool by descending fitness and keeps the configured sub-pool.
    fn breeding_pool<'a>(&self, pool: &[&'a Individual]) -> Vec<&'a Individual> {
        let mut ranked: Vec<&Individual> = pool.to_vec();
        ranked.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(self.config.breeding.size(pool.len()));
        ranked
    }

    /// Draws one parent per pool, uniformly, redrawing identical pairs.
    ///
    /// Identity is by reference: when the caller hands the same individuals
    /// to both sides, the same draw on both is self-pairing and gets
    /// redrawn. A pool that cannot supply two distinct parents (single
    /// shared individual) self-pairs after the redraw budget.
    fn pick_parents<'a>(
        &mut self,
        ranked_a: &[&'a Individual],
        ranked_b: &[&'a Individual],
    ) -> (&'a Individual, &'a Individual) {
        let mut p1 = ranked_a[self.parent_rng.random_range(0..ranked_a.len())];
        let mut p2 = ranked_b[self.parent_rng.random_range(0..ranked_b.len())];
        if ranked_a.len() == 1 && ranked_b.len() == 1 {
            return (p1, p2);
        }
        let mut redraws = 0;
        while std::ptr::eq(p1, p2) && redraws < MAX_PARENT_REDRAWS {
            p1 = ranked_a[self.parent_rng.random_range(0..ranked_a.len())];
            p2 = ranked_b[self.parent_rng.random_range(0..ranked_b.len())];
            redraws += 1;
        }
        (p1, p2)
    }

    /// Builds one child genome gene by gene.
    fn recombine(&mut self, genome_1: &Genome, genome_2: &Genome) -> Genome {
        let genes = genome_1
            .genes()
            .iter()
            .zip(genome_2.genes())
            .map(|(&g1, &g2)| {
                let mut value = if self.config.interpolate {
                    let mix = self.mixing.sample(&mut self.mix_rng);
                    g1 + mix * (g2 - g1)
                } else if self.mix_rng.random_bool(0.5) {
                    g1
                } else {
                    g2
                };
                // Mutation is checked after recombination so it can override
                // either parent's contribution.
                if self.gate_rng.random_range(0.0..1.0) < self.config.mutation_rate {
                    value = self.value_rng.random_range(0.0..1.0);
                }
                value
            })
            .collect();
        Genome::from_genes(genes)
    }
}
