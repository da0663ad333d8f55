//! Evolutionary simulation of populations competing for capacity-constrained
//! categorical assignments.
//!
//! Each generation, every individual in the population is bound to exactly one
//! assignment category, subject to per-category capacities. An individual's
//! fitness is its genome value at its assigned category, so different
//! assignment policies extract different amounts of fitness from the same
//! genomes. The simulation combines:
//!
//! - **Assignment**: three resolution strategies — uniform random, greedy by
//!   category priority, and optimal maximum-weight bipartite matching
//!   (Hungarian algorithm) over capacity slots.
//! - **Crossover**: fitness-ranked breeding pools, beta-interpolated or
//!   discrete per-gene recombination, and per-gene mutation.
//! - **World**: the assign → measure → breed generation loop.
//! - **Metrics**: per-iteration fitness snapshots, first-crossing
//!   time-to-fitness tracking, and cross-run statistical aggregation.
//!
//! # Key Types
//!
//! - [`population::Population`]: one generation's individuals, grouped, with
//!   per-category capacities and priorities
//! - [`assign::AssignmentEngine`]: resolves individual → category bindings
//! - [`crossover::CrossoverOperator`]: breeds the next generation's genomes
//! - [`world::World`]: steps generations and records a
//!   [`metrics::FitnessHistory`]
//! - [`metrics::FitnessHistoryAggregate`]: merges independent runs
//!
//! # Randomness
//!
//! Every stochastic decision draws from its own independently seeded stream
//! (see [`rng::Stream`]), so changing one policy's randomness never perturbs
//! another's draws. A run is fully reproducible from its component seeds.
//!
//! # Scope
//!
//! A single [`world::World`] run is strictly sequential. Multi-run studies,
//! result files, and plotting belong to external orchestrators; the core's
//! only output is a serializable [`metrics::FitnessHistory`] per run.

pub mod assign;
pub mod crossover;
pub mod metrics;
pub mod population;
pub mod rng;
pub mod world;
