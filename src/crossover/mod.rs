//! Breeding: selection, recombination, and mutation.
//!
//! Given two (possibly identical) pools of individuals, the crossover
//! operator produces a requested number of children. Parents are drawn
//! uniformly from fitness-ranked breeding sub-pools; each child gene is
//! either a beta-interpolated blend of the parents' genes or a verbatim copy
//! from one parent, and may then be overridden by mutation.
//!
//! # Key Types
//!
//! - [`CrossoverConfig`]: operator parameters (β, mutation rate, mixing mode,
//!   breeding-pool policy)
//! - [`CrossoverOperator`]: the seeded operator instance
//! - [`BreedingPool`]: how the breeding sub-pool is sized

mod config;
mod operator;

pub use config::{BreedingPool, CrossoverConfig};
pub use operator::CrossoverOperator;
