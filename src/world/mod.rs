//! The generation-stepping orchestrator.
//!
//! A [`World`] owns one simulation run: it binds the current population's
//! individuals to categories, snapshots fitness into a
//! [`FitnessHistory`](crate::metrics::FitnessHistory), breeds the next
//! population, and repeats for a fixed number of generations. There is no
//! convergence-based early exit.
//!
//! # Key Types
//!
//! - [`WorldConfig`]: run length, crossover restriction, thresholds, seed
//! - [`World`]: the run itself; [`World::evolve`] consumes it
//! - [`RunResult`]: the recorded history plus wall-clock timing

mod config;
mod runner;

pub use config::WorldConfig;
pub use runner::{RunResult, World, WorldState};
