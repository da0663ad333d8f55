//! Constrained assignment of individuals to categories.
//!
//! Given a population snapshot, the assignment subsystem binds every
//! individual to exactly one category, subject to per-category capacities.
//! Three mutually exclusive strategies are available:
//!
//! - [`AssignmentStrategy::Random`]: uniform shuffle, then sequential fill in
//!   priority order. The baseline policy.
//! - [`AssignmentStrategy::Greedy`]: per category in priority order, take the
//!   still-unassigned individuals with the highest gene value for that
//!   category. A sequential approximation — later categories only see what
//!   earlier ones left behind.
//! - [`AssignmentStrategy::Optimal`]: maximum-weight bipartite matching
//!   (Hungarian algorithm) over capacity slots. Maximizes total assigned
//!   fitness for the snapshot; never worse than greedy.
//!
//! The [`AssignmentEngine`] also computes each generation's capacity and
//! priority distribution, optionally randomized, and can physically regroup
//! individuals by their resolved category so that crossover restricted to
//! groups becomes crossover restricted to assignments.

mod distribution;
mod engine;
pub mod matching;
mod strategy;

pub use distribution::assignment_distribution;
pub use engine::{AssignmentConfig, AssignmentEngine};
pub use strategy::AssignmentStrategy;
