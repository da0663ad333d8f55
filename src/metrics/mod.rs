//! Fitness measurement, history tracking, and cross-run aggregation.
//!
//! Every generation the world takes a [`FitnessData`] snapshot — mean fitness
//! and a percentile ladder for the whole population and for each assignment
//! category — and records it in a [`FitnessHistory`], which also tracks the
//! first iteration at which each subgroup's mean fitness crossed each
//! configured threshold. [`FitnessHistoryAggregate`] merges the histories of
//! independent runs into one statistical summary.
//!
//! All types here serialize with serde; the on-disk format is the
//! orchestrator's choice. Missing data (a subgroup that never crossed a
//! threshold, an iteration absent from some runs) is represented by the NaN
//! sentinel during aggregation, never by an error.

mod aggregate;
mod data;
mod history;

pub use aggregate::{AggregateType, FitnessHistoryAggregate};
pub use data::{FitnessData, SubgroupStats, PERCENTILE_STEPS};
pub use history::FitnessHistory;
