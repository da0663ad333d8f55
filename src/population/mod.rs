//! Population data model: genomes, individuals, groups, and the
//! per-generation [`Population`] value.
//!
//! A [`Population`] is an immutable snapshot of one generation. The only
//! mutation it ever sees is the assignment pass writing each individual's
//! `assignment` field; breeding always constructs a brand-new `Population`
//! from the previous one, so fitness snapshots recorded in a history never
//! alias live data.

mod genome;
mod group;
mod individual;
#[allow(clippy::module_inception)]
mod population;

pub use genome::Genome;
pub use group::Group;
pub use individual::Individual;
pub use population::Population;
