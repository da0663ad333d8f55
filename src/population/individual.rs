//! A genome plus its current category binding.

use std::fmt;

use rand::Rng;

use super::Genome;

/// One member of the population.
///
/// An individual owns exactly one [`Genome`] and carries its assignment for
/// the current generation (`None` = unassigned). Individuals are born
/// unassigned; the assignment pass sets the binding exactly once per
/// generation.
///
/// Fitness is derived, never stored: an unassigned individual has fitness
/// 0.0, an assigned one has fitness `genome[assignment]`.
#[derive(Debug, Clone)]
pub struct Individual {
    genome: Genome,
    assignment: Option<usize>,
}

impl Individual {
    /// Wraps a genome into an unassigned individual.
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            assignment: None,
        }
    }

    /// Creates an unassigned individual with a randomized genome.
    pub fn random<R: Rng>(genome_size: usize, rng: &mut R) -> Self {
        Self::new(Genome::random(genome_size, rng))
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    /// Number of genes, i.e. the number of assignment categories.
    pub fn genome_size(&self) -> usize {
        self.genome.len()
    }

    /// The category this individual is bound to, if any.
    pub fn assignment(&self) -> Option<usize> {
        self.assignment
    }

    pub fn has_assignment(&self) -> bool {
        self.assignment.is_some()
    }

    /// Binds this individual to `category`.
    ///
    /// # Panics
    /// Panics if `category` is out of range for the genome.
    pub fn assign(&mut self, category: usize) {
        assert!(category < self.genome.len(), "category out of range");
        self.assignment = Some(category);
    }

    /// Resets the binding to unassigned.
    pub fn clear_assignment(&mut self) {
        self.assignment = None;
    }

    /// Fitness under the current binding: `genome[assignment]`, or 0.0 when
    /// unassigned.
    pub fn fitness(&self) -> f64 {
        match self.assignment {
            Some(category) => self.genome[category],
            None => 0.0,
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.assignment {
            Some(a) => write!(f, "assignment: {a}\tgenes: {}", self.genome),
            None => write!(f, "assignment: -\tgenes: {}", self.genome),
        }
    }
}
