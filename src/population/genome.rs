//! Fixed-length trait vectors.

use std::fmt;
use std::ops::Index;

use rand::Rng;

/// An individual's trait values, one per assignment category, each in `[0, 1)`.
///
/// Genomes are immutable once attached to an individual: crossover always
/// builds a fresh genome for each child rather than editing a parent's.
///
/// # Examples
///
/// ```
/// use evoassign::population::Genome;
///
/// let g = Genome::zeroed(4);
/// assert_eq!(g.len(), 4);
/// assert_eq!(g[2], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    genes: Vec<f64>,
}

impl Genome {
    /// Creates an all-zero genome of `genome_size` values.
    ///
    /// Used as a placeholder that crossover fills gene by gene.
    ///
    /// # Panics
    /// Panics if `genome_size` is 0.
    pub fn zeroed(genome_size: usize) -> Self {
        assert!(genome_size > 0, "genome_size must be positive");
        Self {
            genes: vec![0.0; genome_size],
        }
    }

    /// Creates a genome with independently uniform `[0, 1)` values.
    ///
    /// # Panics
    /// Panics if `genome_size` is 0.
    pub fn random<R: Rng>(genome_size: usize, rng: &mut R) -> Self {
        assert!(genome_size > 0, "genome_size must be positive");
        Self {
            genes: (0..genome_size).map(|_| rng.random_range(0.0..1.0)).collect(),
        }
    }

    /// Wraps an explicit gene vector, e.g. one produced by crossover.
    ///
    /// # Panics
    /// Panics if `genes` is empty.
    pub fn from_genes(genes: Vec<f64>) -> Self {
        assert!(!genes.is_empty(), "genome_size must be positive");
        Self { genes }
    }

    /// Number of genes (one per assignment category).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always `false`; zero-length genomes cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The gene values as a slice.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }
}

impl Index<usize> for Genome {
    type Output = f64;

    fn index(&self, category: usize) -> &f64 {
        &self.genes[category]
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, g) in self.genes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{g:.4}")?;
        }
        write!(f, "]")
    }
}
