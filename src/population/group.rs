//! Ordered collections of individuals within a population.

use std::fmt;

use rand::Rng;

use super::Individual;

/// One group of individuals.
///
/// Groups exist to scope crossover ("restrict crossover to groups") and, when
/// grouping by assignment is enabled, to mirror the category partition. They
/// are rebuilt at every generation boundary, never mutated across one.
///
/// `group_size` is the *declared* size. It normally equals the member count;
/// the regroup-by-assignment pass declares the category capacity instead, so
/// an under-filled category shows up as a group with fewer members than its
/// declared size.
#[derive(Debug, Clone)]
pub struct Group {
    group_size: usize,
    genome_size: usize,
    assignment: Option<usize>,
    individuals: Vec<Individual>,
}

impl Group {
    /// Creates a group from explicit members with a declared size.
    pub fn new(group_size: usize, genome_size: usize, individuals: Vec<Individual>) -> Self {
        debug_assert!(individuals.iter().all(|i| i.genome_size() == genome_size));
        Self {
            group_size,
            genome_size,
            assignment: None,
            individuals,
        }
    }

    /// Creates a group of `group_size` individuals with randomized genomes.
    pub fn random<R: Rng>(group_size: usize, genome_size: usize, rng: &mut R) -> Self {
        let individuals = (0..group_size)
            .map(|_| Individual::random(genome_size, rng))
            .collect();
        Self::new(group_size, genome_size, individuals)
    }

    /// Declared size of the group.
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn genome_size(&self) -> usize {
        self.genome_size
    }

    /// Actual member count.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The category this whole group is tied to, when grouping by assignment.
    pub fn assignment(&self) -> Option<usize> {
        self.assignment
    }

    pub(crate) fn set_assignment(&mut self, category: Option<usize>) {
        self.assignment = category;
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub(crate) fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    pub(crate) fn replace_individuals(&mut self, individuals: Vec<Individual>) {
        self.individuals = individuals;
    }

    pub(crate) fn take_individuals(&mut self) -> Vec<Individual> {
        std::mem::take(&mut self.individuals)
    }

    pub(crate) fn set_group_size(&mut self, group_size: usize) {
        self.group_size = group_size;
    }

    /// Members that hold an assignment, in group order.
    pub fn assigned(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().filter(|i| i.has_assignment())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.assignment {
            Some(a) => writeln!(f, "GROUP (assignment: {a}, size: {})", self.group_size)?,
            None => writeln!(f, "GROUP (size: {})", self.group_size)?,
        }
        for ind in &self.individuals {
            writeln!(f, "  {ind}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::Genome;
    use crate::rng::{stream_rng, Stream};

    #[test]
    fn test_random_group() {
        let mut rng = stream_rng(5, Stream::GenomeInit);
        let g = Group::random(4, 3, &mut rng);
        assert_eq!(g.group_size(), 4);
        assert_eq!(g.len(), 4);
        assert!(g.individuals().iter().all(|i| !i.has_assignment()));
    }

    #[test]
    fn test_assigned_filter() {
        let mut rng = stream_rng(5, Stream::GenomeInit);
        let mut g = Group::random(4, 3, &mut rng);
        g.individuals_mut()[1].assign(0);
        g.individuals_mut()[3].assign(2);
        assert_eq!(g.assigned().count(), 2);
    }

    #[test]
    fn test_declared_size_can_differ_from_len() {
        let members = vec![Individual::new(Genome::zeroed(2))];
        let g = Group::new(3, 2, members);
        assert_eq!(g.group_size(), 3);
        assert_eq!(g.len(), 1);
    }
}
