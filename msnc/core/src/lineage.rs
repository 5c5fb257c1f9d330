use msnc_core_bond::NonNegativeF64;

use crate::population::PopulationId;

/// An incomplete gene-tree edge: its lower (tip-ward) node is fixed, but its
/// ancestor has not yet been found.
///
/// A `Lineage` refers to a node inside the
/// [`GeneTreeBuilder`](crate::gene_tree::GeneTreeBuilder) that created it and
/// must only be passed back to that same builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineage {
    id: u64,
    child: usize,
    length: NonNegativeF64,
    population: PopulationId,
}

impl Lineage {
    #[must_use]
    pub(crate) fn new(id: u64, child: usize, population: PopulationId) -> Self {
        Self {
            id,
            child,
            length: NonNegativeF64::zero(),
            population,
        }
    }

    /// The identifier the completed gene-tree edge will carry.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub(crate) fn child(&self) -> usize {
        self.child
    }

    /// The time this lineage has survived without coalescing so far.
    #[must_use]
    pub fn length(&self) -> NonNegativeF64 {
        self.length
    }

    /// The population in which the lower node of this lineage lives.
    #[must_use]
    pub fn population(&self) -> PopulationId {
        self.population
    }

    #[debug_ensures(self.length >= old(self.length), "lineages only grow")]
    pub fn extend(&mut self, duration: NonNegativeF64) {
        self.length += duration;
    }
}

/// The set of lineages that are active within, or about to enter, a
/// population.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    lineages: Vec<Lineage>,
}

impl Forest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lineages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lineages.is_empty()
    }

    pub fn push(&mut self, lineage: Lineage) {
        self.lineages.push(lineage);
    }

    /// Moves all lineages of `other` into this forest, leaving `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        self.lineages.append(&mut other.lineages);
    }

    /// Extends every lineage in the forest by `duration`.
    pub fn extend_all(&mut self, duration: NonNegativeF64) {
        for lineage in &mut self.lineages {
            lineage.extend(duration);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lineage> {
        self.lineages.iter()
    }

    /// Removes the two lineages at indices `a != b` from the forest.
    #[debug_requires(a != b && a < self.len() && b < self.len(), "two distinct valid indices")]
    #[debug_ensures(self.len() + 2 == old(self.len()), "removes exactly two lineages")]
    pub fn take_pair(&mut self, a: usize, b: usize) -> (Lineage, Lineage) {
        let (low, high) = if a < b { (a, b) } else { (b, a) };

        // Remove the higher index first so that the lower one stays valid
        let high = self.lineages.swap_remove(high);
        let low = self.lineages.swap_remove(low);

        (low, high)
    }

    /// Removes and returns all lineages, leaving the forest empty.
    pub fn drain(&mut self) -> impl Iterator<Item = Lineage> + '_ {
        self.lineages.drain(..)
    }

    /// Returns the single remaining lineage, or `None` if the forest does not
    /// contain exactly one lineage.
    #[must_use]
    pub fn into_single(mut self) -> Option<Lineage> {
        if self.lineages.len() == 1 {
            self.lineages.pop()
        } else {
            None
        }
    }
}

impl FromIterator<Lineage> for Forest {
    fn from_iter<I: IntoIterator<Item = Lineage>>(iter: I) -> Self {
        Self {
            lineages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Forest {
    type IntoIter = std::vec::IntoIter<Lineage>;
    type Item = Lineage;

    fn into_iter(self) -> Self::IntoIter {
        self.lineages.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use msnc_core_bond::NonNegativeF64;

    use crate::population::PopulationId;

    use super::{Forest, Lineage};

    fn forest(n: u64) -> Forest {
        let population = PopulationId::try_new(1).unwrap();

        (0..n)
            .map(|i| Lineage::new(i, usize::try_from(i).unwrap(), population))
            .collect()
    }

    #[test]
    fn take_pair_removes_both_lineages() {
        for (a, b) in [(0, 4), (4, 0), (3, 4), (1, 2)] {
            let mut forest = forest(5);

            let (low, high) = forest.take_pair(a, b);

            assert_eq!(low.id(), u64::try_from(a.min(b)).unwrap());
            assert_eq!(high.id(), u64::try_from(a.max(b)).unwrap());
            assert_eq!(forest.len(), 3);
            assert!(forest.iter().all(|l| l.id() != low.id() && l.id() != high.id()));
        }
    }

    #[test]
    fn extend_all_grows_every_lineage() {
        let mut forest = forest(3);

        forest.extend_all(NonNegativeF64::new(0.25_f64).unwrap());
        forest.extend_all(NonNegativeF64::new(0.5_f64).unwrap());

        assert!(forest.iter().all(|l| l.length() == 0.75_f64));
    }

    #[test]
    fn append_moves_lineages() {
        let mut a = forest(2);
        let mut b = forest(3);

        a.append(&mut b);

        assert_eq!(a.len(), 5);
        assert!(b.is_empty());
        assert!(a.clone().into_single().is_none());
        assert!(forest(1).into_single().is_some());
    }
}
