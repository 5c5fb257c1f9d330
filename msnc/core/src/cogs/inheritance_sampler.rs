use msnc_core_bond::ZeroExclOneInclF64;

use crate::cogs::RngCore;

/// Routes the lineages that arrive at a hybrid node to its parent edges.
#[allow(clippy::module_name_repetitions)]
pub trait InheritanceSampler<G: RngCore>: core::fmt::Debug {
    /// Assigns each of `num_lineages` lineages to one parent edge, given the
    /// inheritance probabilities `gammas` of the parent edges, which sum to
    /// one. Returns the index into `gammas` chosen for each lineage.
    #[must_use]
    fn sample_parent_edges(
        &self,
        gammas: &[ZeroExclOneInclF64],
        num_lineages: usize,
        rng: &mut G,
    ) -> Vec<usize>;
}
