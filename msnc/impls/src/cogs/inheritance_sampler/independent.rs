use msnc_core::cogs::{InheritanceSampler, RngCore, RngSampler};
use msnc_core_bond::ZeroExclOneInclF64;

/// Sends every lineage along parent edge `i` with probability `gamma_i`,
/// independently of all other lineages.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy, Default)]
pub struct IndependentInheritanceSampler;

impl<G: RngCore> InheritanceSampler<G> for IndependentInheritanceSampler {
    #[debug_requires(!gammas.is_empty(), "a hybrid node has parent edges")]
    #[debug_ensures(ret.len() == num_lineages, "one parent edge per lineage")]
    fn sample_parent_edges(
        &self,
        gammas: &[ZeroExclOneInclF64],
        num_lineages: usize,
        rng: &mut G,
    ) -> Vec<usize> {
        let weights = gammas.iter().map(|gamma| gamma.get()).collect::<Vec<_>>();

        (0..num_lineages)
            .map(|_| rng.sample_categorical(&weights))
            .collect()
    }
}
