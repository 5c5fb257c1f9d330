use msnc_core::cogs::{InheritanceSampler, RngCore};
use msnc_core_bond::ZeroExclOneInclF64;

use crate::correlation::InheritanceCorrelation;

pub mod correlated;
pub mod independent;

use correlated::CorrelatedInheritanceSampler;
use independent::IndependentInheritanceSampler;

/// Runtime choice between the inheritance samplers, selected by the
/// inheritance correlation of a simulation.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub enum AnyInheritanceSampler {
    Independent(IndependentInheritanceSampler),
    Correlated(CorrelatedInheritanceSampler),
}

impl From<InheritanceCorrelation> for AnyInheritanceSampler {
    fn from(correlation: InheritanceCorrelation) -> Self {
        match correlation.concentration() {
            None => Self::Independent(IndependentInheritanceSampler),
            Some(concentration) => {
                Self::Correlated(CorrelatedInheritanceSampler::new(concentration))
            },
        }
    }
}

impl<G: RngCore> InheritanceSampler<G> for AnyInheritanceSampler {
    fn sample_parent_edges(
        &self,
        gammas: &[ZeroExclOneInclF64],
        num_lineages: usize,
        rng: &mut G,
    ) -> Vec<usize> {
        match self {
            Self::Independent(sampler) => sampler.sample_parent_edges(gammas, num_lineages, rng),
            Self::Correlated(sampler) => sampler.sample_parent_edges(gammas, num_lineages, rng),
        }
    }
}
