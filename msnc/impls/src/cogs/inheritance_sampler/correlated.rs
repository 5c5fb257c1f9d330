use msnc_core::cogs::{InheritanceSampler, RngCore, RngSampler};
use msnc_core_bond::{NonNegativeF64, ZeroExclOneInclF64};

/// Correlates the parent edges of the lineages that enter a hybrid node
/// through a Pólya urn with concentration `alpha = (1 - r) / r`.
///
/// The first lineage picks parent edge `i` with probability `gamma_i`. After
/// `n` lineages have been assigned, of which `n_i` took edge `i`, the next
/// lineage picks edge `i` with probability
/// `(alpha * gamma_i + n_i) / (alpha + n)`, i.e. it follows an earlier
/// lineage with probability `n / (alpha + n)`. Two lineages then share their
/// parent edge with probability `r + (1 - r) * sum_i gamma_i^2`.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Copy)]
pub struct CorrelatedInheritanceSampler {
    concentration: NonNegativeF64,
}

impl CorrelatedInheritanceSampler {
    #[must_use]
    pub fn new(concentration: NonNegativeF64) -> Self {
        Self { concentration }
    }
}

impl<G: RngCore> InheritanceSampler<G> for CorrelatedInheritanceSampler {
    #[debug_requires(!gammas.is_empty(), "a hybrid node has parent edges")]
    #[debug_ensures(ret.len() == num_lineages, "one parent edge per lineage")]
    fn sample_parent_edges(
        &self,
        gammas: &[ZeroExclOneInclF64],
        num_lineages: usize,
        rng: &mut G,
    ) -> Vec<usize> {
        let mut weights = gammas.iter().map(|gamma| gamma.get()).collect::<Vec<_>>();

        let mut assignments = Vec::with_capacity(num_lineages);

        if num_lineages == 0 {
            return assignments;
        }

        let first = rng.sample_categorical(&weights);
        assignments.push(first);

        // alpha * gamma_i + n_i, with the normalisation left to the sampler
        for weight in &mut weights {
            *weight *= self.concentration.get();
        }
        weights[first] += 1.0_f64;

        for _ in 1..num_lineages {
            let edge = rng.sample_categorical(&weights);

            weights[edge] += 1.0_f64;
            assignments.push(edge);
        }

        assignments
    }
}

#[cfg(test)]
mod tests {
    use msnc_core::cogs::{InheritanceSampler, SeedableRng};
    use msnc_core_bond::{NonNegativeF64, ZeroExclOneInclF64};

    use crate::cogs::rng::wyhash::WyHash;

    use super::CorrelatedInheritanceSampler;

    fn gammas(gamma: f64) -> [ZeroExclOneInclF64; 2] {
        [
            ZeroExclOneInclF64::new(gamma).unwrap(),
            ZeroExclOneInclF64::new(1.0_f64 - gamma).unwrap(),
        ]
    }

    #[test]
    fn full_correlation_follows_the_first_lineage() {
        let sampler = CorrelatedInheritanceSampler::new(NonNegativeF64::zero());
        let mut rng = WyHash::seed_from_u64(11);

        let mut first_edge = [0_u32; 2];

        for _ in 0..1000 {
            let edges = sampler.sample_parent_edges(&gammas(0.5_f64), 5, &mut rng);

            assert_eq!(edges.len(), 5);
            assert!(edges.iter().all(|edge| *edge == edges[0]));

            first_edge[edges[0]] += 1;
        }

        assert!(first_edge[0] > 400 && first_edge[1] > 400);
    }

    #[test]
    fn pairs_share_an_edge_at_the_correlated_rate() {
        let (gamma, r) = (0.3_f64, 0.5_f64);

        let sampler = CorrelatedInheritanceSampler::new(NonNegativeF64::new((1.0 - r) / r).unwrap());
        let mut rng = WyHash::seed_from_u64(12);

        let n = 50_000;
        let shared = (0..n)
            .filter(|_| {
                let edges = sampler.sample_parent_edges(&gammas(gamma), 2, &mut rng);
                edges[0] == edges[1]
            })
            .count();

        #[allow(clippy::cast_precision_loss)]
        let fraction = shared as f64 / f64::from(n);
        let expected = 1.0 - 2.0 * gamma * (1.0 - gamma) * (1.0 - r);

        assert!((fraction - expected).abs() < 0.01, "{fraction} != {expected}");
    }

    #[test]
    fn no_lineages_no_assignments() {
        let sampler = CorrelatedInheritanceSampler::new(NonNegativeF64::zero());
        let mut rng = WyHash::seed_from_u64(13);

        assert!(sampler.sample_parent_edges(&gammas(0.5_f64), 0, &mut rng).is_empty());
    }
}
