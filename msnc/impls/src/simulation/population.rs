use core::num::NonZeroUsize;

use msnc_core::{
    cogs::RngSampler,
    gene_tree::{GeneIdCounter, GeneTreeBuilder},
    lineage::Forest,
    population::PopulationId,
};
use msnc_core_bond::{NonNegativeF64, PositiveF64};

use super::CoalescenceError;

/// Runs the Kingman coalescent on `forest` inside `population` for
/// `duration` coalescent units and returns the number of coalescences.
///
/// Every surviving lineage is extended by the time it spent inside the
/// population. An infinite `duration` coalesces the forest down to a single
/// lineage, which is then left without any extension.
///
/// # Errors
///
/// Returns `CoalescenceError::UnboundedPopulation` if `duration` is
/// infinite but `forest` contains fewer than two lineages.
#[debug_ensures(
    ret.is_err() || forest.len() + ret.as_ref().map_or(0, |c| *c) == old(forest.len()),
    "every coalescence removes exactly one lineage"
)]
#[debug_ensures(
    ret.is_err() || !duration.is_infinite() || forest.len() == 1,
    "an unbounded population coalesces down to one lineage"
)]
pub fn coalesce_within_population<G: RngSampler>(
    forest: &mut Forest,
    duration: NonNegativeF64,
    population: PopulationId,
    builder: &mut GeneTreeBuilder,
    ids: &mut GeneIdCounter,
    rng: &mut G,
) -> Result<usize, CoalescenceError> {
    if duration.is_infinite() && forest.len() < 2 {
        return Err(CoalescenceError::UnboundedPopulation {
            population,
            lineages: forest.len(),
        });
    }

    if forest.is_empty() || duration.is_zero() {
        return Ok(0);
    }

    let mut remaining = duration;
    let mut coalescences = 0;

    while let Some(rate) = PositiveF64::pairwise_rate(forest.len()) {
        let waiting_time = rng.sample_exponential(rate);

        if waiting_time > remaining {
            forest.extend_all(remaining);

            return Ok(coalescences);
        }

        forest.extend_all(waiting_time);
        remaining = remaining.saturating_sub(waiting_time);

        let (a, b) = match NonZeroUsize::new(forest.len()) {
            Some(len) => rng.sample_index_pair(len),
            None => unreachable!("the pairwise rate requires at least two lineages"),
        };
        let (a, b) = forest.take_pair(a, b);

        log::trace!(
            "Lineages {} and {} coalesce in population {population} after {waiting_time}.",
            a.id(),
            b.id()
        );

        let ancestor = builder.merge_lineages(a, b, population, ids);
        forest.push(ancestor);

        coalescences += 1;
    }

    // A single lineage survives the rest of a bounded population
    if !remaining.is_infinite() {
        forest.extend_all(remaining);
    }

    Ok(coalescences)
}
