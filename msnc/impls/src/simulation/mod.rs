//! The multispecies network coalescent: gene trees for independent loci,
//! simulated inside a species network from its tips to its root.

use msnc_core::{
    cogs::SplittableRng,
    gene_tree::GeneTree,
    individuals::IndividualCount,
    network::SpeciesNetwork,
};
use serde::{Deserialize, Serialize};

use crate::{
    cogs::{inheritance_sampler::AnyInheritanceSampler, rng::wyhash::WyHash},
    correlation::InheritanceCorrelation,
    parallelism::Parallelism,
};

mod error;
mod locus;
mod population;

pub use error::{CoalescenceError, SimulationError};
pub use population::coalesce_within_population;

use locus::LocusSimulation;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct SimulationArguments {
    /// The number of individuals sampled from every species
    #[serde(default)]
    pub individuals: IndividualCount,
    /// Whether gene lineages record every species-network node they cross
    #[serde(default)]
    pub node_mapping: bool,
    /// The correlation of lineages inheriting through the same hybrid node
    #[serde(default)]
    pub correlation: InheritanceCorrelation,
    #[serde(default)]
    pub parallelism: Parallelism,
}

/// Simulates one gene tree for each of `loci` independent loci inside
/// `network`, with branch lengths in coalescent units.
///
/// Locus `i` draws its randomness from `rng.split_to_stream(i)`, so the
/// result does not depend on the chosen [`Parallelism`].
///
/// # Errors
///
/// Returns a `SimulationError` if the individual count does not fit the
/// network, or if the simulation breaks one of the gene-tree invariants.
pub fn simulate_coalescent<G: SplittableRng + Sync>(
    network: &SpeciesNetwork,
    loci: u64,
    args: &SimulationArguments,
    rng: &G,
) -> Result<Vec<GeneTree>, SimulationError> {
    let network = network.labelled();
    let individuals = args.individuals.resolve(&network)?;

    if usize::try_from(loci).is_err() {
        return Err(SimulationError::TooManyLoci(loci));
    }

    let inheritance = AnyInheritanceSampler::from(args.correlation);

    log::info!(
        "Simulating {} loci for {} individuals of {} species with {} hybrid node(s) ...",
        loci,
        individuals.total(),
        network.leaves().count(),
        network
            .nodes()
            .iter()
            .filter(|node| network.is_hybrid(node.id()))
            .count(),
    );
    log::debug!(
        "Inheritance correlation: {}, node mapping: {}, parallelism: {:?}",
        args.correlation,
        args.node_mapping,
        args.parallelism,
    );

    let trees = args.parallelism.simulate_loci(loci, |locus| {
        let tree = LocusSimulation::new(
            &network,
            &individuals,
            args.node_mapping,
            &inheritance,
            rng.split_to_stream(locus),
        )
        .simulate(locus)?;

        log::debug!(
            "Simulated locus {locus} with {} coalescence(s).",
            tree.coalescences().count()
        );

        Ok::<_, SimulationError>(tree)
    })?;

    log::info!("Simulated {} gene tree(s).", trees.len());

    Ok(trees)
}

/// Like [`simulate_coalescent`], but draws a fresh seed from the operating
/// system.
///
/// # Errors
///
/// Returns a `SimulationError` under the same conditions as
/// [`simulate_coalescent`], or if no entropy is available.
pub fn simulate_coalescent_with_entropy(
    network: &SpeciesNetwork,
    loci: u64,
    args: &SimulationArguments,
) -> Result<Vec<GeneTree>, SimulationError> {
    let rng = WyHash::from_entropy().map_err(SimulationError::Entropy)?;

    log::info!("Seeded the simulation with {}.", rng.seed());

    simulate_coalescent(network, loci, args, &rng)
}
