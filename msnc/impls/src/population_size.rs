//! Simulation in generations instead of coalescent units.
//!
//! A population of effective size `Ne` that persists for `t` generations
//! corresponds to `t / Ne` coalescent units. The species network is rescaled
//! into coalescent units, simulated with node mapping so that every gene
//! edge lies within a single population, and the gene-tree edges are then
//! scaled back by the size of the population they lie in.

use std::collections::BTreeMap;

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use msnc_core::{
    cogs::SplittableRng, gene_tree::GeneTree, network::SpeciesNetwork, population::PopulationId,
};
use msnc_core_bond::{NonNegativeF64, PositiveF64};

use crate::simulation::{simulate_coalescent, SimulationArguments, SimulationError};

/// The effective size of every population, including the one above the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub enum PopulationSize {
    Uniform(PositiveF64),
    PerPopulation(BTreeMap<PopulationId, PositiveF64>),
}

#[derive(Debug, thiserror::Error, displaydoc::Display, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum PopulationSizeError {
    /// population size must be a number or a complete per-population mapping: population {0} is missing
    MissingPopulation(PopulationId),
    /// population size must be a number or a complete per-population mapping: {0} is not a population
    UnknownPopulation(PopulationId),
}

/// The effective size of every population of one species network.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ResolvedPopulationSizes {
    sizes: FnvHashMap<PopulationId, PositiveF64>,
}

impl PopulationSize {
    /// # Errors
    ///
    /// Returns `MissingPopulation` if a per-population mapping does not
    /// cover every edge and the above-root population, or
    /// `UnknownPopulation` if it names any other population.
    pub fn resolve(
        &self,
        network: &SpeciesNetwork,
    ) -> Result<ResolvedPopulationSizes, PopulationSizeError> {
        let populations = network
            .edges()
            .iter()
            .map(|edge| edge.id())
            .chain(std::iter::once(network.above_root_population()));

        let sizes: FnvHashMap<PopulationId, PositiveF64> = match self {
            Self::Uniform(size) => populations.map(|population| (population, *size)).collect(),
            Self::PerPopulation(per_population) => {
                let sizes = populations
                    .map(|population| {
                        per_population
                            .get(&population)
                            .map(|size| (population, *size))
                            .ok_or(PopulationSizeError::MissingPopulation(population))
                    })
                    .collect::<Result<FnvHashMap<_, _>, _>>()?;

                if let Some(unknown) = per_population
                    .keys()
                    .find(|population| !sizes.contains_key(*population))
                {
                    return Err(PopulationSizeError::UnknownPopulation(*unknown));
                }

                sizes
            },
        };

        Ok(ResolvedPopulationSizes { sizes })
    }
}

impl ResolvedPopulationSizes {
    #[must_use]
    pub fn get(&self, population: PopulationId) -> Option<PositiveF64> {
        self.sizes.get(&population).copied()
    }

    fn size(&self, population: PopulationId) -> PositiveF64 {
        self.get(population).unwrap_or_else(PositiveF64::one)
    }
}

/// Like [`simulate_coalescent`], but reads the edge lengths of `network` in
/// generations and returns gene trees whose branch lengths are in
/// generations, too.
///
/// With `round_generations`, every gene-tree branch length is rounded to a
/// whole number of generations.
///
/// # Errors
///
/// Returns a `SimulationError` if `population_size` does not fit the
/// network, or under the same conditions as [`simulate_coalescent`].
pub fn simulate_coalescent_in_generations<G: SplittableRng + Sync>(
    network: &SpeciesNetwork,
    loci: u64,
    population_size: &PopulationSize,
    round_generations: bool,
    args: &SimulationArguments,
    rng: &G,
) -> Result<Vec<GeneTree>, SimulationError> {
    let sizes = population_size.resolve(network)?;

    let scaled = network.map_lengths(|edge| edge.length() / sizes.size(edge.id()))?;

    let mapped_args = SimulationArguments {
        node_mapping: true,
        ..args.clone()
    };

    let trees = simulate_coalescent(&scaled, loci, &mapped_args, rng)?;

    Ok(trees
        .into_iter()
        .map(|tree| {
            let tree = tree.map_lengths(|edge| {
                let generations = edge.length() * sizes.size(edge.population());

                if round_generations {
                    round(generations)
                } else {
                    generations
                }
            });

            if args.node_mapping {
                tree
            } else {
                tree.without_mapping_nodes()
            }
        })
        .collect())
}

fn round(generations: NonNegativeF64) -> NonNegativeF64 {
    NonNegativeF64::new(generations.get().round()).unwrap_or(generations)
}
