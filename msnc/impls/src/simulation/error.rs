use msnc_core::{
    gene_tree::GeneTreeError, individuals::IndividualCountError, network::NetworkError,
    population::{NodeId, PopulationId},
};

use crate::population_size::PopulationSizeError;

#[derive(Debug, thiserror::Error, displaydoc::Display, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum CoalescenceError {
    /// cannot coalesce {lineages} lineage(s) in the unbounded population {population}
    UnboundedPopulation {
        population: PopulationId,
        lineages: usize,
    },
}

#[derive(Debug, thiserror::Error, displaydoc::Display)]
#[allow(clippy::module_name_repetitions)]
pub enum SimulationError {
    /// {0}
    Network(#[from] NetworkError),
    /// {0}
    IndividualCount(#[from] IndividualCountError),
    /// {0}
    PopulationSize(#[from] PopulationSizeError),
    /// {0}
    Coalescence(#[from] CoalescenceError),
    /// {0}
    GeneTree(#[from] GeneTreeError),
    /// {lineages} lineage(s) remain at the root {root} of locus {locus}
    UnresolvedRoot {
        locus: u64,
        root: NodeId,
        lineages: usize,
    },
    /// cannot simulate {0} loci on this platform
    TooManyLoci(u64),
    /// failed to seed the simulation from entropy: {0}
    Entropy(getrandom::Error),
}
