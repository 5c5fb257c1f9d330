use std::collections::BTreeMap;

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use crate::{network::SpeciesNetwork, population::NodeId};

/// How many individuals are sampled from each present-day species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndividualCount {
    Uniform(u32),
    PerSpecies(BTreeMap<String, u32>),
}

impl Default for IndividualCount {
    fn default() -> Self {
        Self::Uniform(1)
    }
}

#[derive(Debug, thiserror::Error, displaydoc::Display, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum IndividualCountError {
    /// individual count must be an integer or complete per-species mapping: species {0:?} is missing
    MissingSpecies(String),
    /// individual count must be an integer or complete per-species mapping: {0:?} is not a species
    UnknownSpecies(String),
    /// at least one individual must be sampled
    NoIndividuals,
}

/// The fully resolved number of individuals sampled per species leaf.
#[derive(Debug, Clone)]
pub struct SampledIndividuals {
    counts: FnvHashMap<NodeId, u32>,
}

impl IndividualCount {
    /// Resolves the individual counts against the leaves of `network`.
    ///
    /// # Errors
    ///
    /// Returns `MissingSpecies` if a per-species mapping does not cover
    /// every leaf, `UnknownSpecies` if it names a species that is not a leaf
    /// of the network, and `NoIndividuals` if no individual would be sampled.
    pub fn resolve(
        &self,
        network: &SpeciesNetwork,
    ) -> Result<SampledIndividuals, IndividualCountError> {
        let mut counts = FnvHashMap::default();

        match self {
            Self::Uniform(count) => {
                for leaf in network.leaves() {
                    counts.insert(leaf.id(), *count);
                }
            },
            Self::PerSpecies(per_species) => {
                for leaf in network.leaves() {
                    let species = leaf.name().unwrap_or_default();

                    let count = per_species
                        .get(species)
                        .ok_or_else(|| IndividualCountError::MissingSpecies(species.to_owned()))?;

                    counts.insert(leaf.id(), *count);
                }

                if let Some(unknown) = per_species.keys().find(|species| {
                    !network
                        .leaves()
                        .any(|leaf| leaf.name() == Some(species.as_str()))
                }) {
                    return Err(IndividualCountError::UnknownSpecies(unknown.clone()));
                }
            },
        }

        let sampled = SampledIndividuals { counts };

        if sampled.total() == 0 {
            return Err(IndividualCountError::NoIndividuals);
        }

        Ok(sampled)
    }
}

impl SampledIndividuals {
    #[must_use]
    pub fn get(&self, leaf: NodeId) -> u32 {
        self.counts.get(&leaf).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().map(|count| u64::from(*count)).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::network::fixtures::two_species_network;

    use super::{IndividualCount, IndividualCountError};

    #[test]
    fn uniform_count_covers_every_leaf() {
        let network = two_species_network(1.0_f64);

        let sampled = IndividualCount::Uniform(3).resolve(&network).unwrap();

        for leaf in network.leaves() {
            assert_eq!(sampled.get(leaf.id()), 3);
        }
        assert_eq!(sampled.total(), 6);
    }

    #[test]
    fn per_species_mapping_must_be_complete() {
        let network = two_species_network(1.0_f64);

        let mut per_species = BTreeMap::new();
        per_species.insert(String::from("A"), 2);

        assert_eq!(
            IndividualCount::PerSpecies(per_species.clone())
                .resolve(&network)
                .unwrap_err(),
            IndividualCountError::MissingSpecies(String::from("B"))
        );

        per_species.insert(String::from("B"), 0);
        let sampled = IndividualCount::PerSpecies(per_species.clone())
            .resolve(&network)
            .unwrap();
        assert_eq!(sampled.total(), 2);

        per_species.insert(String::from("C"), 1);
        assert_eq!(
            IndividualCount::PerSpecies(per_species)
                .resolve(&network)
                .unwrap_err(),
            IndividualCountError::UnknownSpecies(String::from("C"))
        );
    }

    #[test]
    fn sampling_nobody_is_rejected() {
        let network = two_species_network(1.0_f64);

        assert_eq!(
            IndividualCount::Uniform(0).resolve(&network).unwrap_err(),
            IndividualCountError::NoIndividuals
        );
    }
}
