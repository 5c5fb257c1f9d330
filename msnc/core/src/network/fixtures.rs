//! Small species networks shared by the tests of the simulation crates.

#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use msnc_core_bond::{NonNegativeF64, ZeroExclOneInclF64};

use crate::population::{NodeId, PopulationId};

use super::{PopulationEdge, PopulationNode, SpeciesNetwork};

pub fn edge(id: u32, parent: u32, child: u32, length: f64, gamma: Option<f64>) -> PopulationEdge {
    PopulationEdge::new(
        PopulationId::try_new(id).unwrap(),
        NodeId::new(parent),
        NodeId::new(child),
        NonNegativeF64::new(length).unwrap(),
        gamma.map(|gamma| ZeroExclOneInclF64::new(gamma).unwrap()),
    )
}

/// `(A:length,B:length)` with the unnamed root 3.
pub fn two_species_network(length: f64) -> SpeciesNetwork {
    SpeciesNetwork::try_new(
        vec![
            PopulationNode::named(1, "A"),
            PopulationNode::named(2, "B"),
            PopulationNode::unnamed(3),
        ],
        vec![edge(1, 3, 1, length, None), edge(2, 3, 2, length, None)],
    )
    .unwrap()
}

/// Species A below the hybrid H, whose two parent edges both descend from
/// the root R. The edge from H to A has length zero, so all lineages of A
/// reach H.
pub fn two_cycle_network(gamma: f64) -> SpeciesNetwork {
    SpeciesNetwork::try_new(
        vec![
            PopulationNode::named(1, "A"),
            PopulationNode::named(2, "H"),
            PopulationNode::named(3, "R"),
        ],
        vec![
            edge(1, 2, 1, 0.0, None),
            edge(2, 3, 2, 1.0, Some(gamma)),
            edge(3, 3, 2, 1.0, Some(1.0 - gamma)),
        ],
    )
    .unwrap()
}
