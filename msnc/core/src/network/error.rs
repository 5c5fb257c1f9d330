use crate::population::{NodeId, PopulationId};

#[derive(Debug, thiserror::Error, displaydoc::Display, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum NetworkError {
    /// the species network has no nodes
    Empty,
    /// node {0} is defined more than once
    DuplicateNode(NodeId),
    /// edge {0} is defined more than once
    DuplicateEdge(PopulationId),
    /// edge {edge} references the unknown node {node}
    UnknownNode { edge: PopulationId, node: NodeId },
    /// the species network has no root, i.e. no node without a parent edge
    NoRoot,
    /// the species network has more than one root: nodes {0} and {1}
    MultipleRoots(NodeId, NodeId),
    /// the species network contains a cycle through node {0}
    Cycle(NodeId),
    /// leaf {0} must have exactly one parent edge
    LeafParents(NodeId),
    /// leaf {0} must be named after its species
    UnnamedLeaf(NodeId),
    /// the node name {0:?} is used more than once
    DuplicateName(String),
    /// edge {0} has an infinite length
    InfiniteLength(PopulationId),
    /// hybrid edge {0} is missing its inheritance probability
    MissingInheritance(PopulationId),
    /// the inheritance probabilities of the parent edges of hybrid node {node} sum to {sum}, not 1
    InheritanceSum { node: NodeId, sum: f64 },
    /// tree edge {edge} has an inheritance probability of {gamma}, not 1
    TreeEdgeInheritance { edge: PopulationId, gamma: f64 },
    /// the edge identifiers are exhausted, no identifier is left for the above-root population
    ExhaustedIdentifiers,
}
