//! The species network: a rooted, acyclic graph of populations that may
//! contain hybridisation events.
//!
//! The network is validated once on construction and is read-only afterwards,
//! so it can be shared by all loci that are simulated on it.

use fnv::{FnvHashMap, FnvHashSet};
use msnc_core_bond::NonNegativeF64;
use serde::{Deserialize, Serialize};

use crate::population::{NodeId, PopulationId};

mod edge;
mod error;
mod node;
mod order;

pub use edge::PopulationEdge;
pub use error::NetworkError;
pub use node::PopulationNode;

/// Tolerance when checking that the inheritance probabilities of a hybrid
/// node sum to one.
const INHERITANCE_SUM_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SpeciesNetworkRaw", into = "SpeciesNetworkRaw")]
#[allow(clippy::module_name_repetitions)]
pub struct SpeciesNetwork {
    nodes: Vec<PopulationNode>,
    edges: Vec<PopulationEdge>,
    node_indices: FnvHashMap<NodeId, usize>,
    parent_edges: Vec<Vec<usize>>,
    child_edges: Vec<Vec<usize>>,
    root: usize,
    reverse_topological_order: Vec<usize>,
    above_root: PopulationId,
}

impl SpeciesNetwork {
    /// # Errors
    ///
    /// Returns a `NetworkError` if the nodes and edges do not describe a
    /// valid rooted species network.
    #[allow(clippy::too_many_lines)]
    pub fn try_new(
        nodes: Vec<PopulationNode>,
        edges: Vec<PopulationEdge>,
    ) -> Result<Self, NetworkError> {
        if nodes.is_empty() {
            return Err(NetworkError::Empty);
        }

        let mut node_indices = FnvHashMap::default();

        for (i, node) in nodes.iter().enumerate() {
            if node_indices.insert(node.id(), i).is_some() {
                return Err(NetworkError::DuplicateNode(node.id()));
            }
        }

        let mut edge_ids = FnvHashSet::default();
        let mut parent_edges = vec![Vec::new(); nodes.len()];
        let mut child_edges = vec![Vec::new(); nodes.len()];

        for (i, edge) in edges.iter().enumerate() {
            if !edge_ids.insert(edge.id()) {
                return Err(NetworkError::DuplicateEdge(edge.id()));
            }

            if edge.length().is_infinite() {
                return Err(NetworkError::InfiniteLength(edge.id()));
            }

            let lookup = |node: NodeId| {
                node_indices
                    .get(&node)
                    .copied()
                    .ok_or(NetworkError::UnknownNode {
                        edge: edge.id(),
                        node,
                    })
            };

            parent_edges[lookup(edge.child())?].push(i);
            child_edges[lookup(edge.parent())?].push(i);
        }

        let mut roots = parent_edges
            .iter()
            .enumerate()
            .filter_map(|(i, parents)| parents.is_empty().then_some(i));

        let root = roots.next().ok_or(NetworkError::NoRoot)?;

        if let Some(other) = roots.next() {
            return Err(NetworkError::MultipleRoots(nodes[root].id(), nodes[other].id()));
        }

        let mut names = FnvHashSet::default();

        for (i, node) in nodes.iter().enumerate() {
            if let Some(name) = node.name() {
                if !names.insert(name) {
                    return Err(NetworkError::DuplicateName(name.to_owned()));
                }
            }

            if child_edges[i].is_empty() {
                if parent_edges[i].len() != 1 {
                    return Err(NetworkError::LeafParents(node.id()));
                }

                if node.name().is_none() {
                    return Err(NetworkError::UnnamedLeaf(node.id()));
                }
            }

            match parent_edges[i].as_slice() {
                [] => (),
                [tree_edge] => {
                    let edge = &edges[*tree_edge];

                    #[allow(clippy::float_cmp)]
                    if edge.gamma() != 1.0_f64 {
                        return Err(NetworkError::TreeEdgeInheritance {
                            edge: edge.id(),
                            gamma: edge.gamma().get(),
                        });
                    }
                },
                hybrid_edges => {
                    let mut sum = 0.0_f64;

                    for edge in hybrid_edges.iter().map(|e| &edges[*e]) {
                        if !edge.has_gamma() {
                            return Err(NetworkError::MissingInheritance(edge.id()));
                        }

                        sum += edge.gamma().get();
                    }

                    if (sum - 1.0_f64).abs() > INHERITANCE_SUM_TOLERANCE {
                        return Err(NetworkError::InheritanceSum {
                            node: node.id(),
                            sum,
                        });
                    }
                },
            }
        }

        let ids = nodes.iter().map(PopulationNode::id).collect::<Vec<_>>();
        let num_children = child_edges.iter().map(Vec::len).collect::<Vec<_>>();
        let parent_nodes = parent_edges
            .iter()
            .map(|parents| {
                parents
                    .iter()
                    .map(|e| node_indices[&edges[*e].parent()])
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let reverse_topological_order =
            order::reverse_topological_order(&ids, &num_children, &parent_nodes)?;

        let above_root = match edges.iter().map(PopulationEdge::id).max() {
            Some(max) => max.successor().ok_or(NetworkError::ExhaustedIdentifiers)?,
            None => PopulationId::try_new(1).ok_or(NetworkError::ExhaustedIdentifiers)?,
        };

        Ok(Self {
            nodes,
            edges,
            node_indices,
            parent_edges,
            child_edges,
            root,
            reverse_topological_order,
            above_root,
        })
    }

    #[must_use]
    pub fn nodes(&self) -> &[PopulationNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[PopulationEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&PopulationNode> {
        self.node_indices.get(&id).map(|i| &self.nodes[*i])
    }

    #[must_use]
    pub fn edge(&self, id: PopulationId) -> Option<&PopulationEdge> {
        self.edges.iter().find(|edge| edge.id() == id)
    }

    #[must_use]
    pub fn root(&self) -> &PopulationNode {
        &self.nodes[self.root]
    }

    /// The reserved identifier of the unbounded population above the root,
    /// one greater than the largest edge identifier.
    #[must_use]
    pub fn above_root_population(&self) -> PopulationId {
        self.above_root
    }

    pub fn parent_edges(&self, id: NodeId) -> impl Iterator<Item = &PopulationEdge> {
        self.incident_edges(&self.parent_edges, id)
    }

    pub fn child_edges(&self, id: NodeId) -> impl Iterator<Item = &PopulationEdge> {
        self.incident_edges(&self.child_edges, id)
    }

    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.child_edges(id).next().is_none()
    }

    #[must_use]
    pub fn is_hybrid(&self, id: NodeId) -> bool {
        self.parent_edges(id).nth(1).is_some()
    }

    /// The present-day species, in node definition order.
    pub fn leaves(&self) -> impl Iterator<Item = &PopulationNode> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| self.child_edges[*i].is_empty())
            .map(|(_, node)| node)
    }

    /// Iterates over all nodes such that every node is visited after all of
    /// its children, i.e. tips first and the root last.
    pub fn reverse_topological_order(&self) -> impl Iterator<Item = &PopulationNode> {
        self.reverse_topological_order
            .iter()
            .map(|i| &self.nodes[*i])
    }

    /// Returns a copy of the network in which every unnamed node has been
    /// given a unique name derived from its identifier.
    #[must_use]
    pub fn labelled(&self) -> Self {
        let mut labelled = self.clone();

        let mut names = self
            .nodes
            .iter()
            .filter_map(|node| node.name().map(str::to_owned))
            .collect::<FnvHashSet<_>>();

        for node in &mut labelled.nodes {
            if node.name().is_some() {
                continue;
            }

            let mut name = format!("I{}", node.id());

            while names.contains(&name) {
                name.push('_');
            }

            log::debug!("Labelled the unnamed node {} as {name:?}.", node.id());

            names.insert(name.clone());
            node.set_name(name);
        }

        labelled
    }

    /// Returns a copy of the network with every edge length transformed by
    /// `length`.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if a transformed edge length is infinite.
    pub fn map_lengths<F: FnMut(&PopulationEdge) -> NonNegativeF64>(
        &self,
        mut length: F,
    ) -> Result<Self, NetworkError> {
        let mut mapped = self.clone();

        for edge in &mut mapped.edges {
            let new_length = length(edge);

            if new_length.is_infinite() {
                return Err(NetworkError::InfiniteLength(edge.id()));
            }

            *edge = edge.with_length(new_length);
        }

        Ok(mapped)
    }

    fn incident_edges<'a>(
        &'a self,
        incident: &'a [Vec<usize>],
        id: NodeId,
    ) -> impl Iterator<Item = &'a PopulationEdge> {
        self.node_indices
            .get(&id)
            .into_iter()
            .flat_map(move |i| incident[*i].iter().map(move |e| &self.edges[*e]))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "SpeciesNetwork")]
#[serde(deny_unknown_fields)]
struct SpeciesNetworkRaw {
    nodes: Vec<PopulationNode>,
    edges: Vec<PopulationEdge>,
}

impl TryFrom<SpeciesNetworkRaw> for SpeciesNetwork {
    type Error = NetworkError;

    fn try_from(raw: SpeciesNetworkRaw) -> Result<Self, Self::Error> {
        Self::try_new(raw.nodes, raw.edges)
    }
}

impl From<SpeciesNetwork> for SpeciesNetworkRaw {
    fn from(network: SpeciesNetwork) -> Self {
        Self {
            nodes: network.nodes,
            edges: network.edges,
        }
    }
}

#[cfg(any(test, feature = "test-fixtures"))]
#[doc(hidden)]
pub mod fixtures;

#[cfg(test)]
mod tests;
