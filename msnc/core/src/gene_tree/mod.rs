//! Gene trees: rooted binary trees describing the genealogy of the sampled
//! individuals at one locus, optionally augmented with degree-two nodes that
//! record which species-network node a lineage passed through.

use msnc_core_bond::NonNegativeF64;
use serde::{Deserialize, Serialize};

use crate::population::{NodeId, PopulationId};

mod builder;
mod error;
mod newick;

pub use builder::{GeneIdCounter, GeneTreeBuilder};
pub use error::GeneTreeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub enum GeneNodeKind {
    /// A sampled individual of the species `species`.
    Leaf { species: NodeId },
    /// A coalescence that happened inside `population`.
    Coalescence { population: PopulationId },
    /// A lineage crossing the species-network node `species` without
    /// coalescing.
    Mapping { species: NodeId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct GeneNode {
    id: u64,
    name: Option<String>,
    kind: GeneNodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl GeneNode {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> GeneNodeKind {
        self.kind
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, GeneNodeKind::Leaf { .. })
    }

    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(self.kind, GeneNodeKind::Mapping { .. })
    }

    /// The index of the edge to this node's parent, `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// The indices of the edges to this node's children.
    #[must_use]
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.children.len() + usize::from(self.parent.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct GeneEdge {
    id: u64,
    parent: usize,
    child: usize,
    length: NonNegativeF64,
    population: PopulationId,
}

impl GeneEdge {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The index of the upper node.
    #[must_use]
    pub fn parent(&self) -> usize {
        self.parent
    }

    /// The index of the lower node.
    #[must_use]
    pub fn child(&self) -> usize {
        self.child
    }

    #[must_use]
    pub fn length(&self) -> NonNegativeF64 {
        self.length
    }

    /// The species-network population in which the lower end of this edge
    /// lives.
    #[must_use]
    pub fn population(&self) -> PopulationId {
        self.population
    }
}

/// A completed gene tree. Nodes and edges are addressed by their index,
/// which is unrelated to their identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct GeneTree {
    nodes: Vec<GeneNode>,
    edges: Vec<GeneEdge>,
    root: usize,
}

impl GeneTree {
    #[must_use]
    pub fn nodes(&self) -> &[GeneNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[GeneEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node(&self, index: usize) -> &GeneNode {
        &self.nodes[index]
    }

    #[must_use]
    pub fn edge(&self, index: usize) -> &GeneEdge {
        &self.edges[index]
    }

    #[must_use]
    pub fn root(&self) -> &GeneNode {
        &self.nodes[self.root]
    }

    #[must_use]
    pub fn root_index(&self) -> usize {
        self.root
    }

    pub fn leaves(&self) -> impl Iterator<Item = &GeneNode> {
        self.nodes.iter().filter(|node| node.is_leaf())
    }

    #[must_use]
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    pub fn coalescences(&self) -> impl Iterator<Item = &GeneNode> {
        self.nodes
            .iter()
            .filter(|node| matches!(node.kind, GeneNodeKind::Coalescence { .. }))
    }

    /// The names of the leaves below `node`, sorted.
    #[must_use]
    pub fn leaf_names_below(&self, node: usize) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack = vec![node];

        while let Some(node) = stack.pop() {
            let node = &self.nodes[node];

            if node.is_leaf() {
                names.push(node.name().unwrap_or_default());
            }

            stack.extend(node.children.iter().map(|edge| self.edges[*edge].child));
        }

        names.sort_unstable();
        names
    }

    /// The distance from `node` up to the root.
    #[must_use]
    pub fn depth(&self, node: usize) -> NonNegativeF64 {
        let mut depth = NonNegativeF64::zero();
        let mut node = &self.nodes[node];

        while let Some(parent) = node.parent {
            let edge = &self.edges[parent];

            depth += edge.length;
            node = &self.nodes[edge.parent];
        }

        depth
    }

    /// Returns a copy with every edge length transformed by `length`.
    #[must_use]
    pub fn map_lengths<F: FnMut(&GeneEdge) -> NonNegativeF64>(&self, mut length: F) -> Self {
        let mut mapped = self.clone();

        for edge in &mut mapped.edges {
            edge.length = length(edge);
        }

        mapped
    }

    /// Returns a copy in which every degree-two mapping node has been
    /// spliced out. The two edges around a removed node are fused into one
    /// edge that keeps the identifier and population of the lower edge.
    #[must_use]
    pub fn without_mapping_nodes(&self) -> Self {
        let mut spliced = Self {
            nodes: Vec::with_capacity(self.nodes.len()),
            edges: Vec::with_capacity(self.edges.len()),
            root: 0,
        };

        // A mapping node at the root only has a single child
        let mut root = self.root;
        while self.nodes[root].is_mapping() && self.nodes[root].children.len() == 1 {
            root = self.edges[self.nodes[root].children[0]].child;
        }

        spliced.root = spliced.push_node_without_parent(&self.nodes[root]);

        let mut stack = vec![(root, spliced.root)];

        while let Some((old_parent, new_parent)) = stack.pop() {
            for edge in &self.nodes[old_parent].children {
                let mut edge = &self.edges[*edge];
                let mut length = edge.length;

                while self.nodes[edge.child].is_mapping()
                    && self.nodes[edge.child].children.len() == 1
                {
                    edge = &self.edges[self.nodes[edge.child].children[0]];
                    length += edge.length;
                }

                let new_child = spliced.push_node_without_parent(&self.nodes[edge.child]);
                let new_edge = spliced.edges.len();

                spliced.edges.push(GeneEdge {
                    id: edge.id,
                    parent: new_parent,
                    child: new_child,
                    length,
                    population: edge.population,
                });
                spliced.nodes[new_parent].children.push(new_edge);
                spliced.nodes[new_child].parent = Some(new_edge);

                stack.push((edge.child, new_child));
            }
        }

        spliced
    }

    fn push_node_without_parent(&mut self, node: &GeneNode) -> usize {
        self.nodes.push(GeneNode {
            id: node.id,
            name: node.name.clone(),
            kind: node.kind,
            parent: None,
            children: Vec::new(),
        });

        self.nodes.len() - 1
    }
}
