use fnv::FnvHashSet;

use crate::{
    lineage::{Forest, Lineage},
    network::PopulationNode,
    population::PopulationId,
};

use super::{GeneEdge, GeneNode, GeneNodeKind, GeneTree, GeneTreeError};

/// Hands out fresh gene-tree identifiers for one locus. A new node and the
/// edge above it share the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneIdCounter(u64);

impl Default for GeneIdCounter {
    fn default() -> Self {
        Self(1)
    }
}

impl GeneIdCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    #[debug_ensures(self.0 == old(self.0) + 1, "consumes exactly one identifier")]
    pub fn next_id(&mut self) -> u64 {
        let id = self.0;
        self.0 += 1;
        id
    }

    /// The identifier that will be handed out next.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.0
    }
}

/// Arena in which the gene tree of one locus is assembled from the bottom up.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct GeneTreeBuilder {
    nodes: Vec<GeneNode>,
    edges: Vec<GeneEdge>,
}

impl GeneTreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a leaf for one sampled individual of `species`, whose lineage
    /// starts in `population`.
    pub fn make_leaf_lineage(
        &mut self,
        species: &PopulationNode,
        label: String,
        population: PopulationId,
        ids: &mut GeneIdCounter,
    ) -> Lineage {
        let id = ids.next_id();

        let leaf = self.push_node(
            id,
            Some(label),
            GeneNodeKind::Leaf {
                species: species.id(),
            },
        );

        Lineage::new(id, leaf, population)
    }

    /// Creates the leaves for `individuals` sampled individuals of `species`.
    ///
    /// A single individual is labelled with the species name, several are
    /// labelled `species_1` to `species_n`.
    #[debug_ensures(ret.len() == old(individuals) as usize, "one lineage per individual")]
    pub fn make_leaf_forest(
        &mut self,
        species: &PopulationNode,
        individuals: u32,
        population: PopulationId,
        ids: &mut GeneIdCounter,
    ) -> Forest {
        let name = species_label(species);

        if individuals == 1 {
            return std::iter::once(self.make_leaf_lineage(species, name, population, ids))
                .collect();
        }

        (1..=individuals)
            .map(|i| self.make_leaf_lineage(species, format!("{name}_{i}"), population, ids))
            .collect()
    }

    /// Coalesces the lineages `a` and `b` into a new ancestral lineage that
    /// starts at a new coalescence node inside `population`.
    #[debug_ensures(ret.length() == 0.0_f64, "the ancestral lineage starts fresh")]
    pub fn merge_lineages(
        &mut self,
        a: Lineage,
        b: Lineage,
        population: PopulationId,
        ids: &mut GeneIdCounter,
    ) -> Lineage {
        let id = ids.next_id();

        let ancestor = self.push_node(id, None, GeneNodeKind::Coalescence { population });

        self.complete(a, ancestor);
        self.complete(b, ancestor);

        Lineage::new(id, ancestor, population)
    }

    /// Ends `lineage` at a new degree-two node recording that it crossed the
    /// species-network node `species`, and continues it into `population`.
    pub fn insert_mapping_node(
        &mut self,
        lineage: Lineage,
        species: &PopulationNode,
        population: PopulationId,
        ids: &mut GeneIdCounter,
    ) -> Lineage {
        let id = ids.next_id();

        let mapping = self.push_node(
            id,
            Some(species_label(species)),
            GeneNodeKind::Mapping {
                species: species.id(),
            },
        );

        self.complete(lineage, mapping);

        Lineage::new(id, mapping, population)
    }

    /// Detaches the incomplete edge above `root` and collects the gene tree
    /// that hangs below it.
    ///
    /// # Errors
    ///
    /// Returns a `GeneTreeError` if node or edge identifiers collide, or if
    /// a node's degree disagrees with its kind.
    pub fn finalize(self, root: Lineage) -> Result<GeneTree, GeneTreeError> {
        let mut tree = GeneTree {
            nodes: Vec::with_capacity(self.nodes.len()),
            edges: Vec::with_capacity(self.edges.len()),
            root: 0,
        };

        let mut node_ids = FnvHashSet::default();
        let mut edge_ids = FnvHashSet::default();

        let mut stack = vec![(root.child(), None)];

        while let Some((old_node, parent_edge)) = stack.pop() {
            let node = &self.nodes[old_node];

            if !node_ids.insert(node.id) {
                return Err(GeneTreeError::DuplicateNode(node.id));
            }

            let new_node = tree.push_node_without_parent(node);
            tree.nodes[new_node].parent = parent_edge;

            if let Some(parent_edge) = parent_edge {
                tree.edges[parent_edge].child = new_node;
            }

            for edge in &node.children {
                let edge = &self.edges[*edge];

                if !edge_ids.insert(edge.id) {
                    return Err(GeneTreeError::DuplicateEdge(edge.id));
                }

                let new_edge = tree.edges.len();

                tree.edges.push(GeneEdge {
                    parent: new_node,
                    ..edge.clone()
                });
                tree.nodes[new_node].children.push(new_edge);

                stack.push((edge.child, Some(new_edge)));
            }
        }

        for (i, node) in tree.nodes.iter().enumerate() {
            check_degree(node, i == tree.root)?;
        }

        Ok(tree)
    }

    fn push_node(&mut self, id: u64, name: Option<String>, kind: GeneNodeKind) -> usize {
        self.nodes.push(GeneNode {
            id,
            name,
            kind,
            parent: None,
            children: Vec::new(),
        });

        self.nodes.len() - 1
    }

    fn complete(&mut self, lineage: Lineage, parent: usize) {
        let edge = self.edges.len();

        self.edges.push(GeneEdge {
            id: lineage.id(),
            parent,
            child: lineage.child(),
            length: lineage.length(),
            population: lineage.population(),
        });

        self.nodes[parent].children.push(edge);
        self.nodes[lineage.child()].parent = Some(edge);
    }
}

fn species_label(species: &PopulationNode) -> String {
    species
        .name()
        .map_or_else(|| format!("I{}", species.id()), ToOwned::to_owned)
}

fn check_degree(node: &GeneNode, is_root: bool) -> Result<(), GeneTreeError> {
    let degree = node.degree();

    let (valid, kind) = match node.kind {
        GeneNodeKind::Leaf { .. } if is_root => (degree == 0, "root leaf"),
        GeneNodeKind::Leaf { .. } => (degree == 1, "leaf"),
        _ if is_root => ((1..=2).contains(&degree), "root"),
        GeneNodeKind::Coalescence { .. } => (degree == 3, "coalescence"),
        GeneNodeKind::Mapping { .. } => (degree == 2, "mapping node"),
    };

    if valid {
        Ok(())
    } else {
        Err(GeneTreeError::Degree {
            id: node.id,
            degree,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::population::PopulationId;

    use super::{check_degree, GeneNode, GeneNodeKind, GeneTreeError};

    fn coalescence(parent: Option<usize>, children: Vec<usize>) -> GeneNode {
        GeneNode {
            id: 7,
            name: None,
            kind: GeneNodeKind::Coalescence {
                population: PopulationId::try_new(1).unwrap(),
            },
            parent,
            children,
        }
    }

    #[test]
    fn coalescence_needs_two_children_and_a_parent() {
        assert_eq!(check_degree(&coalescence(Some(0), vec![1, 2]), false), Ok(()));
        assert_eq!(check_degree(&coalescence(None, vec![1, 2]), true), Ok(()));

        assert_eq!(
            check_degree(&coalescence(Some(0), vec![1]), false),
            Err(GeneTreeError::Degree {
                id: 7,
                degree: 2,
                kind: "coalescence",
            })
        );
        assert_eq!(
            check_degree(&coalescence(None, vec![1, 2, 3]), true),
            Err(GeneTreeError::Degree {
                id: 7,
                degree: 3,
                kind: "root",
            })
        );
    }
}
