use fnv::FnvHashMap;

use msnc_core::{
    cogs::{InheritanceSampler, RngCore},
    gene_tree::{GeneIdCounter, GeneTree, GeneTreeBuilder},
    individuals::SampledIndividuals,
    lineage::Forest,
    network::{PopulationEdge, PopulationNode, SpeciesNetwork},
    population::PopulationId,
};
use msnc_core_bond::{NonNegativeF64, ZeroExclOneInclF64};

use super::{coalesce_within_population, SimulationError};

/// The state of simulating the gene tree of a single locus, walking the
/// species network from its tips to its root.
pub(super) struct LocusSimulation<'a, G: RngCore, I: InheritanceSampler<G>> {
    network: &'a SpeciesNetwork,
    individuals: &'a SampledIndividuals,
    node_mapping: bool,
    inheritance: &'a I,
    rng: G,
    builder: GeneTreeBuilder,
    ids: GeneIdCounter,
    exit_forests: FnvHashMap<PopulationId, Forest>,
}

impl<'a, G: RngCore, I: InheritanceSampler<G>> LocusSimulation<'a, G, I> {
    pub(super) fn new(
        network: &'a SpeciesNetwork,
        individuals: &'a SampledIndividuals,
        node_mapping: bool,
        inheritance: &'a I,
        rng: G,
    ) -> Self {
        Self {
            network,
            individuals,
            node_mapping,
            inheritance,
            rng,
            builder: GeneTreeBuilder::new(),
            ids: GeneIdCounter::new(),
            exit_forests: FnvHashMap::default(),
        }
    }

    pub(super) fn simulate(mut self, locus: u64) -> Result<GeneTree, SimulationError> {
        let network = self.network;

        for node in network.reverse_topological_order() {
            if network.is_leaf(node.id()) {
                self.sample_leaf(node)?;
                continue;
            }

            let mut forest = self.enter_node(node);

            // No sampled lineage passes through this node
            if forest.is_empty() {
                continue;
            }

            let parent_edges = network.parent_edges(node.id()).collect::<Vec<_>>();

            match parent_edges.as_slice() {
                [] => return self.finish_at_root(locus, node, forest),
                [edge] => {
                    self.map_forest(&mut forest, node, edge.id());
                    self.coalesce_along(&mut forest, edge)?;
                    self.exit_forests.insert(edge.id(), forest);
                },
                hybrid_edges => self.route_hybrid(node, forest, hybrid_edges)?,
            }
        }

        unreachable!("the reverse topological order ends at the root")
    }

    fn sample_leaf(&mut self, leaf: &PopulationNode) -> Result<(), SimulationError> {
        let network = self.network;

        for edge in network.parent_edges(leaf.id()) {
            let mut forest = self.builder.make_leaf_forest(
                leaf,
                self.individuals.get(leaf.id()),
                edge.id(),
                &mut self.ids,
            );

            self.coalesce_along(&mut forest, edge)?;
            self.exit_forests.insert(edge.id(), forest);
        }

        Ok(())
    }

    /// Collects the lineages that leave the child edges of `node`.
    fn enter_node(&mut self, node: &PopulationNode) -> Forest {
        let mut forest = Forest::new();

        for edge in self.network.child_edges(node.id()) {
            if let Some(mut exit) = self.exit_forests.remove(&edge.id()) {
                forest.append(&mut exit);
            }
        }

        forest
    }

    fn route_hybrid(
        &mut self,
        hybrid: &PopulationNode,
        mut forest: Forest,
        parent_edges: &[&PopulationEdge],
    ) -> Result<(), SimulationError> {
        let gammas = parent_edges
            .iter()
            .map(|edge| edge.gamma())
            .collect::<Vec<ZeroExclOneInclF64>>();

        let assignments =
            self.inheritance
                .sample_parent_edges(&gammas, forest.len(), &mut self.rng);

        let mut routed = vec![Forest::new(); parent_edges.len()];

        for (lineage, edge) in forest.drain().zip(assignments) {
            log::trace!(
                "Lineage {} crosses hybrid {} along edge {}.",
                lineage.id(),
                hybrid.id(),
                parent_edges[edge].id()
            );

            routed[edge].push(lineage);
        }

        for (edge, mut forest) in parent_edges.iter().zip(routed) {
            self.map_forest(&mut forest, hybrid, edge.id());
            self.coalesce_along(&mut forest, edge)?;
            self.exit_forests.insert(edge.id(), forest);
        }

        Ok(())
    }

    fn finish_at_root(
        mut self,
        locus: u64,
        root: &PopulationNode,
        mut forest: Forest,
    ) -> Result<GeneTree, SimulationError> {
        if forest.len() > 1 {
            let above_root = self.network.above_root_population();

            self.map_forest(&mut forest, root, above_root);

            coalesce_within_population(
                &mut forest,
                NonNegativeF64::infinity(),
                above_root,
                &mut self.builder,
                &mut self.ids,
                &mut self.rng,
            )?;
        }

        let lineages = forest.len();

        let root_lineage = forest
            .into_single()
            .ok_or(SimulationError::UnresolvedRoot {
                locus,
                root: root.id(),
                lineages,
            })?;

        self.builder.finalize(root_lineage).map_err(SimulationError::from)
    }

    /// Records that every lineage in `forest` crosses `node` into `population`,
    /// if node mapping was requested.
    fn map_forest(&mut self, forest: &mut Forest, node: &PopulationNode, population: PopulationId) {
        if !self.node_mapping {
            return;
        }

        let mapped = forest
            .drain()
            .map(|lineage| {
                self.builder
                    .insert_mapping_node(lineage, node, population, &mut self.ids)
            })
            .collect();

        *forest = mapped;
    }

    fn coalesce_along(
        &mut self,
        forest: &mut Forest,
        edge: &PopulationEdge,
    ) -> Result<(), SimulationError> {
        coalesce_within_population(
            forest,
            edge.length(),
            edge.id(),
            &mut self.builder,
            &mut self.ids,
            &mut self.rng,
        )?;

        Ok(())
    }
}
