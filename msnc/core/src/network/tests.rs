use msnc_core_bond::NonNegativeF64;

use crate::population::{NodeId, PopulationId};

use super::{
    fixtures::{edge, two_cycle_network, two_species_network},
    NetworkError, PopulationNode, SpeciesNetwork,
};

#[test]
fn orders_tips_before_parents() {
    let network = two_cycle_network(0.6_f64);

    let order = network
        .reverse_topological_order()
        .map(PopulationNode::id)
        .collect::<Vec<_>>();

    assert_eq!(order, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);

    assert_eq!(network.root().id(), NodeId::new(3));
    assert!(network.is_hybrid(NodeId::new(2)));
    assert!(!network.is_hybrid(NodeId::new(1)));
    assert!(network.is_leaf(NodeId::new(1)));
    assert_eq!(network.parent_edges(NodeId::new(2)).count(), 2);
    assert_eq!(network.child_edges(NodeId::new(3)).count(), 2);
    assert_eq!(network.above_root_population().get(), 4);
}

#[test]
fn every_child_precedes_its_parent() {
    // ((A,(B)#H1),(#H1,C)) with unnamed internal nodes
    let network = SpeciesNetwork::try_new(
        vec![
            PopulationNode::unnamed(10),
            PopulationNode::unnamed(8),
            PopulationNode::unnamed(9),
            PopulationNode::unnamed(7),
            PopulationNode::named(1, "A"),
            PopulationNode::named(2, "B"),
            PopulationNode::named(3, "C"),
        ],
        vec![
            edge(1, 8, 1, 1.0, None),
            edge(2, 7, 2, 1.0, None),
            edge(3, 9, 3, 1.0, None),
            edge(4, 8, 7, 0.5, Some(0.3)),
            edge(5, 9, 7, 0.5, Some(0.7)),
            edge(6, 10, 8, 1.0, None),
            edge(7, 10, 9, 1.0, None),
        ],
    )
    .unwrap();

    let order = network
        .reverse_topological_order()
        .map(PopulationNode::id)
        .collect::<Vec<_>>();
    assert_eq!(order.len(), 7);

    for edge in network.edges() {
        let child = order.iter().position(|id| *id == edge.child()).unwrap();
        let parent = order.iter().position(|id| *id == edge.parent()).unwrap();

        assert!(child < parent, "{:?} must precede its parent", edge.child());
    }

    assert_eq!(order.last(), Some(&NodeId::new(10)));
}

#[test]
fn labelled_copy_names_internal_nodes() {
    let network = two_species_network(1.0_f64);
    let labelled = network.labelled();

    assert_eq!(network.root().name(), None);
    assert_eq!(labelled.root().name(), Some("I3"));
    assert_eq!(labelled.node(NodeId::new(1)).unwrap().name(), Some("A"));

    let clashing = SpeciesNetwork::try_new(
        vec![PopulationNode::named(1, "I2"), PopulationNode::unnamed(2)],
        vec![edge(1, 2, 1, 1.0, None)],
    )
    .unwrap()
    .labelled();

    assert_eq!(clashing.root().name(), Some("I2_"));
}

#[test]
fn rejects_malformed_networks() {
    assert_eq!(
        SpeciesNetwork::try_new(Vec::new(), Vec::new()).unwrap_err(),
        NetworkError::Empty
    );

    assert_eq!(
        SpeciesNetwork::try_new(
            vec![PopulationNode::named(1, "A"), PopulationNode::unnamed(2)],
            vec![edge(1, 2, 1, 1.0, None), edge(1, 2, 1, 1.0, None)],
        )
        .unwrap_err(),
        NetworkError::DuplicateEdge(PopulationId::try_new(1).unwrap())
    );

    assert_eq!(
        SpeciesNetwork::try_new(
            vec![PopulationNode::named(1, "A"), PopulationNode::unnamed(2)],
            vec![edge(1, 3, 1, 1.0, None)],
        )
        .unwrap_err(),
        NetworkError::UnknownNode {
            edge: PopulationId::try_new(1).unwrap(),
            node: NodeId::new(3),
        }
    );

    assert_eq!(
        SpeciesNetwork::try_new(
            vec![PopulationNode::named(1, "A"), PopulationNode::unnamed(2)],
            vec![edge(1, 2, 1, 1.0, None), edge(2, 1, 2, 1.0, None)],
        )
        .unwrap_err(),
        NetworkError::NoRoot
    );

    assert_eq!(
        SpeciesNetwork::try_new(
            vec![PopulationNode::unnamed(1), PopulationNode::unnamed(2)],
            vec![edge(1, 2, 1, 1.0, None)],
        )
        .unwrap_err(),
        NetworkError::UnnamedLeaf(NodeId::new(1))
    );

    assert_eq!(
        SpeciesNetwork::try_new(vec![PopulationNode::named(1, "A")], Vec::new()).unwrap_err(),
        NetworkError::LeafParents(NodeId::new(1))
    );
}

#[test]
fn rejects_a_cycle_below_the_root() {
    // 1 -> 2 -> 3 -> 2 with 4 as the root above 2
    assert!(matches!(
        SpeciesNetwork::try_new(
            vec![
                PopulationNode::named(1, "A"),
                PopulationNode::unnamed(2),
                PopulationNode::unnamed(3),
                PopulationNode::unnamed(4),
            ],
            vec![
                edge(1, 2, 1, 1.0, None),
                edge(2, 3, 2, 1.0, Some(0.5)),
                edge(3, 2, 3, 1.0, None),
                edge(4, 4, 2, 1.0, Some(0.5)),
            ],
        ),
        Err(NetworkError::Cycle(_))
    ));
}

#[test]
fn validates_inheritance_probabilities() {
    let nodes = || {
        vec![
            PopulationNode::named(1, "A"),
            PopulationNode::named(2, "H"),
            PopulationNode::named(3, "R"),
        ]
    };

    assert_eq!(
        SpeciesNetwork::try_new(
            nodes(),
            vec![
                edge(1, 2, 1, 0.5, None),
                edge(2, 3, 2, 1.0, Some(0.6)),
                edge(3, 3, 2, 1.0, None),
            ],
        )
        .unwrap_err(),
        NetworkError::MissingInheritance(PopulationId::try_new(3).unwrap())
    );

    assert!(matches!(
        SpeciesNetwork::try_new(
            nodes(),
            vec![
                edge(1, 2, 1, 0.5, None),
                edge(2, 3, 2, 1.0, Some(0.6)),
                edge(3, 3, 2, 1.0, Some(0.6)),
            ],
        ),
        Err(NetworkError::InheritanceSum { .. })
    ));

    assert!(matches!(
        SpeciesNetwork::try_new(
            vec![PopulationNode::named(1, "A"), PopulationNode::unnamed(2)],
            vec![edge(1, 2, 1, 1.0, Some(0.5))],
        ),
        Err(NetworkError::TreeEdgeInheritance { .. })
    ));
}

#[test]
fn rescales_edge_lengths() {
    let network = two_species_network(2.0_f64);

    let scaled = network
        .map_lengths(|edge| NonNegativeF64::new(edge.length().get() * 0.5_f64).unwrap())
        .unwrap();

    for edge in scaled.edges() {
        assert_eq!(edge.length(), 1.0_f64);
    }
    for edge in network.edges() {
        assert_eq!(edge.length(), 2.0_f64);
    }
}
