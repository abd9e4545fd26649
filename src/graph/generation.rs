//! Exhaustive kinship graph generation.

use super::{KinshipGraph, NodeType, RelationType};

/// Create a graph of people where every person is connected to every other as
/// the parent in a parentship, the child in a parentship and a sibling in a
/// siblingship.
///
/// Persons take ids `0..num_people`. Parentship nodes follow, one per ordered
/// pair of distinct persons; siblingship nodes come last, one per unordered
/// pair. Pairs are enumerated lexicographically, so the same `num_people`
/// always yields the same ids and edges.
pub fn generate_graph(num_people: usize) -> KinshipGraph {
    let mut graph = KinshipGraph::new();

    for _ in 0..num_people {
        graph.add_node(NodeType::Person);
    }

    let permutations = (0..num_people)
        .flat_map(|a| (0..num_people).map(move |b| (a, b)))
        .filter(|(a, b)| a != b);
    for (a, b) in permutations {
        graph.add_relation(RelationType::Parentship, [a, b]);
    }

    let combinations = (0..num_people).flat_map(|a| (a + 1..num_people).map(move |b| (a, b)));
    for (a, b) in combinations {
        graph.add_relation(RelationType::Siblingship, [a, b]);
    }

    log::debug!(
        "Generated kinship graph: {} people, {} nodes, {} edges",
        num_people,
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Role;

    #[test]
    fn test_generate_node_counts() {
        for n in 0..7 {
            let g = generate_graph(n);
            assert_eq!(g.count_of_type(NodeType::Person), n);
            assert_eq!(g.count_of_type(NodeType::Parentship), n * n.saturating_sub(1));
            assert_eq!(g.count_of_type(NodeType::Siblingship), n * n.saturating_sub(1) / 2);
        }
    }

    #[test]
    fn test_relation_nodes_have_out_degree_two() {
        let g = generate_graph(5);
        for node in g.nodes() {
            let expected = if node.node_type.is_relation() { 2 } else { 0 };
            assert_eq!(g.out_degree(node.id), expected, "node {}", node.id);
        }
    }

    #[test]
    fn test_small_graphs_have_no_relations() {
        assert!(generate_graph(0).is_empty());
        let g = generate_graph(1);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_id_layout_for_three_people() {
        let g = generate_graph(3);
        // 3 persons, 6 parentships (ids 3..9), 3 siblingships (ids 9..12)
        assert_eq!(g.node_count(), 12);
        for id in 0..3 {
            assert_eq!(g.node(id).unwrap().node_type, NodeType::Person);
        }
        for id in 3..9 {
            assert_eq!(g.node(id).unwrap().node_type, NodeType::Parentship);
        }
        for id in 9..12 {
            assert_eq!(g.node(id).unwrap().node_type, NodeType::Siblingship);
        }

        // Permutation order: (0,1), (0,2), (1,0), (1,2), (2,0), (2,1)
        assert_eq!(g.edge(3, 0).unwrap().role, Role::Parent);
        assert_eq!(g.edge(3, 1).unwrap().role, Role::Child);
        assert_eq!(g.edge(5, 1).unwrap().role, Role::Parent);
        assert_eq!(g.edge(5, 0).unwrap().role, Role::Child);
        assert_eq!(g.edge(8, 2).unwrap().role, Role::Parent);
        assert_eq!(g.edge(8, 1).unwrap().role, Role::Child);

        // Combination order: (0,1), (0,2), (1,2)
        assert_eq!(g.successors(9), vec![0, 1]);
        assert_eq!(g.successors(10), vec![0, 2]);
        assert_eq!(g.successors(11), vec![1, 2]);
        // Parentship (1, 0): parent edge first
        assert_eq!(g.successors(5), vec![1, 0]);
        assert_eq!(g.edge(11, 2).unwrap().role, Role::Sibling);
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_graph(4), generate_graph(4));
    }

    #[test]
    fn test_generated_graph_passes_load_checks() {
        let g = generate_graph(4);
        let json = serde_json::to_string(&g).unwrap();
        let loaded: KinshipGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, g);
    }

    #[test]
    fn test_labels_start_unset() {
        let g = generate_graph(3);
        assert!(g.elements().all(|e| !e.labels().input && !e.labels().solution));
    }
}
