//! Truth labeling: base labels, relation lookup and relation labels.

use std::collections::HashSet;

use super::{KinshipGraph, Label, NodeId, NodeType, RelationType, Role};
use crate::error::{KgsynthError, Result};

/// Add base truth labels indicating whether elements are known to exist.
///
/// Persons are always known and get `1` for every label; relation nodes and
/// all edges get `0`. Re-running resets the named labels to this state.
pub fn add_base_labels(graph: &mut KinshipGraph, labels: &[Label]) {
    let person_flags: Vec<bool> = graph
        .nodes()
        .map(|node| node.node_type == NodeType::Person)
        .collect();

    for (id, is_person) in person_flags.into_iter().enumerate() {
        if let Some(node_labels) = graph.node_labels_mut(id) {
            for &label in labels {
                node_labels.set(label, is_person);
            }
        }
    }

    let edge_keys: Vec<(NodeId, NodeId)> =
        graph.edges().map(|edge| (edge.source, edge.target)).collect();
    for (source, target) in edge_keys {
        if let Some(edge_labels) = graph.edge_labels_mut(source, target) {
            for &label in labels {
                edge_labels.set(label, false);
            }
        }
    }
}

/// Find the relation node of `relation_type` whose edge to `roleplayers[0]`
/// has role `roles[0]` and whose edge to `roleplayers[1]` has role `roles[1]`.
///
/// Returns `None` when no such node exists, including for identical
/// role-players and ids outside the graph.
pub fn find_relation_node(
    graph: &KinshipGraph,
    relation_type: RelationType,
    roles: [Role; 2],
    roleplayers: [NodeId; 2],
) -> Option<NodeId> {
    let [first, second] = roleplayers;
    if first == second {
        return None;
    }

    let second_preds: HashSet<NodeId> = graph.predecessors(second).into_iter().collect();
    let candidates = graph.predecessors(first);

    let relation = candidates
        .into_iter()
        .filter(|candidate| second_preds.contains(candidate))
        .find(|&candidate| {
            let type_matches = graph
                .node(candidate)
                .map_or(false, |node| node.node_type == relation_type.node_type());
            type_matches
                && graph.edge(candidate, first).map(|e| e.role) == Some(roles[0])
                && graph.edge(candidate, second).map(|e| e.role) == Some(roles[1])
        });
    relation
}

/// Set `labels` to 1 on the matching relation node and both of its role edges.
///
/// Returns the labeled relation node, or `RelationNotFound` without writing
/// anything if no relation matches.
pub fn add_relation_label(
    graph: &mut KinshipGraph,
    relation_type: RelationType,
    roles: [Role; 2],
    roleplayers: [NodeId; 2],
    labels: &[Label],
) -> Result<NodeId> {
    let relation = find_relation_node(graph, relation_type, roles, roleplayers).ok_or(
        KgsynthError::RelationNotFound {
            relation_type,
            roles,
            roleplayers,
        },
    )?;

    for &label in labels {
        if let Some(node_labels) = graph.node_labels_mut(relation) {
            node_labels.set(label, true);
        }
        for roleplayer in roleplayers {
            if let Some(edge_labels) = graph.edge_labels_mut(relation, roleplayer) {
                edge_labels.set(label, true);
            }
        }
    }

    log::debug!(
        "Labeled {} node {} ({:?} -> {:?}) with {:?}",
        relation_type,
        relation,
        roles,
        roleplayers,
        labels
    );

    Ok(relation)
}

/// Label the parentship in which `parent` is the parent of `child`.
pub fn add_parentship(
    graph: &mut KinshipGraph,
    parent: NodeId,
    child: NodeId,
    labels: &[Label],
) -> Result<NodeId> {
    let relation_type = RelationType::Parentship;
    add_relation_label(graph, relation_type, relation_type.roles(), [parent, child], labels)
}

/// Label the siblingship between two persons.
pub fn add_siblingship(
    graph: &mut KinshipGraph,
    sibling_1: NodeId,
    sibling_2: NodeId,
    labels: &[Label],
) -> Result<NodeId> {
    let relation_type = RelationType::Siblingship;
    add_relation_label(graph, relation_type, relation_type.roles(), [sibling_1, sibling_2], labels)
}
