//! Directed kinship graph backed by petgraph.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{EdgeData, Labels, NodeData, NodeId, NodeType, RelationType, Role};
use crate::error::{KgsynthError, Result};

/// A directed graph of persons and relation nodes.
///
/// Node ids are consecutive from zero. At most one edge exists per ordered
/// `(source, target)` pair, always from a relation node to a person. The node
/// and edge sets are fixed once built; only the truth labels are mutable from
/// outside the crate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "SerializedGraph")]
pub struct KinshipGraph {
    graph: DiGraph<NodeData, EdgeData>,
}

/// A node or an edge, for iterating over every labeled element of a graph.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Node(&'a NodeData),
    Edge(&'a EdgeData),
}

impl<'a> Element<'a> {
    pub fn labels(&self) -> &'a Labels {
        match *self {
            Element::Node(node) => &node.labels,
            Element::Edge(edge) => &edge.labels,
        }
    }
}

impl KinshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(&self, id: NodeId) -> Option<NodeIndex> {
        (id < self.graph.node_count()).then(|| NodeIndex::new(id))
    }

    /// Append a node of the given type and return its id.
    pub(crate) fn add_node(&mut self, node_type: NodeType) -> NodeId {
        let id = self.graph.node_count();
        self.graph
            .add_node(NodeData {
                id,
                node_type,
                labels: Labels::default(),
            })
            .index()
    }

    /// Append a relation node with its two role edges.
    ///
    /// Role-players must already be in the graph.
    pub(crate) fn add_relation(
        &mut self,
        relation_type: RelationType,
        roleplayers: [NodeId; 2],
    ) -> NodeId {
        let relation = self.add_node(relation_type.node_type());
        for (target, role) in roleplayers.into_iter().zip(relation_type.roles()) {
            self.graph.add_edge(
                NodeIndex::new(relation),
                NodeIndex::new(target),
                EdgeData {
                    source: relation,
                    target,
                    role,
                    labels: Labels::default(),
                },
            );
        }
        relation
    }

    /// Add a role edge between two existing nodes; a pair can only be added once.
    fn add_edge(&mut self, source: NodeId, target: NodeId, role: Role) -> Result<()> {
        let (Some(from), Some(to)) = (self.index(source), self.index(target)) else {
            return Err(KgsynthError::InvalidInput(format!(
                "edge {} -> {} references a node outside the graph ({} nodes)",
                source,
                target,
                self.graph.node_count()
            )));
        };

        if self.graph.find_edge(from, to).is_some() {
            return Err(KgsynthError::InvalidInput(format!(
                "duplicate edge {} -> {}",
                source, target
            )));
        }

        self.graph.add_edge(
            from,
            to,
            EdgeData {
                source,
                target,
                role,
                labels: Labels::default(),
            },
        );
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.graph.node_weight(self.index(id)?)
    }

    pub fn edge(&self, source: NodeId, target: NodeId) -> Option<&EdgeData> {
        let edge = self.graph.find_edge(self.index(source)?, self.index(target)?)?;
        self.graph.edge_weight(edge)
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.graph.edge_weights()
    }

    /// Every node, then every edge.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        self.nodes()
            .map(Element::Node)
            .chain(self.edges().map(Element::Edge))
    }

    pub fn node_labels_mut(&mut self, id: NodeId) -> Option<&mut Labels> {
        let index = self.index(id)?;
        self.graph.node_weight_mut(index).map(|node| &mut node.labels)
    }

    pub fn edge_labels_mut(&mut self, source: NodeId, target: NodeId) -> Option<&mut Labels> {
        let edge = self.graph.find_edge(self.index(source)?, self.index(target)?)?;
        self.graph.edge_weight_mut(edge).map(|edge| &mut edge.labels)
    }

    /// Neighbours of `id` in `direction`, in edge insertion order.
    fn neighbors(&self, id: NodeId, direction: Direction) -> Vec<NodeId> {
        let Some(index) = self.index(id) else {
            return Vec::new();
        };
        let mut edges: Vec<(usize, NodeId)> = self
            .graph
            .edges_directed(index, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (edge.id().index(), other.index())
            })
            .collect();
        edges.sort_unstable();
        edges.into_iter().map(|(_, other)| other).collect()
    }

    /// Sources of edges pointing at `id`. Empty for unknown ids.
    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Targets of edges leaving `id`. Empty for unknown ids.
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbors(id, Direction::Outgoing)
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.index(id).map_or(0, |index| {
            self.graph.edges_directed(index, Direction::Outgoing).count()
        })
    }

    /// Number of nodes of the given type.
    pub fn count_of_type(&self, node_type: NodeType) -> usize {
        self.nodes()
            .filter(|node| node.node_type == node_type)
            .count()
    }

    /// Check that every edge leaves a relation node for a person and that each
    /// relation node has exactly its two role edges.
    fn validate(&self) -> Result<()> {
        for edge in self.edges() {
            let source_type = self.node(edge.source).map(|n| n.node_type);
            let target_type = self.node(edge.target).map(|n| n.node_type);
            if !source_type.map_or(false, |t| t.is_relation()) {
                return Err(KgsynthError::InvalidInput(format!(
                    "edge {} -> {} does not leave a relation node",
                    edge.source, edge.target
                )));
            }
            if target_type != Some(NodeType::Person) {
                return Err(KgsynthError::InvalidInput(format!(
                    "edge {} -> {} does not point at a person",
                    edge.source, edge.target
                )));
            }
        }

        for node in self.nodes() {
            let Some(relation_type) = node.node_type.relation_type() else {
                continue;
            };
            let roles: Vec<Role> = self
                .successors(node.id)
                .into_iter()
                .filter_map(|target| self.edge(node.id, target).map(|e| e.role))
                .collect();
            if roles != relation_type.roles() {
                return Err(KgsynthError::InvalidInput(format!(
                    "{} node {} has role edges {:?}, expected {:?}",
                    relation_type,
                    node.id,
                    roles,
                    relation_type.roles()
                )));
            }
        }

        Ok(())
    }
}

impl PartialEq for KinshipGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes().eq(other.nodes()) && self.edges().eq(other.edges())
    }
}

impl Eq for KinshipGraph {}

impl Serialize for KinshipGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("KinshipGraph", 2)?;
        state.serialize_field("nodes", &self.nodes().collect::<Vec<_>>())?;
        state.serialize_field("edges", &self.edges().collect::<Vec<_>>())?;
        state.end()
    }
}

/// Wire shape of a graph.
#[derive(Deserialize)]
struct SerializedGraph {
    nodes: Vec<NodeData>,
    edges: Vec<EdgeData>,
}

impl TryFrom<SerializedGraph> for KinshipGraph {
    type Error = KgsynthError;

    fn try_from(serialized: SerializedGraph) -> Result<Self> {
        let mut graph = KinshipGraph::new();
        for (expected, node) in serialized.nodes.into_iter().enumerate() {
            if node.id != expected {
                return Err(KgsynthError::InvalidInput(format!(
                    "node ids must be consecutive from 0: expected {}, found {}",
                    expected, node.id
                )));
            }
            let id = graph.add_node(node.node_type);
            if let Some(labels) = graph.node_labels_mut(id) {
                *labels = node.labels;
            }
        }
        for edge in serialized.edges {
            graph.add_edge(edge.source, edge.target, edge.role)?;
            if let Some(labels) = graph.edge_labels_mut(edge.source, edge.target) {
                *labels = edge.labels;
            }
        }
        graph.validate()?;
        Ok(graph)
    }
}
