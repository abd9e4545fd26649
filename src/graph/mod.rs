//! Kinship graph module: typed graph model, exhaustive generation and truth labeling.
//!
//! Persons are connected through relation nodes (parentship, siblingship), each
//! with two typed role edges. Every node and edge carries `input`/`solution`
//! truth labels used as model input and training target.

mod generation;
mod kinship;
mod labels;

pub use generation::generate_graph;
pub use kinship::{Element, KinshipGraph};
pub use labels::{
    add_base_labels, add_parentship, add_relation_label, add_siblingship, find_relation_node,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KgsynthError;

/// Node identifier, assigned consecutively from zero in generation order.
pub type NodeId = usize;

/// Type of a node: a person or one of the relation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Person,
    Parentship,
    Siblingship,
}

impl NodeType {
    /// All node types, in categorical encoding order.
    pub const ALL: [NodeType; 3] = [NodeType::Person, NodeType::Parentship, NodeType::Siblingship];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Person => "person",
            NodeType::Parentship => "parentship",
            NodeType::Siblingship => "siblingship",
        }
    }

    pub fn is_relation(&self) -> bool {
        !matches!(self, NodeType::Person)
    }

    /// The relation type materialized by nodes of this type.
    pub fn relation_type(&self) -> Option<RelationType> {
        match self {
            NodeType::Person => None,
            NodeType::Parentship => Some(RelationType::Parentship),
            NodeType::Siblingship => Some(RelationType::Siblingship),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A binary relation type materialized as relation nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Parentship,
    Siblingship,
}

impl RelationType {
    /// Roles played by the two role-players, in edge order.
    pub fn roles(&self) -> [Role; 2] {
        match self {
            RelationType::Parentship => [Role::Parent, Role::Child],
            RelationType::Siblingship => [Role::Sibling, Role::Sibling],
        }
    }

    /// The node type of this relation's nodes.
    pub fn node_type(&self) -> NodeType {
        match self {
            RelationType::Parentship => NodeType::Parentship,
            RelationType::Siblingship => NodeType::Siblingship,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.node_type().as_str()
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a role-player takes in a relation; the type of a role edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
    Sibling,
}

impl Role {
    /// All roles, in categorical encoding order.
    pub const ALL: [Role; 3] = [Role::Parent, Role::Child, Role::Sibling];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Parent => "parent",
            Role::Child => "child",
            Role::Sibling => "sibling",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a truth label carried by every node and edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The fact is given to the model.
    Input,
    /// The fact is part of the ground truth to infer.
    Solution,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Input, Label::Solution];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Input => "input",
            Label::Solution => "solution",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = KgsynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "input" => Ok(Label::Input),
            "solution" => Ok(Label::Solution),
            other => Err(KgsynthError::InvalidInput(format!("unknown label: {}", other))),
        }
    }
}

/// Truth labels of a single node or edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Labels {
    pub input: bool,
    pub solution: bool,
}

impl Labels {
    /// Label value as 0/1.
    pub fn value(&self, label: Label) -> u8 {
        u8::from(self.is_set(label))
    }

    pub fn is_set(&self, label: Label) -> bool {
        match label {
            Label::Input => self.input,
            Label::Solution => self.solution,
        }
    }

    pub fn set(&mut self, label: Label, value: bool) {
        match label {
            Label::Input => self.input = value,
            Label::Solution => self.solution = value,
        }
    }
}

/// Data stored on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(flatten)]
    pub labels: Labels,
}

/// Data stored on a role edge (relation node --role--> role-player).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub role: Role,
    #[serde(flatten)]
    pub labels: Labels,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_roles() {
        assert_eq!(RelationType::Parentship.roles(), [Role::Parent, Role::Child]);
        assert_eq!(RelationType::Siblingship.roles(), [Role::Sibling, Role::Sibling]);
    }

    #[test]
    fn test_type_strings() {
        assert_eq!(NodeType::Person.to_string(), "person");
        assert_eq!(RelationType::Siblingship.to_string(), "siblingship");
        assert_eq!(Role::Child.to_string(), "child");
        assert_eq!(Label::Solution.to_string(), "solution");
        assert_eq!("Input".parse::<Label>().unwrap(), Label::Input);
        assert!("truth".parse::<Label>().is_err());
        assert!(!NodeType::Person.is_relation());
        assert!(NodeType::Parentship.is_relation());
        assert_eq!(NodeType::Person.relation_type(), None);
        assert_eq!(
            NodeType::Siblingship.relation_type(),
            Some(RelationType::Siblingship)
        );
    }

    #[test]
    fn test_labels_set_and_value() {
        let mut labels = Labels::default();
        assert_eq!(labels.value(Label::Input), 0);
        labels.set(Label::Solution, true);
        assert_eq!(labels.value(Label::Solution), 1);
        assert_eq!(labels.value(Label::Input), 0);
        labels.set(Label::Solution, false);
        assert!(!labels.is_set(Label::Solution));
    }

    #[test]
    fn test_node_data_serializes_type_and_flat_labels() {
        let node = NodeData {
            id: 4,
            node_type: NodeType::Parentship,
            labels: Labels { input: true, solution: false },
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "parentship");
        assert_eq!(json["input"], true);
        assert_eq!(json["solution"], false);
    }
}
