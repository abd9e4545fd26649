pub mod config;
pub mod error;
pub mod graph;
pub mod scenario;
pub mod encode;
pub mod export;

pub use config::Config;
pub use error::{KgsynthError, Result};
pub use graph::{
    add_base_labels, add_parentship, add_relation_label, add_siblingship, find_relation_node,
    generate_graph, KinshipGraph, Label, NodeId, NodeType, RelationType, Role,
};
pub use scenario::{create_graph, create_graphs, create_graphs_tuple, TRAINING_CORPUS};
