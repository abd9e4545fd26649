//! Feature encoding hooks for the downstream KGCN pipeline.
//!
//! Turns labeled graphs into plain numeric rows: one-hot solution targets,
//! categorical type indices and `[input, category]` feature rows. Rows follow
//! graph order (nodes by id, edges by insertion).

use serde::{Deserialize, Serialize};

use crate::error::{KgsynthError, Result};
use crate::graph::{KinshipGraph, Label, NodeType, Role};

/// Lookup table from a solution value to its target row.
///
/// Serialized as the bare list of rows; deserializing goes through
/// [`SolutionEncodings::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f32>>", into = "Vec<Vec<f32>>")]
pub struct SolutionEncodings {
    rows: Vec<Vec<f32>>,
}

impl Default for SolutionEncodings {
    /// The 3x3 identity: solution `0` -> `[1, 0, 0]`, `1` -> `[0, 1, 0]`.
    fn default() -> Self {
        Self {
            rows: vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0],
            ],
        }
    }
}

impl SolutionEncodings {
    /// Build a table; it needs a row for both solution values and rows of equal width.
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self> {
        if rows.len() < 2 {
            return Err(KgsynthError::Encoding(format!(
                "need at least 2 encoding rows, got {}",
                rows.len()
            )));
        }
        let width = rows[0].len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(KgsynthError::Encoding(
                "encoding rows must be non-empty and of equal width".to_string(),
            ));
        }
        Ok(Self { rows })
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// The row for `value`.
    pub fn encode(&self, value: usize) -> Result<&[f32]> {
        self.rows.get(value).map(Vec::as_slice).ok_or_else(|| {
            KgsynthError::Encoding(format!(
                "solution value {} outside encodings table of {} rows",
                value,
                self.rows.len()
            ))
        })
    }
}

impl TryFrom<Vec<Vec<f32>>> for SolutionEncodings {
    type Error = KgsynthError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<SolutionEncodings> for Vec<Vec<f32>> {
    fn from(encodings: SolutionEncodings) -> Self {
        encodings.rows
    }
}

/// Encoded solution targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedSolutions {
    pub nodes: Vec<Vec<f32>>,
    pub edges: Vec<Vec<f32>>,
}

/// Encode every element's `solution` value as a row of `encodings`.
pub fn encode_solutions(
    graph: &KinshipGraph,
    encodings: &SolutionEncodings,
) -> Result<EncodedSolutions> {
    let encode = |value: u8| encodings.encode(usize::from(value)).map(<[f32]>::to_vec);

    let nodes = graph
        .nodes()
        .map(|node| encode(node.labels.value(Label::Solution)))
        .collect::<Result<Vec<_>>>()?;
    let edges = graph
        .edges()
        .map(|edge| encode(edge.labels.value(Label::Solution)))
        .collect::<Result<Vec<_>>>()?;

    Ok(EncodedSolutions { nodes, edges })
}

/// Index of each node type in [`NodeType::ALL`] and each role in [`Role::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCategories {
    pub nodes: Vec<usize>,
    pub edges: Vec<usize>,
}

pub fn encode_types_categorically(graph: &KinshipGraph) -> TypeCategories {
    TypeCategories {
        nodes: graph.nodes().map(|node| node_category(node.node_type)).collect(),
        edges: graph.edges().map(|edge| role_category(edge.role)).collect(),
    }
}

/// Position of `value` in `all`.
fn category<T: PartialEq>(all: &[T], value: &T) -> usize {
    all.iter().position(|candidate| candidate == value).unwrap_or(all.len())
}

fn node_category(node_type: NodeType) -> usize {
    category(&NodeType::ALL, &node_type)
}

fn role_category(role: Role) -> usize {
    category(&Role::ALL, &role)
}

/// Concatenate numeric fields into a single feature row.
pub fn augment_fields(fields: &[&[f32]]) -> Vec<f32> {
    fields.iter().flat_map(|field| field.iter().copied()).collect()
}

/// `[input, type category]` per node.
pub fn node_features(graph: &KinshipGraph) -> Vec<Vec<f32>> {
    graph
        .nodes()
        .map(|node| {
            augment_fields(&[
                &[f32::from(node.labels.value(Label::Input))],
                &[node_category(node.node_type) as f32],
            ])
        })
        .collect()
}

/// `[input, role category]` per edge.
pub fn edge_features(graph: &KinshipGraph) -> Vec<Vec<f32>> {
    graph
        .edges()
        .map(|edge| {
            augment_fields(&[
                &[f32::from(edge.labels.value(Label::Input))],
                &[role_category(edge.role) as f32],
            ])
        })
        .collect()
}
