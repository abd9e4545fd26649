//! Scenario catalog: fixed, labeled kinship graphs used as training and
//! evaluation corpus.

mod catalog;

use rayon::prelude::*;

use crate::error::{KgsynthError, Result};
use crate::graph::{
    add_base_labels, add_relation_label, generate_graph, KinshipGraph, Label, NodeId,
    RelationType,
};
use catalog::CATALOG;

/// Scenario indices of the training/evaluation corpus, in batching order.
pub const TRAINING_CORPUS: [usize; 10] = [0, 1, 2, 3, 5, 6, 7, 8, 9, 10];

/// A single fact of a scenario and the labels it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fact {
    pub relation_type: RelationType,
    pub roleplayers: [NodeId; 2],
    pub labels: &'static [Label],
}

impl Fact {
    pub fn has_label(&self, label: Label) -> bool {
        self.labels.contains(&label)
    }
}

/// A hand-authored recipe for one labeled graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub index: usize,
    pub num_people: usize,
    pub description: &'static str,
    pub facts: &'static [Fact],
}

impl Scenario {
    /// Generate the base graph, reset `input`/`solution` and apply every fact.
    pub fn build(&self) -> Result<KinshipGraph> {
        let mut graph = generate_graph(self.num_people);
        add_base_labels(&mut graph, &Label::ALL);

        for fact in self.facts {
            add_relation_label(
                &mut graph,
                fact.relation_type,
                fact.relation_type.roles(),
                fact.roleplayers,
                fact.labels,
            )?;
        }

        log::debug!(
            "Built scenario {} ({}): {} facts over {} people",
            self.index,
            self.description,
            self.facts.len(),
            self.num_people
        );
        Ok(graph)
    }

    /// Number of facts carrying `label`.
    pub fn fact_count(&self, label: Label) -> usize {
        self.facts.iter().filter(|fact| fact.has_label(label)).count()
    }
}

/// Look up a scenario recipe by index.
pub fn scenario(index: usize) -> Option<&'static Scenario> {
    CATALOG.iter().find(|s| s.index == index)
}

/// All catalog indices in ascending order.
pub fn scenario_indices() -> impl Iterator<Item = usize> {
    CATALOG.iter().map(|s| s.index)
}

/// Build the labeled graph of scenario `index`.
///
/// Returns `Ok(None)` when no such scenario exists.
pub fn create_graph(index: usize) -> Result<Option<KinshipGraph>> {
    scenario(index).map(Scenario::build).transpose()
}

/// Build the graphs of `indices` in order, failing on the first unknown index.
pub fn create_graphs(indices: &[usize]) -> Result<Vec<KinshipGraph>> {
    indices
        .iter()
        .map(|&index| create_graph(index)?.ok_or(KgsynthError::UnknownScenario(index)))
        .collect()
}

/// Same as [`create_graphs`], building scenarios on the rayon thread pool.
/// Output order matches `indices`.
pub fn create_graphs_parallel(indices: &[usize]) -> Result<Vec<KinshipGraph>> {
    indices
        .par_iter()
        .map(|&index| create_graph(index)?.ok_or(KgsynthError::UnknownScenario(index)))
        .collect()
}

/// Build the training corpus, in [`TRAINING_CORPUS`] order.
pub fn create_graphs_tuple() -> Result<Vec<KinshipGraph>> {
    let graphs = create_graphs(&TRAINING_CORPUS)?;
    log::info!("Built training corpus of {} graphs", graphs.len());
    Ok(graphs)
}
