use kgsynth::export::fingerprint;
use kgsynth::scenario::{create_graphs, scenario};
use kgsynth::{Config, KinshipGraph, Label, NodeType};

/// Fraction of elements whose solution label is set
fn positive_ratio(graph: &KinshipGraph) -> f64 {
    let total = graph.node_count() + graph.edge_count();
    if total == 0 {
        return 0.0;
    }
    let positive = graph
        .elements()
        .filter(|element| element.labels().is_set(Label::Solution))
        .count();
    positive as f64 / total as f64
}

fn main() -> anyhow::Result<()> {
    let config = Config::load_or_default()?;
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.kgsynth.log_level.as_str()),
    )
    .init();

    let indices = &config.corpus.scenarios;
    let graphs = create_graphs(indices)?;

    println!("\n=== kgsynth Corpus Statistics ===\n");
    println!("{:-<96}", "");
    println!(
        "{:<9} {:>7} {:>10} {:>10} {:>8} {:>8} {:>10}  {:<16}",
        "Scenario", "People", "Relations", "Edges", "Input", "Infer", "Positive", "Fingerprint"
    );
    println!("{:-<96}", "");

    let mut total_nodes = 0;
    let mut total_edges = 0;
    let mut total_infer = 0;

    for (&index, graph) in indices.iter().zip(&graphs) {
        let people = graph.count_of_type(NodeType::Person);
        let relations = graph.node_count() - people;
        // Facts to infer: relations labeled solution but not input
        let infer = graph
            .nodes()
            .filter(|n| n.node_type.is_relation() && n.labels.solution && !n.labels.input)
            .count();
        let input = graph
            .nodes()
            .filter(|n| n.node_type.is_relation() && n.labels.input)
            .count();
        let ratio = positive_ratio(graph);
        let digest = fingerprint(graph)?;

        println!(
            "{:<9} {:>7} {:>10} {:>10} {:>8} {:>8} {:>9.1}%  {:<16}",
            index,
            people,
            relations,
            graph.edge_count(),
            input,
            infer,
            ratio * 100.0,
            &digest[..16]
        );

        total_nodes += graph.node_count();
        total_edges += graph.edge_count();
        total_infer += infer;
    }
    println!("{:-<96}", "");

    println!("\nTotal Statistics:");
    println!("  Graphs: {}", graphs.len());
    println!("  Nodes: {}", total_nodes);
    println!("  Edges: {}", total_edges);
    println!("  Facts to infer: {}", total_infer);

    let without_targets: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&index| {
            scenario(index)
                .map(|recipe| recipe.fact_count(Label::Solution) == recipe.fact_count(Label::Input))
                .unwrap_or(false)
        })
        .collect();
    if !without_targets.is_empty() {
        println!("  Scenarios with nothing to infer: {:?}", without_targets);
    }

    println!();

    Ok(())
}
