use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kgsynth::encode::{edge_features, encode_solutions, node_features};
use kgsynth::export::{write_corpus, GraphRecord};
use kgsynth::scenario::{self, create_graph, create_graphs, create_graphs_parallel};
use kgsynth::{add_base_labels, generate_graph, Config, KinshipGraph, Label, NodeType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kgsynth")]
#[command(about = "Build labeled kinship graphs for KGCN training")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an unlabeled, fully-connected kinship graph
    Generate {
        /// Number of people
        #[arg(short, long)]
        people: usize,

        /// Base labels to initialize (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<Label>,

        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build one labeled scenario graph
    Scenario {
        index: usize,

        /// Print the graph as JSON
        #[arg(long)]
        json: bool,

        /// Print encoded features and solution targets as JSON
        #[arg(long)]
        features: bool,
    },
    /// List catalog scenarios
    List,
    /// Build the configured corpus and write it to disk
    Corpus {
        /// Output path (defaults to kgsynth.output_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Build scenarios in parallel
        #[arg(short, long)]
        parallel: bool,
    },
}

fn main() -> Result<()> {
    let config = Config::load_or_default()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.kgsynth.log_level.as_str()),
    )
    .init();

    let args = Args::parse();

    match args.command {
        Command::Generate { people, labels, json } => {
            let mut graph = generate_graph(people);
            if !labels.is_empty() {
                add_base_labels(&mut graph, &labels);
            }
            print_graph(&graph, json)?;
        }
        Command::Scenario { index, json, features } => {
            let graph = create_graph(index)?
                .with_context(|| format!("No such scenario: {}", index))?;
            if features {
                print_features(&graph, &config)?;
            } else {
                print_graph(&graph, json)?;
            }
        }
        Command::List => {
            for index in scenario::scenario_indices() {
                if let Some(recipe) = scenario::scenario(index) {
                    println!(
                        "{:>3}  {} people  {} input / {} solution facts  {}",
                        recipe.index,
                        recipe.num_people,
                        recipe.fact_count(Label::Input),
                        recipe.fact_count(Label::Solution),
                        recipe.description
                    );
                }
            }
        }
        Command::Corpus { output, parallel } => {
            run_corpus(&config, output, parallel || config.corpus.parallel)?;
        }
    }

    Ok(())
}

fn run_corpus(config: &Config, output: Option<PathBuf>, parallel: bool) -> Result<()> {
    let indices = &config.corpus.scenarios;
    log::info!(
        "Building corpus of {} scenarios ({})",
        indices.len(),
        if parallel { "parallel" } else { "sequential" }
    );

    let graphs = if parallel {
        create_graphs_parallel(indices)?
    } else {
        create_graphs(indices)?
    };

    let records = graphs
        .into_iter()
        .zip(indices.iter().copied())
        .map(|(graph, index)| GraphRecord::new(index, graph))
        .collect::<kgsynth::Result<Vec<_>>>()?;

    let path = output.unwrap_or_else(|| config.output_path().to_path_buf());
    let manifest = write_corpus(&path, records)
        .with_context(|| format!("Failed to write corpus to {}", path.display()))?;

    println!(
        "Wrote {} graphs to {} at {}",
        manifest.scenarios.len(),
        path.display(),
        manifest.generated_at.to_rfc3339()
    );
    Ok(())
}

fn print_graph(graph: &KinshipGraph, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(graph)?);
        return Ok(());
    }

    println!(
        "{} nodes ({} person, {} parentship, {} siblingship), {} edges",
        graph.node_count(),
        graph.count_of_type(NodeType::Person),
        graph.count_of_type(NodeType::Parentship),
        graph.count_of_type(NodeType::Siblingship),
        graph.edge_count()
    );
    for node in graph.nodes().filter(|n| n.node_type.is_relation()) {
        if !node.labels.input && !node.labels.solution {
            continue;
        }
        let players: Vec<String> = graph
            .successors(node.id)
            .iter()
            .filter_map(|&target| graph.edge(node.id, target))
            .map(|edge| format!("{}={}", edge.role, edge.target))
            .collect();
        println!(
            "  {:>3} {:<12} {:<22} input={} solution={}",
            node.id,
            node.node_type.as_str(),
            players.join(" "),
            node.labels.value(Label::Input),
            node.labels.value(Label::Solution)
        );
    }
    Ok(())
}

fn print_features(graph: &KinshipGraph, config: &Config) -> Result<()> {
    let solutions = encode_solutions(graph, config.solution_encodings())?;
    let output = serde_json::json!({
        "node_features": node_features(graph),
        "edge_features": edge_features(graph),
        "node_targets": solutions.nodes,
        "edge_targets": solutions.edges,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
