//! Corpus export: labeled graphs as JSON with a fingerprinted manifest.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::graph::KinshipGraph;

/// One exported graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub scenario: usize,
    pub fingerprint: String,
    pub graph: KinshipGraph,
}

impl GraphRecord {
    pub fn new(scenario: usize, graph: KinshipGraph) -> Result<Self> {
        let fingerprint = fingerprint(&graph)?;
        Ok(Self {
            scenario,
            fingerprint,
            graph,
        })
    }
}

/// Summary of an exported corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusManifest {
    pub generated_at: DateTime<Utc>,
    pub scenarios: Vec<usize>,
    pub fingerprints: Vec<String>,
}

/// File layout of an exported corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusFile {
    pub manifest: CorpusManifest,
    pub graphs: Vec<GraphRecord>,
}

/// SHA-256 of the graph's JSON serialization, lowercase hex.
pub fn fingerprint(graph: &KinshipGraph) -> Result<String> {
    let json = serde_json::to_vec(graph)?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write `records` and their manifest to `path` as pretty JSON.
pub fn write_corpus(path: &Path, records: Vec<GraphRecord>) -> Result<CorpusManifest> {
    let manifest = CorpusManifest {
        generated_at: Utc::now(),
        scenarios: records.iter().map(|r| r.scenario).collect(),
        fingerprints: records.iter().map(|r| r.fingerprint.clone()).collect(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = CorpusFile {
        manifest: manifest.clone(),
        graphs: records,
    };
    std::fs::write(path, serde_json::to_string_pretty(&file)?)?;

    log::info!(
        "Wrote {} graphs to {}",
        manifest.scenarios.len(),
        path.display()
    );
    Ok(manifest)
}

/// Load a corpus written by [`write_corpus`].
pub fn read_corpus(path: &Path) -> Result<CorpusFile> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KgsynthError;
    use crate::scenario::{create_graph, create_graphs_tuple, TRAINING_CORPUS};
    use tempfile::TempDir;

    #[test]
    fn test_fingerprint_stable_and_distinct() {
        let a = create_graph(0).unwrap().unwrap();
        let b = create_graph(0).unwrap().unwrap();
        let c = create_graph(1).unwrap().unwrap();
        let fa = fingerprint(&a).unwrap();
        assert_eq!(fa.len(), 64);
        assert!(fa.chars().all(|ch| ch.is_ascii_hexdigit()));
        assert_eq!(fa, fingerprint(&b).unwrap());
        assert_ne!(fa, fingerprint(&c).unwrap());
    }

    #[test]
    fn test_identical_recipes_share_fingerprint() {
        let five = create_graph(5).unwrap().unwrap();
        let six = create_graph(6).unwrap().unwrap();
        assert_eq!(fingerprint(&five).unwrap(), fingerprint(&six).unwrap());
    }

    #[test]
    fn test_write_and_read_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("corpus.json");

        let records = create_graphs_tuple()
            .unwrap()
            .into_iter()
            .zip(TRAINING_CORPUS)
            .map(|(graph, index)| GraphRecord::new(index, graph).unwrap())
            .collect::<Vec<_>>();
        let manifest = write_corpus(&path, records.clone()).unwrap();
        assert_eq!(manifest.scenarios, TRAINING_CORPUS.to_vec());

        let loaded = read_corpus(&path).unwrap();
        assert_eq!(loaded.manifest, manifest);
        assert_eq!(loaded.graphs, records);
        for record in &loaded.graphs {
            assert_eq!(fingerprint(&record.graph).unwrap(), record.fingerprint);
        }
    }

    #[test]
    fn test_read_missing_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_corpus(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, KgsynthError::Io(_)));
    }
}
