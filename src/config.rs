use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::encode::SolutionEncodings;
use crate::scenario;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub kgsynth: KgsynthConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub encoding: EncodingConfig,
}

/// General settings
#[derive(Debug, Clone, Deserialize)]
pub struct KgsynthConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Where `kgsynth corpus` writes the exported corpus.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for KgsynthConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_path: default_output_path(),
        }
    }
}

/// Corpus selection
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// Scenario indices, in output order.
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<usize>,
    #[serde(default)]
    pub parallel: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            scenarios: default_scenarios(),
            parallel: false,
        }
    }
}

/// Feature encoding settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncodingConfig {
    /// Validated while parsing; defaults to the 3x3 identity.
    #[serde(default)]
    pub solution_encodings: SolutionEncodings,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("corpus.json")
}

fn default_scenarios() -> Vec<usize> {
    scenario::TRAINING_CORPUS.to_vec()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in KGSYNTH_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();
        Self::load_from(&Self::config_path())
    }

    /// Like [`Config::load`], but falls back to defaults when KGSYNTH_CONFIG is
    /// unset and there is no ./config.toml. A KGSYNTH_CONFIG path must exist.
    pub fn load_or_default() -> Result<Self> {
        let _ = dotenv::dotenv();
        match std::env::var_os("KGSYNTH_CONFIG") {
            Some(path) => Self::load_from(Path::new(&path)),
            None => Self::load_local_or_default(Path::new("config.toml")),
        }
    }

    fn load_local_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    fn config_path() -> PathBuf {
        std::env::var("KGSYNTH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.corpus.scenarios.is_empty() {
            anyhow::bail!("corpus.scenarios must list at least one scenario");
        }

        if let Some(missing) = self
            .corpus
            .scenarios
            .iter()
            .find(|&&index| scenario::scenario(index).is_none())
        {
            anyhow::bail!("corpus.scenarios references unknown scenario {}", missing);
        }

        Ok(())
    }

    /// Solution encodings table
    pub fn solution_encodings(&self) -> &SolutionEncodings {
        &self.encoding.solution_encodings
    }

    /// Get the corpus output path
    pub fn output_path(&self) -> &Path {
        &self.kgsynth.output_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn write_config(temp_dir: &TempDir, content: &str) -> PathBuf {
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    fn with_config_env(config_path: &Path, f: impl FnOnce()) {
        let original = std::env::var("KGSYNTH_CONFIG").ok();
        std::env::set_var("KGSYNTH_CONFIG", config_path.to_str().unwrap());
        f();
        std::env::remove_var("KGSYNTH_CONFIG");
        if let Some(val) = original {
            std::env::set_var("KGSYNTH_CONFIG", val);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.kgsynth.log_level, "info");
        assert_eq!(config.output_path(), Path::new("corpus.json"));
        assert_eq!(config.corpus.scenarios, vec![0, 1, 2, 3, 5, 6, 7, 8, 9, 10]);
        assert!(!config.corpus.parallel);
        assert_eq!(config.solution_encodings(), &SolutionEncodings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            &temp_dir,
            r#"
[kgsynth]
log_level = "debug"
output_path = "out/corpus.json"

[corpus]
scenarios = [0, 11, 12]
parallel = true

[encoding]
solution_encodings = [[1.0, 0.0], [0.0, 1.0]]
"#,
        );
        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.kgsynth.log_level, "debug");
            assert_eq!(config.corpus.scenarios, vec![0, 11, 12]);
            assert!(config.corpus.parallel);
            assert_eq!(config.solution_encodings().width(), 2);
        });
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[corpus]\nparallel = true\n");
        let config = Config::load_from(&config_path).unwrap();
        assert!(config.corpus.parallel);
        assert_eq!(config.corpus.scenarios.len(), 10);
        assert_eq!(config.kgsynth.log_level, "info");
    }

    #[test]
    fn test_config_rejects_unknown_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[corpus]\nscenarios = [0, 4]\n");
        let err = Config::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("unknown scenario 4"));
    }

    #[test]
    fn test_config_rejects_empty_scenarios() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(&temp_dir, "[corpus]\nscenarios = []\n");
        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_config_rejects_ragged_encodings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(
            &temp_dir,
            "[encoding]\nsolution_encodings = [[1.0, 0.0], [1.0]]\n",
        );
        assert!(Config::load_from(&config_path).is_err());

        let config_path = write_config(&temp_dir, "[encoding]\nsolution_encodings = [[1.0]]\n");
        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");
        with_config_env(&missing, || {
            assert!(Config::load().is_err());
            let err = Config::load_or_default().unwrap_err();
            assert!(err.to_string().contains("nonexistent.toml"));
        });
    }

    #[test]
    fn test_config_local_file_or_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("config.toml");
        let config = Config::load_local_or_default(&missing).unwrap();
        assert_eq!(config.corpus.scenarios.len(), 10);

        let config_path = write_config(&temp_dir, "[corpus]\nscenarios = [11]\n");
        let config = Config::load_local_or_default(&config_path).unwrap();
        assert_eq!(config.corpus.scenarios, vec![11]);

        let config_path = write_config(&temp_dir, "[corpus]\nscenarios = [4]\n");
        assert!(Config::load_local_or_default(&config_path).is_err());
    }
}
