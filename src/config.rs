//! Engine configuration, persisted as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration for the gita-kg engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the corpus JSON document.
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
    /// Default radius for ego-network queries from the CLI.
    #[serde(default = "default_neighborhood_radius")]
    pub neighborhood_radius: usize,
    /// Log a warning when the built graph has dangling reference endpoints.
    #[serde(default = "default_warn_on_dangling")]
    pub warn_on_dangling: bool,
}

fn default_neighborhood_radius() -> usize {
    1
}
fn default_warn_on_dangling() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            neighborhood_radius: default_neighborhood_radius(),
            warn_on_dangling: default_warn_on_dangling(),
        }
    }
}

impl EngineConfig {
    /// Create a config for a corpus file (other fields default).
    pub fn with_corpus(path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// The configured corpus path, or [`ConfigError::NoCorpus`].
    pub fn corpus_path(&self) -> ConfigResult<&Path> {
        self.corpus_path.as_deref().ok_or(ConfigError::NoCorpus)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
