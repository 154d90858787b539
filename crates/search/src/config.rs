use crate::error::{Result, SearchError};
use crate::scorer::DomainBoost;
use finguide_corpus::DEFAULT_EXTENSION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DOCS_DIR: &str = "docs";
pub const DEFAULT_K: usize = 3;
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Retrieval settings, loadable from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub corpus: CorpusConfig,
    pub boost: DomainBoost,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub root: PathBuf,
    pub extension: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_DOCS_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Default output limits for callers that do not pass their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub k: usize,
    pub max_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl RetrievalConfig {
    /// Parse a TOML config. A relative `corpus.root` resolves against the
    /// directory that holds the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&raw)?;
        if config.corpus.root.is_relative() {
            if let Some(base) = path.parent() {
                config.corpus.root = base.join(&config.corpus.root);
            }
        }
        log::debug!("Loaded retrieval config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.corpus.extension.trim_start_matches('.').is_empty() {
            return Err(SearchError::InvalidConfig {
                field: "corpus.extension",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.boost.factor.is_finite() || self.boost.factor < 1.0 {
            return Err(SearchError::InvalidConfig {
                field: "boost.factor",
                reason: format!("expected a finite value >= 1.0, got {}", self.boost.factor),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.corpus.root = root.into();
        self
    }
}
