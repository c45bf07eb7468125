//! Per-invocation configuration — `.disclose.toml`
//!
//! Built once per run and passed explicitly to the engine. Nothing here is
//! process-wide state.

use crate::{DiscloseError, DiscloseResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscloseConfig {
    /// Distribution directory to audit. Without it only the descriptor's
    /// internal consistency is checked.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Whether generated documents should carry links to source
    #[serde(default)]
    pub include_source_urls: bool,

    /// File and directory names the scanner skips (e.g. `.git`)
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl DiscloseConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> DiscloseResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DiscloseError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            DiscloseError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn from_toml(content: &str) -> DiscloseResult<Self> {
        toml::from_str(content).map_err(|e| DiscloseError::Config(format!("Failed to parse: {}", e)))
    }

    /// Try `.disclose.toml`, then `disclose.toml`, under `root`; fall back to
    /// defaults when neither loads.
    pub fn from_project_root(root: &Path) -> Self {
        for candidate in [".disclose.toml", "disclose.toml"] {
            let path = root.join(candidate);
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("{}, using defaults", e);
                }
            }
        }

        Self::default()
    }

    pub fn is_audit(&self) -> bool {
        self.source_dir.is_some()
    }
}
