use std::path::{Path, PathBuf};

use anyhow::Context;
use duka_sms::ClassifyOptions;
use serde::{Deserialize, Serialize};

/// `duka.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DukaConfig {
    pub log_level: String,
    /// Transaction list the scan results are merged into.
    pub store: PathBuf,
    /// How many of the most recent inbox messages a scan looks at.
    pub scan_limit: usize,
    pub classifier: ClassifyOptions,
}

impl Default for DukaConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            store: PathBuf::from("transactions.json"),
            scan_limit: 500,
            classifier: ClassifyOptions::default(),
        }
    }
}

impl DukaConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Reads `path` if given, otherwise returns the defaults.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content)
    }
}
