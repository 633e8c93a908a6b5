use std::path::{Path, PathBuf};

use anyhow::Context;
use duka_core::{RawMessage, Transaction};

/// The transaction list kept as one JSON array on disk, the same shape the
/// app keeps under its `transactions` key.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A store that has never been written reads as empty.
    pub async fn load(&self) -> anyhow::Result<Vec<Transaction>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()))
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Store {} is not a transaction list", self.path.display()))
    }

    /// Writes next to the target and renames over it, so a crash mid-write
    /// leaves the previous list intact.
    pub async fn save(&self, transactions: &[Transaction]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(transactions)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// Reads an inbox export: a JSON array of raw messages.
pub async fn read_inbox(path: &Path) -> anyhow::Result<Vec<RawMessage>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read inbox {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Inbox {} is not a list of messages", path.display()))
}
