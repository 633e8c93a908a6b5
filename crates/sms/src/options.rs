use duka_core::Direction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to parse classifier options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunables for the classifier. Every field has a default so an empty TOML
/// table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// Direction given to a bank alert that carries neither a debit nor a
    /// credit cue.
    pub bank_default_direction: Direction,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            bank_default_direction: Direction::Received,
        }
    }
}

impl ClassifyOptions {
    pub fn from_toml(toml_content: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(toml_content)?)
    }
}
