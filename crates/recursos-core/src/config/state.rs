//! Persisted state configuration.

use serde::{Deserialize, Serialize};

/// Where section lists and settings are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory holding one `<key>.json` file per persisted key.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Keep state in memory only (nothing survives a restart).
    #[serde(default)]
    pub in_memory: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            in_memory: false,
        }
    }
}

fn default_directory() -> String {
    "./data/state".to_string()
}
