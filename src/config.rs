//! Agent configuration

use crate::debug::DebugConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level agent configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AgentConfig {
    /// Turn-boundary strings printed by the engine
    pub protocol: ProtocolConfig,
    /// Give up after this many lives (unbounded when absent)
    pub max_lives: Option<usize>,
    /// Seed for exploration; entropy is used when absent
    pub seed: Option<u64>,
    /// Where to persist the checkpoint between runs
    pub checkpoint_path: Option<PathBuf>,
    /// Diagnostic logging
    pub debug: DebugConfig,
}

impl AgentConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config '{}': {}", path.display(), e))?;
        Self::from_json(&json)
    }
}

/// Lines and markers the turn reader recognises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Line that ends every turn
    pub prompt: String,
    /// Line announcing the end of the current life
    pub death_line: String,
    /// Prefix of the line introducing the visible objects
    pub objects_header: String,
    /// Prefix of exit and object list entries
    pub bullet: String,
    /// Text marking areas where backtracking filters are unreliable
    pub ambiguity_marker: String,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            prompt: "What do you do?".to_string(),
            death_line: "You have been eaten by a grue.".to_string(),
            objects_header: "Things of interest here".to_string(),
            bullet: "- ".to_string(),
            ambiguity_marker: "maze".to_string(),
        }
    }
}
