//! One turn of engine output, already split into its parts

use super::world::Direction;
use serde::{Deserialize, Serialize};

/// Everything the engine printed between two prompts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Turn {
    /// Narrative lines, joined with newlines
    pub text: String,
    /// Exit list, present only when the turn described a location
    pub exits: Option<Vec<Direction>>,
    /// Objects lying around that should be picked up
    pub objects: Vec<String>,
}

impl Turn {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }
}
