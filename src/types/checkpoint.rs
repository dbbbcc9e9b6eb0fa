//! Replayable progress marker

use super::world::Direction;
use serde::{Deserialize, Serialize};

/// The accepted command history up to the last resolved event, plus the
/// exits that were open at that point
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Checkpoint {
    pub actions: Vec<String>,
    pub exits: Vec<Direction>,
}

impl Checkpoint {
    pub fn new(actions: Vec<String>, exits: Vec<Direction>) -> Self {
        Self { actions, exits }
    }

    /// Items re-acquired by replaying this checkpoint
    pub fn acquired_items(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter_map(|action| action.strip_prefix("take "))
    }
}
