//! Checkpoint manager
//!
//! Holds the single most recent [`Checkpoint`]. A checkpoint is only taken
//! when no event is mid-fire, so replaying its actions on a fresh engine
//! deterministically rebuilds inventory and puzzle progress.

use crate::types::{Checkpoint, Direction};

/// Owner of the last known-good checkpoint
#[derive(Debug, Clone, Default)]
pub struct CheckpointManager {
    current: Option<Checkpoint>,
    saves: usize,
}

impl CheckpointManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously persisted checkpoint
    pub fn from_checkpoint(checkpoint: Checkpoint) -> Self {
        Self {
            current: Some(checkpoint),
            saves: 0,
        }
    }

    /// Store a copy of the action log and exits
    ///
    /// Later changes to the caller's log do not reach the stored checkpoint.
    pub fn save(&mut self, actions: &[String], exits: &[Direction]) {
        self.current = Some(Checkpoint::new(actions.to_vec(), exits.to_vec()));
        self.saves += 1;
    }

    /// The last saved checkpoint, if anything has been accomplished yet
    pub fn restore(&self) -> Option<Checkpoint> {
        self.current.clone()
    }

    pub fn current(&self) -> Option<&Checkpoint> {
        self.current.as_ref()
    }

    /// Number of saves since this manager was created
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
