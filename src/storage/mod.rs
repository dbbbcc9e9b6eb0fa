//! Progress files
//!
//! A run that stops (crash, `max_lives`, Ctrl-C) can be picked up by a later
//! process. What survives is the checkpoint together with the events still
//! open when it was taken; replaying the one without the other would fire
//! solved puzzles a second time.

use crate::events::OpenEventSet;
use crate::types::checkpoint::Checkpoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a later process needs to resume a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub checkpoint: Checkpoint,
    pub open: OpenEventSet,
}

impl Progress {
    pub fn new(checkpoint: Checkpoint, open: OpenEventSet) -> Self {
        Self { checkpoint, open }
    }
}

/// Encode progress as pretty-printed JSON
pub fn to_bytes(progress: &Progress) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(progress)?)
}

/// Decode progress written by [`to_bytes`]
pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Progress> {
    serde_json::from_slice(bytes)
        .map_err(|e| anyhow::anyhow!("progress file is not valid: {}", e))
}

/// Write a progress file, replacing any previous one
///
/// The new content is staged next to the target and renamed over it, so a
/// crash mid-write leaves the old file intact.
pub fn write_file(path: &Path, progress: &Progress) -> anyhow::Result<()> {
    let bytes = to_bytes(progress)?;
    let staging = path.with_extension("tmp");
    std::fs::write(&staging, bytes)?;
    std::fs::rename(&staging, path)?;
    Ok(())
}

/// Read a progress file; a missing file means nothing was accomplished yet
pub fn read_file(path: &Path) -> anyhow::Result<Option<Progress>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(from_bytes(&bytes)?)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
