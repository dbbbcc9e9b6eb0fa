//! Error types for the agent and its session

use crate::events::EventId;
use crate::types::world::Direction;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the line-oriented channel to the game engine
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start engine '{}'", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine closed its output before the next prompt")]
    Closed,
}

/// Errors raised by the control core
///
/// Only `Death` is recovered (by restoring the last checkpoint); every other
/// variant points at an authoring or protocol defect and ends the run.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("died: {message}")]
    Death { message: String },

    #[error("no ordering of {actions:?} succeeded after {tried} attempts")]
    ExhaustedSearch { actions: Vec<String>, tried: usize },

    #[error("no exit left to explore (last move: {})", display_move(.last_move))]
    MalformedExits { last_move: Option<Direction> },

    #[error("undefined event '{event}' referenced by '{referenced_by}'")]
    UndefinedEvent {
        event: EventId,
        referenced_by: String,
    },

    #[error("gave up after {lives} lives")]
    LivesExhausted { lives: usize },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AgentError {
    pub fn death(message: impl Into<String>) -> Self {
        Self::Death {
            message: message.into(),
        }
    }

    pub fn malformed_exits(last_move: Option<Direction>) -> Self {
        Self::MalformedExits { last_move }
    }

    pub fn undefined_event(event: impl Into<EventId>, referenced_by: impl Into<String>) -> Self {
        Self::UndefinedEvent {
            event: event.into(),
            referenced_by: referenced_by.into(),
        }
    }

    /// Whether this error ends only the current life
    pub fn is_death(&self) -> bool {
        matches!(self, Self::Death { .. })
    }
}

fn display_move(last_move: &Option<Direction>) -> String {
    match last_move {
        Some(direction) => direction.to_string(),
        None => "none".to_string(),
    }
}
