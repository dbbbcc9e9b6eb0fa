//! In-memory session with canned engine output

use super::Session;
use crate::error::SessionError;
use std::collections::{HashMap, VecDeque};

const DEFAULT_RESPONSE: &str = "I don't understand; try 'help' for instructions.\n\nWhat do you do?";

/// A [`Session`] that answers commands from a fixed script
///
/// Each command may be given several responses; they are used in order and
/// the last one keeps answering once the others are spent. Commands without
/// a script get a generic "don't understand" turn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSession {
    pending: VecDeque<String>,
    responses: HashMap<String, VecDeque<String>>,
    default_response: Option<String>,
    sent: Vec<String>,
}

impl ScriptedSession {
    /// Start a session whose first output is `intro`; an empty intro
    /// produces no output until the first command
    pub fn new(intro: &str) -> Self {
        let mut session = Self::default();
        session.enqueue(intro);
        session
    }

    /// Add a response for `command`
    pub fn respond(mut self, command: &str, response: &str) -> Self {
        self.responses
            .entry(command.to_string())
            .or_default()
            .push_back(response.to_string());
        self
    }

    /// Replace the response given to unscripted commands
    pub fn otherwise(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Every command sent so far, in order
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    fn enqueue(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.pending.extend(text.split('\n').map(str::to_string));
    }

    fn response_for(&mut self, command: &str) -> String {
        if let Some(queue) = self.responses.get_mut(command) {
            let next = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(response) = next {
                return response;
            }
        }
        self.default_response
            .clone()
            .unwrap_or_else(|| DEFAULT_RESPONSE.to_string())
    }
}

impl Session for ScriptedSession {
    fn send(&mut self, command: &str) -> Result<(), SessionError> {
        self.sent.push(command.to_string());
        let response = self.response_for(command);
        self.enqueue(&response);
        Ok(())
    }

    fn receive_line(&mut self) -> Result<String, SessionError> {
        self.pending.pop_front().ok_or(SessionError::Closed)
    }
}
