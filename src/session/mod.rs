//! Line-oriented channel to the game engine
//!
//! The engine prints a turn of text, ends it with a prompt line and waits for
//! one command. [`read_turn`] splits a turn into narrative text, the exit list
//! and the objects lying around, and turns the death line into
//! [`AgentError::Death`].

use crate::config::ProtocolConfig;
use crate::error::{AgentError, SessionError};
use crate::types::{Direction, Turn};

pub mod process;
pub mod scripted;

pub use process::ProcessSession;
pub use scripted::ScriptedSession;

/// Blocking duplex channel to a running engine
pub trait Session {
    /// Deliver one command
    fn send(&mut self, command: &str) -> Result<(), SessionError>;

    /// Block until the next full line is available
    fn receive_line(&mut self) -> Result<String, SessionError>;
}

impl<S: Session + ?Sized> Session for Box<S> {
    fn send(&mut self, command: &str) -> Result<(), SessionError> {
        (**self).send(command)
    }

    fn receive_line(&mut self) -> Result<String, SessionError> {
        (**self).receive_line()
    }
}

/// Read one turn, up to and including the prompt
pub fn read_turn<S: Session + ?Sized>(
    session: &mut S,
    protocol: &ProtocolConfig,
) -> Result<Turn, AgentError> {
    let mut turn = Turn::new();

    loop {
        let line = next_line(session, protocol)?;
        if line == protocol.prompt {
            return Ok(turn);
        }

        if let Some(count) = exit_count(&line) {
            turn.push_line(&line);
            let mut exits = Vec::with_capacity(count);
            for _ in 0..count {
                let entry = next_line(session, protocol)?;
                exits.push(Direction::from(strip_bullet(&entry, protocol)));
            }
            turn.exits = Some(exits);
            continue;
        }

        if line.starts_with(&protocol.objects_header) {
            turn.push_line(&line);
            loop {
                let entry = next_line(session, protocol)?;
                if entry.is_empty() {
                    break;
                }
                turn.objects.push(strip_bullet(&entry, protocol).to_string());
            }
            continue;
        }

        turn.push_line(&line);
    }
}

/// Read and discard one turn, returning its text
pub fn flush<S: Session + ?Sized>(
    session: &mut S,
    protocol: &ProtocolConfig,
) -> Result<String, AgentError> {
    let mut text = String::new();
    loop {
        let line = next_line(session, protocol)?;
        if line == protocol.prompt {
            return Ok(text);
        }
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&line);
    }
}

fn next_line<S: Session + ?Sized>(
    session: &mut S,
    protocol: &ProtocolConfig,
) -> Result<String, AgentError> {
    let line = session.receive_line()?;
    if line == protocol.death_line {
        return Err(AgentError::death(line));
    }
    Ok(line)
}

/// Parse `There is 1 exit:` / `There are 3 exits:`
fn exit_count(line: &str) -> Option<usize> {
    let rest = line
        .strip_prefix("There is ")
        .or_else(|| line.strip_prefix("There are "))?;
    let (count, tail) = rest.split_once(' ')?;
    if !tail.starts_with("exit") {
        return None;
    }
    count.parse().ok()
}

fn strip_bullet<'a>(entry: &'a str, protocol: &ProtocolConfig) -> &'a str {
    entry.strip_prefix(&protocol.bullet).unwrap_or(entry)
}
