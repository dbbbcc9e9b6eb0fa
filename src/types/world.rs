//! What the agent currently believes about the game

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An exit name as printed by the engine (`north`, `ladder`, `doorway`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Direction(String);

impl Direction {
    pub fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The direction that leads straight back, if the engine's map has one
    ///
    /// Only compass moves, `up`/`down` and `ladder` are known to be
    /// reversible; anything else is treated as one-way.
    pub fn opposite(&self) -> Option<Direction> {
        let opposite = match self.0.as_str() {
            "north" => "south",
            "south" => "north",
            "east" => "west",
            "west" => "east",
            "up" => "down",
            "down" => "up",
            "ladder" => "ladder",
            _ => return None,
        };
        Some(Direction::from(opposite))
    }
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Direction {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of the game as seen from the most recent turn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldState {
    /// Narrative text of the current logical turn
    pub text: String,
    /// Items picked up during this life
    pub inventory: BTreeSet<String>,
    /// Exits of the current location, in the order the engine listed them
    pub exits: Vec<Direction>,
    /// Direction of the move that led here
    pub last_move: Option<Direction>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holds(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    pub fn text_contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }

    /// Number of held items whose name contains `needle`
    pub fn count_holding(&self, needle: &str) -> usize {
        self.inventory
            .iter()
            .filter(|item| item.contains(needle))
            .count()
    }

    /// Append the text of a nested read (auto pick-up) to the current turn
    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(text);
    }
}
