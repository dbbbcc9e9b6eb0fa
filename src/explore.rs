//! Exploration policy
//!
//! The map is unknown and may contain cycles, so movement is a random walk
//! that avoids stepping straight back where it came from. Inside areas the
//! engine marks as ambiguous (mazes) the opposite-direction heuristic does
//! not hold, and every exit stays a candidate.

use crate::config::ProtocolConfig;
use crate::error::AgentError;
use crate::types::{Direction, WorldState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Exits worth considering from the current location
pub fn candidates(world: &WorldState, protocol: &ProtocolConfig) -> Vec<Direction> {
    let ambiguous = world.text_contains(&protocol.ambiguity_marker);
    if world.exits.len() <= 1 || ambiguous {
        return world.exits.clone();
    }

    let back = world.last_move.as_ref().and_then(Direction::opposite);
    world
        .exits
        .iter()
        .filter(|exit| Some(*exit) != back.as_ref())
        .cloned()
        .collect()
}

/// Uniform random choice among candidate exits
pub struct ExplorationPolicy<R: Rng = StdRng> {
    rng: R,
    protocol: ProtocolConfig,
}

impl ExplorationPolicy<StdRng> {
    /// Policy seeded from `seed`, or from entropy when absent
    pub fn seeded(seed: Option<u64>, protocol: ProtocolConfig) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, protocol)
    }
}

impl<R: Rng> ExplorationPolicy<R> {
    pub fn new(rng: R, protocol: ProtocolConfig) -> Self {
        Self { rng, protocol }
    }

    /// Pick the next move from the world's current exits
    pub fn next_move(&mut self, world: &WorldState) -> Result<Direction, AgentError> {
        let options = candidates(world, &self.protocol);
        self.choose(&options)
            .ok_or_else(|| AgentError::malformed_exits(world.last_move.clone()))
    }

    /// Pick uniformly from an explicit list, e.g. a checkpoint's saved exits
    pub fn choose(&mut self, options: &[Direction]) -> Option<Direction> {
        options.choose(&mut self.rng).cloned()
    }
}
