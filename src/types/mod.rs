//! Core data types shared by the agent
//!
//! - World: what the agent believes about the game right now
//! - Turn: one parsed block of engine output
//! - Checkpoint: replayable progress

pub mod checkpoint;
pub mod turn;
pub mod world;

pub use checkpoint::Checkpoint;
pub use turn::Turn;
pub use world::{Direction, WorldState};
