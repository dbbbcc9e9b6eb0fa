//! # wayfarer
//!
//! An agent that plays a line-oriented text adventure running as a child
//! process. It explores the unknown map at random, fires scripted puzzle
//! events when their preconditions hold, searches for the order of
//! ordering-sensitive puzzles on the live game, and after every death
//! replays its last checkpoint to get back to where it was.
//!
//! ## Quick Start
//!
//! ```rust
//! use wayfarer::events::{Event, EventCatalogue, OpenEventSet, Precondition};
//! use wayfarer::session::ScriptedSession;
//! use wayfarer::{AgentConfig, Explorer, LifeOutcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalogue = EventCatalogue::new().with(
//!     Event::new("light", "Lantern lit!", Precondition::holds(["lantern"]))
//!         .actions(["use lantern"]),
//! );
//! let open = OpenEventSet::new(["light"]);
//! let mut explorer = Explorer::new(catalogue, open, AgentConfig::default())?;
//!
//! let session = ScriptedSession::new(
//!     "Things of interest here:\n- lantern\n\nThere is 1 exit:\n- north\n\nWhat do you do?",
//! )
//! .respond("take lantern", "Taken.\n\nWhat do you do?")
//! .respond("use lantern", "The lantern is now lit.\n\nWhat do you do?");
//!
//! let outcome = explorer.play_life(session)?;
//! assert!(matches!(outcome, LifeOutcome::Completed { .. }));
//! assert_eq!(explorer.resolutions()[0].toast, "Lantern lit!");
//! # Ok(())
//! # }
//! ```
//!
//! Against a real engine, [`Explorer::run`] spawns a
//! [`ProcessSession`](session::ProcessSession) per life until every event is
//! resolved.

pub mod agent;
pub mod checkpoint;
pub mod config;
pub mod debug;
pub mod error;
pub mod events;
pub mod explore;
pub mod session;
pub mod solver;
pub mod storage;
pub mod types;

pub use agent::{Executor, Explorer, Life, LifeOutcome, RunSummary};
pub use checkpoint::CheckpointManager;
pub use config::{AgentConfig, ProtocolConfig};
pub use error::{AgentError, SessionError};
pub use events::{Event, EventCatalogue, EventId, OpenEventSet, Resolution};
pub use explore::ExplorationPolicy;
pub use session::{ProcessSession, ScriptedSession, Session};
pub use solver::OrderingSearch;
pub use types::{Checkpoint, Direction, Turn, WorldState};
