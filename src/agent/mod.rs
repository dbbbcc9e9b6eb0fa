//! The exploration loop
//!
//! A [`Life`] is one run of the engine, from spawn to death or completion. It
//! owns the session and the world state, keeps the durable action log, and is
//! the [`Executor`] that events and the solver send commands through.
//! [`Explorer`] owns everything that outlives a life: the open events, the
//! checkpoint and the exploration policy.

use crate::checkpoint::CheckpointManager;
use crate::config::ProtocolConfig;
use crate::debug::{self, DebugCategory, DebugConfig, LogLevel};
use crate::error::AgentError;
use crate::explore::{self, ExplorationPolicy};
use crate::session::{self, Session};
use crate::types::{Checkpoint, Direction, WorldState};
use rand::Rng;

pub mod explorer;

pub use explorer::{Explorer, LifeOutcome, RunSummary};


/// What events and the solver need from the running game
pub trait Executor {
    fn world(&self) -> &WorldState;

    /// Send one command and absorb the turn it produces
    fn perform(&mut self, action: &str) -> Result<(), AgentError>;

    /// Stop recording sent commands in the durable log
    fn begin_trial(&mut self);

    fn end_trial(&mut self);

    /// Append commands already sent during a trial to the durable log
    fn commit(&mut self, actions: &[String]);

    /// An event's commands are about to be sent; no checkpoint may be taken
    /// until [`end_event`](Self::end_event)
    fn begin_event(&mut self);

    fn end_event(&mut self);

    fn save_checkpoint(&mut self);
}

/// One life of the adventurer
pub struct Life<'a, S: Session> {
    session: S,
    world: WorldState,
    actions: Vec<String>,
    trial: bool,
    firing: bool,
    checkpoints: &'a mut CheckpointManager,
    protocol: &'a ProtocolConfig,
    debug_config: &'a DebugConfig,
}

impl<'a, S: Session> Life<'a, S> {
    pub fn new(
        session: S,
        checkpoints: &'a mut CheckpointManager,
        protocol: &'a ProtocolConfig,
        debug_config: &'a DebugConfig,
    ) -> Self {
        Self {
            session,
            world: WorldState::new(),
            actions: Vec::new(),
            trial: false,
            firing: false,
            checkpoints,
            protocol,
            debug_config,
        }
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Durable action log of this life
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn in_trial(&self) -> bool {
        self.trial
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Read the next turn into the world, picking up anything lying around
    pub fn absorb_turn(&mut self) -> Result<(), AgentError> {
        let turn = session::read_turn(&mut self.session, self.protocol)?;
        self.world.text = turn.text;
        if let Some(exits) = turn.exits {
            self.world.exits = exits;
        }
        for object in turn.objects {
            self.pick_up(&object)?;
        }
        Ok(())
    }

    /// Move through `direction`; the arrival turn is read by the next
    /// [`absorb_turn`](Self::absorb_turn)
    pub fn step(&mut self, direction: Direction) -> Result<(), AgentError> {
        debug::log(
            self.debug_config,
            DebugCategory::Explore,
            LogLevel::Debug,
            &format!("[Explore] going {}", direction),
        );
        self.send(direction.as_str())?;
        self.world.last_move = Some(direction);
        Ok(())
    }

    /// Re-issue a checkpoint's commands on a fresh engine, then leave
    /// through one of its saved exits
    pub fn replay<R: Rng>(
        &mut self,
        checkpoint: &Checkpoint,
        policy: &mut ExplorationPolicy<R>,
    ) -> Result<(), AgentError> {
        debug::log(
            self.debug_config,
            DebugCategory::Checkpoint,
            LogLevel::Info,
            &format!("[Checkpoint] replaying {} actions", checkpoint.actions.len()),
        );

        session::flush(&mut self.session, self.protocol)?;
        for action in &checkpoint.actions {
            self.send(action)?;
            session::flush(&mut self.session, self.protocol)?;
        }
        self.world.inventory = checkpoint.acquired_items().map(str::to_string).collect();

        let direction = policy
            .choose(&checkpoint.exits)
            .ok_or_else(|| AgentError::malformed_exits(None))?;
        self.step(direction)
    }

    fn pick_up(&mut self, item: &str) -> Result<(), AgentError> {
        self.world.inventory.insert(item.to_string());
        self.send(&format!("take {}", item))?;
        let text = session::flush(&mut self.session, self.protocol)?;
        self.world.append_text(&text);
        if !self.trial && !self.firing {
            self.save_checkpoint();
        }
        Ok(())
    }

    fn send(&mut self, command: &str) -> Result<(), AgentError> {
        debug::log(
            self.debug_config,
            DebugCategory::Session,
            LogLevel::Trace,
            &format!(">> {}", command),
        );
        self.session.send(command)?;
        if !self.trial {
            self.actions.push(command.to_string());
        }
        Ok(())
    }
}

impl<S: Session> Executor for Life<'_, S> {
    fn world(&self) -> &WorldState {
        &self.world
    }

    fn perform(&mut self, action: &str) -> Result<(), AgentError> {
        self.send(action)?;
        self.absorb_turn()
    }

    fn begin_trial(&mut self) {
        self.trial = true;
    }

    fn end_trial(&mut self) {
        self.trial = false;
    }

    fn commit(&mut self, actions: &[String]) {
        self.actions.extend_from_slice(actions);
    }

    fn begin_event(&mut self) {
        self.firing = true;
    }

    fn end_event(&mut self) {
        self.firing = false;
    }

    fn save_checkpoint(&mut self) {
        let exits = explore::candidates(&self.world, self.protocol);
        self.checkpoints.save(&self.actions, &exits);
        debug::log(
            self.debug_config,
            DebugCategory::Checkpoint,
            LogLevel::Debug,
            &format!(
                "[Checkpoint] saved {} actions, exits {:?}",
                self.actions.len(),
                exits
            ),
        );
    }
}
