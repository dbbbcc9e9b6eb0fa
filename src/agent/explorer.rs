//! Life-to-life driver

use super::{Executor, Life};
use crate::checkpoint::CheckpointManager;
use crate::config::AgentConfig;
use crate::debug::{self, DebugCategory, DebugConfig, LogLevel};
use crate::error::{AgentError, SessionError};
use crate::events::{self, EventCatalogue, OpenEventSet, Resolution, catalogue};
use crate::explore::ExplorationPolicy;
use crate::session::Session;
use crate::storage::{self, Progress};
use crate::types::Checkpoint;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// How a life ended
#[derive(Debug, Clone, PartialEq)]
pub enum LifeOutcome {
    /// No open events remain
    Completed { final_text: String },
    /// The engine reported a death; the next life restores the checkpoint
    Died { message: String },
}

/// Result of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub lives: usize,
    pub resolutions: Vec<Resolution>,
    pub final_text: String,
}

/// Owner of the open events, the checkpoint and the exploration policy
pub struct Explorer<R: Rng = StdRng> {
    catalogue: EventCatalogue,
    open: OpenEventSet,
    checkpoints: CheckpointManager,
    policy: ExplorationPolicy<R>,
    config: AgentConfig,
    resolutions: Vec<Resolution>,
    lives: usize,
}

impl Explorer<StdRng> {
    /// Explorer for the built-in puzzle catalogue
    pub fn standard(config: AgentConfig) -> Result<Self, AgentError> {
        let (catalogue, open) = catalogue::standard();
        Self::new(catalogue, open, config)
    }

    pub fn new(
        catalogue: EventCatalogue,
        open: OpenEventSet,
        config: AgentConfig,
    ) -> Result<Self, AgentError> {
        let policy = ExplorationPolicy::seeded(config.seed, config.protocol.clone());
        Self::with_policy(catalogue, open, policy, config)
    }
}

impl<R: Rng> Explorer<R> {
    /// Explorer with an explicit policy, checking the catalogue first
    pub fn with_policy(
        catalogue: EventCatalogue,
        open: OpenEventSet,
        policy: ExplorationPolicy<R>,
        config: AgentConfig,
    ) -> Result<Self, AgentError> {
        catalogue.validate(&open)?;
        Ok(Self {
            catalogue,
            open,
            checkpoints: CheckpointManager::new(),
            policy,
            config,
            resolutions: Vec::new(),
            lives: 0,
        })
    }

    /// Continue a run saved by an earlier process
    ///
    /// The stored open set replaces the catalogue's starting one, so events
    /// solved before the save stay solved.
    pub fn resume(mut self, progress: Progress) -> Result<Self, AgentError> {
        self.catalogue.validate(&progress.open)?;
        self.checkpoints = CheckpointManager::from_checkpoint(progress.checkpoint);
        self.open = progress.open;
        Ok(self)
    }

    pub fn open_events(&self) -> &OpenEventSet {
        &self.open
    }

    pub fn checkpoints(&self) -> &CheckpointManager {
        &self.checkpoints
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Lives started so far
    pub fn lives(&self) -> usize {
        self.lives
    }

    pub fn is_complete(&self) -> bool {
        self.open.is_empty()
    }

    /// Play one life on a fresh session
    ///
    /// Replays the checkpoint when there is one, then explores until the
    /// open set is empty or the engine reports a death. Any other error ends
    /// the run.
    pub fn play_life<S: Session>(&mut self, session: S) -> Result<LifeOutcome, AgentError> {
        self.lives += 1;
        let Self {
            catalogue,
            open,
            checkpoints,
            policy,
            config,
            resolutions,
            lives,
        } = self;

        debug::log(
            &config.debug,
            DebugCategory::Checkpoint,
            LogLevel::Info,
            &format!("[Life] starting life {}", lives),
        );

        let checkpoint = checkpoints.restore();
        let mut life = Life::new(session, checkpoints, &config.protocol, &config.debug);

        let lived = live(
            &mut life,
            checkpoint.as_ref(),
            catalogue,
            open,
            policy,
            resolutions,
            &config.debug,
        );

        match lived {
            Ok(final_text) => Ok(LifeOutcome::Completed { final_text }),
            Err(AgentError::Death { message }) => {
                debug::log(
                    &config.debug,
                    DebugCategory::Checkpoint,
                    LogLevel::Info,
                    &format!("[Life] life {} ended: {}", lives, message),
                );
                Ok(LifeOutcome::Died { message })
            }
            Err(err) => Err(err),
        }
    }

    /// Play lives on sessions from `spawn` until every event is resolved
    ///
    /// A resumed run with nothing left open returns without spawning.
    pub fn run<S, F>(&mut self, mut spawn: F) -> Result<RunSummary, AgentError>
    where
        S: Session,
        F: FnMut() -> Result<S, SessionError>,
    {
        loop {
            if self.is_complete() {
                return Ok(RunSummary {
                    lives: self.lives,
                    resolutions: self.resolutions.clone(),
                    final_text: String::new(),
                });
            }
            if let Some(max_lives) = self.config.max_lives
                && self.lives >= max_lives
            {
                return Err(AgentError::LivesExhausted { lives: self.lives });
            }

            let session = spawn()?;
            let outcome = self.play_life(session);
            self.persist_checkpoint();

            match outcome? {
                LifeOutcome::Completed { final_text } => {
                    return Ok(RunSummary {
                        lives: self.lives,
                        resolutions: self.resolutions.clone(),
                        final_text,
                    });
                }
                LifeOutcome::Died { .. } => continue,
            }
        }
    }

    fn persist_checkpoint(&self) {
        let (Some(path), Some(checkpoint)) =
            (&self.config.checkpoint_path, self.checkpoints.current())
        else {
            return;
        };

        let progress = Progress::new(checkpoint.clone(), self.open.clone());
        if let Err(err) = storage::write_file(path, &progress) {
            debug::log(
                &self.config.debug,
                DebugCategory::Checkpoint,
                LogLevel::Warn,
                &format!("[Checkpoint] could not persist to {}: {}", path.display(), err),
            );
        }
    }
}

fn live<S: Session, R: Rng>(
    life: &mut Life<'_, S>,
    checkpoint: Option<&Checkpoint>,
    catalogue: &EventCatalogue,
    open: &mut OpenEventSet,
    policy: &mut ExplorationPolicy<R>,
    resolutions: &mut Vec<Resolution>,
    debug_config: &DebugConfig,
) -> Result<String, AgentError> {
    if let Some(checkpoint) = checkpoint {
        life.replay(checkpoint, policy)?;
    }

    loop {
        life.absorb_turn()?;
        events::evaluate(catalogue, open, life, resolutions, debug_config)?;
        if open.is_empty() {
            return Ok(life.world().text.clone());
        }
        let direction = policy.next_move(life.world())?;
        life.step(direction)?;
    }
}
