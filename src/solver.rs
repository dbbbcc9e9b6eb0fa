//! Ordering search
//!
//! Some puzzles accept a known set of commands only in one unknown order,
//! and only the engine can tell whether an order is right. The search tries
//! permutations on the live session in trial mode: commands are sent and
//! their turns absorbed, but nothing reaches the durable action log until a
//! whole permutation goes through without the failure marker.

use crate::agent::Executor;
use crate::debug::{self, DebugCategory, DebugConfig, LogLevel};
use crate::error::AgentError;

/// Trial-and-error search over the orderings of a command set
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingSearch {
    failure_marker: String,
    recovery: Vec<String>,
}

impl OrderingSearch {
    /// `failure_marker` in a turn's text means the attempt failed and the
    /// `recovery` commands must run before the next one
    pub fn new<I, S>(failure_marker: impl Into<String>, recovery: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failure_marker: failure_marker.into(),
            recovery: recovery.into_iter().map(Into::into).collect(),
        }
    }

    /// Find the accepted order of `seed` and commit it to the durable log
    ///
    /// The returned commands have already been sent; callers must not send
    /// them again.
    pub fn solve<E: Executor + ?Sized>(
        &self,
        seed: &[String],
        executor: &mut E,
        debug_config: &DebugConfig,
    ) -> Result<Vec<String>, AgentError> {
        executor.begin_trial();
        let outcome = self.search(seed, executor, debug_config);
        executor.end_trial();

        let accepted = outcome?;
        executor.commit(&accepted);
        Ok(accepted)
    }

    fn search<E: Executor + ?Sized>(
        &self,
        seed: &[String],
        executor: &mut E,
        debug_config: &DebugConfig,
    ) -> Result<Vec<String>, AgentError> {
        let mut tried = 0;

        for candidate in Permutations::new(seed) {
            tried += 1;
            debug::log(
                debug_config,
                DebugCategory::Solver,
                LogLevel::Debug,
                &format!("[Solver] attempt {}: {:?}", tried, candidate),
            );

            let mut trial = Trial::new(candidate);
            loop {
                match trial.advance(executor, &self.failure_marker)? {
                    TrialMode::Pending { .. } => continue,
                    TrialMode::Committed => {
                        debug::log(
                            debug_config,
                            DebugCategory::Solver,
                            LogLevel::Info,
                            &format!("[Solver] accepted after {} attempts", tried),
                        );
                        return Ok(trial.into_actions());
                    }
                    TrialMode::Aborted { at } => {
                        debug::log(
                            debug_config,
                            DebugCategory::Solver,
                            LogLevel::Trace,
                            &format!("[Solver] rejected at step {}, recovering", at + 1),
                        );
                        for action in &self.recovery {
                            executor.perform(action)?;
                        }
                        break;
                    }
                }
            }
        }

        Err(AgentError::ExhaustedSearch {
            actions: seed.to_vec(),
            tried,
        })
    }
}

/// Progress of one candidate ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialMode {
    /// `next` is the index of the command to send next
    Pending { next: usize },
    /// Every command went through without the failure marker
    Committed,
    /// The failure marker followed the command at `at`
    Aborted { at: usize },
}

/// One candidate ordering being tried on the live session
#[derive(Debug, Clone)]
pub struct Trial {
    candidate: Vec<String>,
    mode: TrialMode,
}

impl Trial {
    pub fn new(candidate: Vec<String>) -> Self {
        Self {
            candidate,
            mode: TrialMode::Pending { next: 0 },
        }
    }

    pub fn mode(&self) -> TrialMode {
        self.mode
    }

    /// Send the next pending command and classify the result
    ///
    /// Finished trials are left as they are.
    pub fn advance<E: Executor + ?Sized>(
        &mut self,
        executor: &mut E,
        failure_marker: &str,
    ) -> Result<TrialMode, AgentError> {
        let TrialMode::Pending { next } = self.mode else {
            return Ok(self.mode);
        };

        if next >= self.candidate.len() {
            self.mode = TrialMode::Committed;
            return Ok(self.mode);
        }

        executor.perform(&self.candidate[next])?;
        self.mode = if executor.world().text_contains(failure_marker) {
            TrialMode::Aborted { at: next }
        } else if next + 1 == self.candidate.len() {
            TrialMode::Committed
        } else {
            TrialMode::Pending { next: next + 1 }
        };
        Ok(self.mode)
    }

    pub fn into_actions(self) -> Vec<String> {
        self.candidate
    }
}

/// Lazy lexicographic permutations of a slice, by position
///
/// The first item is the slice in its given order. A slice of `n` elements
/// yields `n!` permutations; an empty slice yields one empty permutation.
pub struct Permutations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T: Clone> Permutations<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            indices: (0..items.len()).collect(),
            done: false,
        }
    }

    fn step(&mut self) {
        let indices = &mut self.indices;
        let Some(pivot) = (1..indices.len())
            .rev()
            .find(|&i| indices[i - 1] < indices[i])
            .map(|i| i - 1)
        else {
            self.done = true;
            return;
        };

        let successor = (pivot + 1..indices.len())
            .rev()
            .find(|&j| indices[j] > indices[pivot])
            .unwrap_or(pivot + 1);
        indices.swap(pivot, successor);
        indices[pivot + 1..].reverse();
    }
}

impl<T: Clone> Iterator for Permutations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let current = self.indices.iter().map(|&i| self.items[i].clone()).collect();
        self.step();
        Some(current)
    }
}
