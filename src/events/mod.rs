//! Event graph
//!
//! Events are puzzle triggers. Each has a precondition over the world, the
//! commands that solve it, and effects on which other events are open. The
//! [`OpenEventSet`] holds the events currently being watched, in insertion
//! order; [`evaluate`] fires every open event whose precondition holds.

use crate::agent::Executor;
use crate::debug::{self, DebugCategory, DebugConfig, LogLevel};
use crate::error::AgentError;
use crate::solver::OrderingSearch;
use crate::types::WorldState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod catalogue;


/// Name of an event in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Condition under which an event is ready to fire
///
/// Evaluation is a plain boolean test and never fails; "not yet" is the
/// normal answer for most events on most turns.
#[derive(Debug, Clone)]
pub enum Precondition {
    /// The current turn's text contains the string
    TextContains(String),
    /// Every listed item is in the inventory
    Holds(Vec<String>),
    /// Exactly `count` held items have names containing `needle`
    HoldsCount { needle: String, count: usize },
    /// Arbitrary test
    Custom(fn(&WorldState) -> bool),
}

impl Precondition {
    pub fn text_contains(needle: impl Into<String>) -> Self {
        Self::TextContains(needle.into())
    }

    pub fn holds<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Holds(items.into_iter().map(Into::into).collect())
    }

    pub fn holds_count(needle: impl Into<String>, count: usize) -> Self {
        Self::HoldsCount {
            needle: needle.into(),
            count,
        }
    }

    pub fn is_met(&self, world: &WorldState) -> bool {
        match self {
            Self::TextContains(needle) => world.text_contains(needle),
            Self::Holds(items) => items.iter().all(|item| world.holds(item)),
            Self::HoldsCount { needle, count } => world.count_holding(needle) == *count,
            Self::Custom(test) => test(world),
        }
    }
}

/// Where an event's commands come from
#[derive(Debug, Clone)]
pub enum ActionProvider {
    /// Issue the listed commands in order
    StaticActions(Vec<String>),
    /// The listed commands are correct but their order is not known;
    /// find it by trial on the live session
    OrderingSearch {
        seed: Vec<String>,
        search: OrderingSearch,
    },
}

/// Commands produced by an [`ActionProvider`]
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPlan {
    /// Not sent yet; the evaluator issues them
    Issue(Vec<String>),
    /// Already sent during a trial and appended to the durable log
    Committed(Vec<String>),
}

impl ActionPlan {
    pub fn actions(&self) -> &[String] {
        match self {
            Self::Issue(actions) | Self::Committed(actions) => actions,
        }
    }
}

impl ActionProvider {
    /// Work out the command sequence for this firing
    pub fn resolve_actions<E: Executor + ?Sized>(
        &self,
        executor: &mut E,
        debug_config: &DebugConfig,
    ) -> Result<ActionPlan, AgentError> {
        match self {
            Self::StaticActions(actions) => Ok(ActionPlan::Issue(actions.clone())),
            Self::OrderingSearch { seed, search } => search
                .solve(seed, executor, debug_config)
                .map(ActionPlan::Committed),
        }
    }
}

/// A puzzle trigger
#[derive(Debug, Clone)]
pub struct Event {
    pub id: EventId,
    pub precondition: Precondition,
    pub provider: ActionProvider,
    /// Completion message, logged when the event resolves
    pub toast: String,
    pub unlocks: Vec<EventId>,
    pub locks: Vec<EventId>,
    /// Repeatable events stay open after firing and do not checkpoint
    pub repeatable: bool,
}

impl Event {
    /// A one-shot event with no commands and no effects yet
    pub fn new(id: impl Into<EventId>, toast: impl Into<String>, precondition: Precondition) -> Self {
        Self {
            id: id.into(),
            precondition,
            provider: ActionProvider::StaticActions(Vec::new()),
            toast: toast.into(),
            unlocks: Vec::new(),
            locks: Vec::new(),
            repeatable: false,
        }
    }

    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider = ActionProvider::StaticActions(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Search for the order of `seed` instead of issuing it as listed
    pub fn ordering_search<I, S>(mut self, seed: I, search: OrderingSearch) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider = ActionProvider::OrderingSearch {
            seed: seed.into_iter().map(Into::into).collect(),
            search,
        };
        self
    }

    pub fn unlocks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EventId>,
    {
        self.unlocks.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn locks<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EventId>,
    {
        self.locks.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

/// All known events, by id
#[derive(Debug, Clone, Default)]
pub struct EventCatalogue {
    events: HashMap<EventId, Event>,
}

impl EventCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event, replacing any previous one with the same id
    pub fn insert(&mut self, event: Event) {
        self.events.insert(event.id.clone(), event);
    }

    pub fn with(mut self, event: Event) -> Self {
        self.insert(event);
        self
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Check that every reference, including the open set, names a known event
    pub fn validate(&self, open: &OpenEventSet) -> Result<(), AgentError> {
        for id in open.iter() {
            if !self.events.contains_key(id) {
                return Err(AgentError::undefined_event(id.clone(), "open event set"));
            }
        }

        let mut ids: Vec<&EventId> = self.events.keys().collect();
        ids.sort();
        for id in ids {
            let event = &self.events[id];
            for target in event.unlocks.iter().chain(event.locks.iter()) {
                if !self.events.contains_key(target) {
                    return Err(AgentError::undefined_event(target.clone(), id.as_str()));
                }
            }
        }
        Ok(())
    }
}

/// Events currently watched, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenEventSet {
    ids: Vec<EventId>,
}

impl OpenEventSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<EventId>,
    {
        let mut set = Self::default();
        for id in ids {
            set.insert(id.into());
        }
        set
    }

    /// Append `id` unless it is already open; returns whether it was added
    pub fn insert(&mut self, id: EventId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id` if present; returns whether it was open
    pub fn remove(&mut self, id: &EventId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|open| open != id);
        before != self.ids.len()
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.ids.iter().any(|open| open == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Record of one event firing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub event: EventId,
    pub toast: String,
    /// Commands that solved the event, in the order they took effect
    pub actions: Vec<String>,
}

/// Fire every open event whose precondition holds
///
/// Events are visited in the order the set had on entry. An event locked by
/// an earlier resolution in the same pass is skipped; an event unlocked
/// during the pass is first considered on the next call. Each resolution is
/// pushed to `resolved` as soon as its effects apply, so a death later in the
/// pass does not lose it.
pub fn evaluate<E: Executor + ?Sized>(
    catalogue: &EventCatalogue,
    open: &mut OpenEventSet,
    executor: &mut E,
    resolved: &mut Vec<Resolution>,
    debug_config: &DebugConfig,
) -> Result<(), AgentError> {
    let snapshot: Vec<EventId> = open.iter().cloned().collect();

    for id in snapshot {
        if !open.contains(&id) {
            continue;
        }
        let event = catalogue
            .get(&id)
            .ok_or_else(|| AgentError::undefined_event(id.clone(), "open event set"))?;
        if !event.precondition.is_met(executor.world()) {
            continue;
        }

        debug::log(
            debug_config,
            DebugCategory::Events,
            LogLevel::Debug,
            &format!("[Event] '{}' is ready", id),
        );

        executor.begin_event();
        let fired = fire(event, executor, debug_config);
        executor.end_event();
        let plan = fired?;

        debug::log(
            debug_config,
            DebugCategory::Events,
            LogLevel::Info,
            &event.toast,
        );

        for locked in &event.locks {
            open.remove(locked);
        }
        for unlocked in &event.unlocks {
            open.insert(unlocked.clone());
        }
        if !event.repeatable {
            open.remove(&id);
            executor.save_checkpoint();
        }

        resolved.push(Resolution {
            event: id,
            toast: event.toast.clone(),
            actions: plan.actions().to_vec(),
        });
    }

    Ok(())
}

fn fire<E: Executor + ?Sized>(
    event: &Event,
    executor: &mut E,
    debug_config: &DebugConfig,
) -> Result<ActionPlan, AgentError> {
    let plan = event.provider.resolve_actions(executor, debug_config)?;
    if let ActionPlan::Issue(actions) = &plan {
        for action in actions {
            executor.perform(action)?;
        }
    }
    Ok(plan)
}
