//! # State Manager
//!
//! Owns the [`LayoutState`] and is the only path through which it changes.
//!
//! ```text
//! dispatch(action) ─→ validate ─→ apply ─→ record history ─→ notify listeners
//!                        │
//!                        └─ rejected: logged, state untouched, nobody notified
//! ```
//!
//! Listeners run synchronously, in subscription order, after the state is
//! fully updated. A listener receives a shared borrow, so it can read but
//! never mutate the state it is told about.

use serde_json::Value;
use tracing::{debug, warn};

use crate::actions::{Action, ActionError};
use crate::model::LayoutState;
use crate::undo_stack::UndoStack;

/// Handle returned by [`StateManager::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&LayoutState)>;

pub struct StateManager {
    state: LayoutState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    history: UndoStack,
    /// Bumped on every applied action
    version: u64,
}

impl StateManager {
    pub fn new(initial: LayoutState) -> Self {
        Self::with_history_limit(initial, 50)
    }

    pub fn with_history_limit(initial: LayoutState, max_undo_levels: usize) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
            next_subscription: 1,
            history: UndoStack::with_max_levels(max_undo_levels),
            version: 0,
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> LayoutState {
        self.state.clone()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply an action. Returns `false` if it was rejected.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match self.try_dispatch(action) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Action rejected");
                false
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) but hands the rejection back
    pub fn try_dispatch(&mut self, action: Action) -> Result<(), ActionError> {
        debug!(action = action.name(), "Dispatching action");

        action.validate(&self.state)?;
        let before = self.state.clone();
        action.apply(&mut self.state)?;

        self.version += 1;
        if self.state != before {
            self.history.record(before, action.description());
        }

        self.notify();
        Ok(())
    }

    /// Dispatch an action object coming from outside (`{ "type", "payload" }`)
    ///
    /// Unknown action types are logged and ignored.
    pub fn dispatch_value(&mut self, value: Value) -> bool {
        match Action::from_value(value) {
            Ok(action) => self.dispatch(action),
            Err(ActionError::UnknownType(kind)) => {
                warn!(action = %kind, "Ignoring unknown action type");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ignoring malformed action");
                false
            }
        }
    }

    pub fn dispatch_json(&mut self, source: &str) -> bool {
        match serde_json::from_str::<Value>(source) {
            Ok(value) => self.dispatch_value(value),
            Err(e) => {
                warn!(error = %e, "Ignoring action that is not valid JSON");
                false
            }
        }
    }

    /// Register a listener called after every applied action
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&LayoutState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; `false` if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    /// Replace the whole state (initial load); history starts over
    pub fn reset(&mut self, state: LayoutState) {
        self.state = state;
        self.history.clear();
        self.version += 1;
        self.notify();
    }

    /// Group the following dispatches into a single undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                debug!("Undo");
                self.state = previous;
                self.version += 1;
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                debug!("Redo");
                self.state = next;
                self.version += 1;
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new(LayoutState::default())
    }
}
