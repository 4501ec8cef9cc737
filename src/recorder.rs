//! Recording decorator composed around the simulated backend.
//!
//! Every mutating call is appended to an action log as a side effect of the
//! normal call path; the harness itself depends only on the `ActionRecorder`
//! trait, so any backend stub can be wired in as long as it can enumerate
//! the actions it observed.

use crate::action::{Action, ActionsByVerb};
use crate::tracker::ObjectTracker;
use crate::utils::extract_kind;
use crate::{Error, Result};
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::trace;

/// A source of recorded actions.
///
/// Enumeration failure is a harness fault: the caller aborts the test case
/// instead of accumulating it as a discrepancy.
pub trait ActionRecorder {
    fn actions(&self) -> Result<Vec<Action>>;
}

/// Append-only, order-preserving log of the actions one backend observed.
///
/// The log grows monotonically for the lifetime of a test case; entries are
/// never reordered or deduplicated.
#[derive(Clone, Default)]
pub struct ActionLog {
    actions: Arc<RwLock<Vec<Action>>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action unconditionally, in call order.
    pub fn record(&self, action: Action) {
        trace!("Recording action: {}", action);
        let mut actions = self.actions.write().unwrap_or_else(|e| e.into_inner());
        actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActionRecorder for ActionLog {
    fn actions(&self) -> Result<Vec<Action>> {
        let actions = self
            .actions
            .read()
            .map_err(|_| Error::Internal("action log lock poisoned".to_string()))?;
        Ok(actions.clone())
    }
}

/// A simulated API backend that records every mutating call it receives.
///
/// The action is appended before the backend executes it, so the log holds
/// the payload exactly as the command submitted it and keeps the entry even
/// when the backend rejects the call. Read-only calls (get, list) are
/// delegated without recording.
pub struct RecordingClient {
    tracker: ObjectTracker,
    log: ActionLog,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            tracker: ObjectTracker::new(),
            log: ActionLog::new(),
        }
    }

    pub(crate) fn with_tracker(tracker: ObjectTracker) -> Self {
        Self {
            tracker,
            log: ActionLog::new(),
        }
    }

    /// The underlying object store, for scenario assertions on final state.
    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }

    pub fn create(&self, namespace: &str, object: Value) -> Result<Value> {
        let kind = extract_kind(&object)?;
        self.log
            .record(Action::create(&kind, namespace, object.clone()));
        self.tracker.create(&kind, object, namespace)
    }

    pub fn update(&self, namespace: &str, object: Value) -> Result<Value> {
        let kind = extract_kind(&object)?;
        self.log
            .record(Action::update(&kind, namespace, object.clone()));
        self.tracker.update(&kind, object, namespace)
    }

    pub fn delete(&self, kind: &str, namespace: &str, name: &str) -> Result<Value> {
        self.log.record(Action::delete(kind, namespace, name));
        self.tracker.delete(kind, namespace, name)
    }

    pub fn delete_collection(&self, kind: &str, namespace: &str) -> Result<Vec<Value>> {
        self.log.record(Action::delete_collection(kind, namespace));
        self.tracker.delete_collection(kind, namespace)
    }

    pub fn patch(&self, kind: &str, namespace: &str, name: &str, patch: &[u8]) -> Result<Value> {
        self.log.record(Action::patch(kind, namespace, patch));
        let patch: Value = serde_json::from_slice(patch)?;
        self.tracker.patch(kind, namespace, name, &patch)
    }

    pub fn get(&self, kind: &str, namespace: &str, name: &str) -> Result<Value> {
        self.tracker.get(kind, namespace, name)
    }

    pub fn list(&self, kind: &str, namespace: Option<&str>) -> Result<Vec<Value>> {
        self.tracker.list(kind, namespace)
    }
}

impl ActionRecorder for RecordingClient {
    fn actions(&self) -> Result<Vec<Action>> {
        self.log.actions()
    }
}

impl Default for RecordingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RecordingClient {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            log: self.log.clone(),
        }
    }
}

/// A set of simulated backends whose histories are classified together.
///
/// Each backend's log is partitioned independently and appended bucket by
/// bucket in backend order; no total order is imposed across backends.
pub struct ActionRecorderList(pub Vec<Arc<dyn ActionRecorder>>);

impl ActionRecorderList {
    pub fn actions_by_verb(&self) -> Result<ActionsByVerb> {
        let mut by_verb = ActionsByVerb::default();
        for recorder in &self.0 {
            by_verb.extend(recorder.actions()?);
        }
        Ok(by_verb)
    }
}
