//! Recorded mutating API calls and their classification by verb.

use serde_json::Value;
use std::fmt;

/// The five mutating operation kinds tracked by the harness.
///
/// Read-only verbs (get, list, watch) are never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Update,
    Delete,
    DeleteCollection,
    Patch,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Delete => "delete",
            Verb::DeleteCollection => "delete-collection",
            Verb::Patch => "patch",
        };
        f.write_str(s)
    }
}

/// Payload of a recorded action. The variant matches the verb: objects for
/// create/update, a name for delete, raw bytes for patch.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionPayload {
    Object(Value),
    Name(String),
    Patch(Vec<u8>),
    Collection,
}

/// A single mutating API call as observed by a recording backend.
///
/// The verb and payload are fixed at construction; the constructors pair
/// them correctly so a recorded action can never carry the wrong payload
/// shape for its verb.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub verb: Verb,
    pub kind: String,
    pub namespace: String,
    pub payload: ActionPayload,
}

impl Action {
    pub fn create(kind: impl Into<String>, namespace: impl Into<String>, object: Value) -> Self {
        Self {
            verb: Verb::Create,
            kind: kind.into(),
            namespace: namespace.into(),
            payload: ActionPayload::Object(object),
        }
    }

    pub fn update(kind: impl Into<String>, namespace: impl Into<String>, object: Value) -> Self {
        Self {
            verb: Verb::Update,
            kind: kind.into(),
            namespace: namespace.into(),
            payload: ActionPayload::Object(object),
        }
    }

    pub fn delete(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            verb: Verb::Delete,
            kind: kind.into(),
            namespace: namespace.into(),
            payload: ActionPayload::Name(name.into()),
        }
    }

    pub fn delete_collection(kind: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            verb: Verb::DeleteCollection,
            kind: kind.into(),
            namespace: namespace.into(),
            payload: ActionPayload::Collection,
        }
    }

    pub fn patch(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        patch: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            verb: Verb::Patch,
            kind: kind.into(),
            namespace: namespace.into(),
            payload: ActionPayload::Patch(patch.into()),
        }
    }

    /// The created or updated object, if this action carries one.
    pub fn object(&self) -> Option<&Value> {
        match &self.payload {
            ActionPayload::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The deleted name, if this action carries one.
    pub fn name(&self) -> Option<&str> {
        match &self.payload {
            ActionPayload::Name(name) => Some(name),
            _ => None,
        }
    }

    /// The raw patch bytes, if this action carries them.
    pub fn patch_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            ActionPayload::Patch(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} in namespace {}", self.verb, self.kind, self.namespace)?;
        match &self.payload {
            ActionPayload::Object(obj) => write!(f, ": {}", obj),
            ActionPayload::Name(name) => write!(f, ": {}", name),
            ActionPayload::Patch(bytes) => {
                write!(f, ": {}", String::from_utf8_lossy(bytes))
            }
            ActionPayload::Collection => Ok(()),
        }
    }
}

/// An action history partitioned into per-verb ordered sequences.
///
/// Each bucket preserves the relative order in which its actions were
/// recorded. The partition is exhaustive: every action lands in exactly
/// one bucket and none are dropped.
#[derive(Debug, Clone, Default)]
pub struct ActionsByVerb {
    pub creates: Vec<Action>,
    pub updates: Vec<Action>,
    pub deletes: Vec<Action>,
    pub delete_collections: Vec<Action>,
    pub patches: Vec<Action>,
}

impl ActionsByVerb {
    pub fn partition(actions: Vec<Action>) -> Self {
        let mut by_verb = Self::default();
        by_verb.extend(actions);
        by_verb
    }

    pub(crate) fn extend(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action.verb {
                Verb::Create => self.creates.push(action),
                Verb::Update => self.updates.push(action),
                Verb::Delete => self.deletes.push(action),
                Verb::DeleteCollection => self.delete_collections.push(action),
                Verb::Patch => self.patches.push(action),
            }
        }
    }

    /// Total number of actions across all buckets.
    pub fn len(&self) -> usize {
        self.creates.len()
            + self.updates.len()
            + self.deletes.len()
            + self.delete_collections.len()
            + self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
