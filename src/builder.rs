//! Builder for constructing pre-loaded recording backends.

use crate::recorder::RecordingClient;
use crate::tracker::ObjectTracker;
use crate::utils::{extract_kind, extract_namespace};
use crate::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Builder for a simulated backend seeded with scenario objects.
///
/// Seeded objects go into the object store directly, so they never appear
/// in the action log; only calls the command under test makes are
/// recorded.
///
/// # Example
///
/// ```rust
/// use kpack_verify::{ActionRecorder, BackendBuilder};
/// use serde_json::json;
///
/// # fn main() -> kpack_verify::Result<()> {
/// let client = BackendBuilder::new()
///     .with_object(json!({
///         "apiVersion": "kpack.io/v1alpha2",
///         "kind": "Builder",
///         "metadata": { "name": "my-builder", "namespace": "default" },
///     }))
///     .build()?;
///
/// assert!(client.actions()?.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct BackendBuilder {
    initial_objects: Vec<Value>,
    fixture_dir: Option<PathBuf>,
}

impl BackendBuilder {
    pub fn new() -> Self {
        Self {
            initial_objects: Vec::new(),
            fixture_dir: None,
        }
    }

    /// Add an initial object to the backend.
    pub fn with_object(mut self, object: Value) -> Self {
        self.initial_objects.push(object);
        self
    }

    /// Add multiple initial objects.
    pub fn with_objects(mut self, objects: Vec<Value>) -> Self {
        self.initial_objects.extend(objects);
        self
    }

    /// Set the base directory for `load_fixture` calls.
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    /// Load initial objects from a YAML fixture file.
    ///
    /// Supports both single-document and multi-document YAML files
    /// (separated by `---`). If a fixture directory was set with
    /// `with_fixture_dir`, the path is relative to that directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML cannot be
    /// parsed.
    pub fn load_fixture(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let fixture_path = match &self.fixture_dir {
            Some(dir) => dir.join(path),
            None => path.as_ref().to_path_buf(),
        };

        let content = std::fs::read_to_string(&fixture_path).map_err(|e| {
            Error::Internal(format!(
                "Failed to read fixture file {:?}: {}",
                fixture_path, e
            ))
        })?;

        use serde::Deserialize;
        for document in serde_yaml::Deserializer::from_str(&content) {
            let mut value = Value::deserialize(document).map_err(|e| {
                Error::Internal(format!("Failed to parse YAML in {:?}: {}", fixture_path, e))
            })?;

            if let Some(metadata) = value.get_mut("metadata").and_then(|m| m.as_object_mut()) {
                if !metadata.contains_key("creationTimestamp") {
                    metadata.insert(
                        "creationTimestamp".to_string(),
                        Value::String(chrono::Utc::now().to_rfc3339()),
                    );
                }

                if !metadata.contains_key("namespace") {
                    metadata.insert(
                        "namespace".to_string(),
                        Value::String("default".to_string()),
                    );
                }
            }

            self.initial_objects.push(value);
        }

        Ok(self)
    }

    /// Load initial objects from multiple YAML fixture files, in order.
    pub fn load_fixtures<P>(mut self, paths: impl IntoIterator<Item = P>) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        for path in paths {
            self = self.load_fixture(path)?;
        }
        Ok(self)
    }

    /// Build a recording backend seeded with the initial objects.
    ///
    /// # Errors
    ///
    /// Returns an error if any initial object fails to be added.
    pub fn build(self) -> Result<RecordingClient> {
        let tracker = ObjectTracker::new();

        for object in self.initial_objects {
            let kind = extract_kind(&object)?;
            let namespace = extract_namespace(&object);

            tracker
                .add(&kind, object, &namespace)
                .map_err(|e| Error::Internal(format!("Failed to add initial object: {}", e)))?;
        }

        Ok(RecordingClient::with_tracker(tracker))
    }
}

impl Default for BackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}
