//! Action-recording verification harness for CLI commands that drive
//! Kubernetes custom resources.
//!
//! Commands under test run against an in-memory simulated backend that
//! records every mutating call (create, update, delete, delete-collection,
//! patch) in call order. The harness partitions the recorded history by
//! verb and compares each sequence position-by-position against the
//! expected calls declared by the test author, accumulating every missing,
//! mismatched, and extra entry instead of stopping at the first.
//!
//! # Examples
//!
//! ## Verifying a command's mutating calls
//!
//! ```rust
//! use kpack_verify::{assert_actions, BackendBuilder, Expectation};
//! use serde_json::json;
//!
//! # fn main() -> kpack_verify::Result<()> {
//! let client = BackendBuilder::new().build()?;
//!
//! let image = json!({
//!     "apiVersion": "kpack.io/v1alpha2",
//!     "kind": "Image",
//!     "metadata": { "name": "my-image", "namespace": "default" },
//!     "spec": { "tag": "registry.example.com/my-image" },
//! });
//!
//! // The command under test would issue this call.
//! client.create("default", image.clone())?;
//!
//! assert_actions(&client, &Expectation::new().create(image));
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting discrepancies directly
//!
//! ```rust
//! use kpack_verify::{verify_actions, BackendBuilder, Expectation};
//! use serde_json::json;
//!
//! # fn main() -> kpack_verify::Result<()> {
//! let client = BackendBuilder::new()
//!     .with_object(json!({
//!         "apiVersion": "kpack.io/v1alpha2",
//!         "kind": "Builder",
//!         "metadata": { "name": "old-builder", "namespace": "default" },
//!     }))
//!     .build()?;
//!
//! client.delete("Builder", "default", "old-builder")?;
//!
//! // The expectation is empty, so the observed delete is an extra.
//! let discrepancies = verify_actions(&client, &Expectation::new())?;
//! assert_eq!(discrepancies.len(), 1);
//! assert_eq!(discrepancies[0].to_string(), "Extra delete: old-builder");
//! # Ok(())
//! # }
//! ```

mod action;
mod builder;
mod compare;
mod error;
mod harness;
mod recorder;
mod status;
mod tracker;
mod utils;

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod harness_test;
#[cfg(test)]
mod recorder_test;

pub use action::{Action, ActionPayload, ActionsByVerb, Verb};
pub use builder::BackendBuilder;
pub use compare::{canonicalize, diff, equivalent, Discrepancy, DiscrepancyKind, Expectation};
pub use error::{Error, Result};
pub use harness::{assert_actions, verify_actions};
pub use recorder::{ActionLog, ActionRecorder, ActionRecorderList, RecordingClient};
pub use status::{
    display_builder_status, BuilderStack, BuildpackMetadata, BuildpackRef, Condition,
    CustomBuilder, CustomBuilderSpec, CustomBuilderStatus, OrderEntry, StatusWriter, TableWriter,
};
pub use tracker::ObjectTracker;
