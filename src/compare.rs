//! Positional comparison of expected vs. observed actions.
//!
//! Commands are required to issue their API calls in a specific order, so
//! comparison is position-by-position rather than set-based, and every
//! discrepancy is accumulated so one test run surfaces every defect.

use crate::action::{Action, ActionsByVerb, Verb};
use serde_json::Value;
use std::fmt;

/// The author-declared expected mutating calls for one test case, in the
/// order they must occur. Creates and updates carry full objects, deletes
/// carry names only. Patches and delete-collections have no expectation
/// channel; any occurrence is always an extra.
#[derive(Debug, Clone, Default)]
pub struct Expectation {
    creates: Vec<Value>,
    updates: Vec<Value>,
    deletes: Vec<String>,
}

impl Expectation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect the next create to carry this object.
    pub fn create(mut self, object: Value) -> Self {
        self.creates.push(object);
        self
    }

    /// Expect the next update to carry this object.
    pub fn update(mut self, object: Value) -> Self {
        self.updates.push(object);
        self
    }

    /// Expect the next delete to target this name.
    pub fn delete(mut self, name: impl Into<String>) -> Self {
        self.deletes.push(name.into());
        self
    }

    /// Compare observed actions against this expectation.
    ///
    /// The walk never stops at a discrepancy; the result holds every
    /// missing, mismatched, and extra entry. An empty result is a pass.
    /// Report order is fixed: creates, deletes, updates, then the
    /// unconditional delete-collection and patch extras.
    pub fn compare(&self, observed: &ActionsByVerb) -> Vec<Discrepancy> {
        let mut discrepancies = Vec::new();

        compare_objects(
            Verb::Create,
            &self.creates,
            &observed.creates,
            &mut discrepancies,
        );
        compare_names(&self.deletes, &observed.deletes, &mut discrepancies);
        compare_objects(
            Verb::Update,
            &self.updates,
            &observed.updates,
            &mut discrepancies,
        );

        for (i, extra) in observed.delete_collections.iter().enumerate() {
            discrepancies.push(Discrepancy {
                verb: Verb::DeleteCollection,
                index: i,
                kind: DiscrepancyKind::Extra {
                    got: Value::String(extra.to_string()),
                },
            });
        }

        for (i, extra) in observed.patches.iter().enumerate() {
            let raw = extra.patch_bytes().unwrap_or_default();
            discrepancies.push(Discrepancy {
                verb: Verb::Patch,
                index: i,
                kind: DiscrepancyKind::Extra {
                    got: Value::String(String::from_utf8_lossy(raw).into_owned()),
                },
            });
        }

        discrepancies
    }
}

fn compare_objects(
    verb: Verb,
    expected: &[Value],
    observed: &[Action],
    out: &mut Vec<Discrepancy>,
) {
    for (i, want) in expected.iter().enumerate() {
        let Some(action) = observed.get(i) else {
            out.push(Discrepancy {
                verb,
                index: i,
                kind: DiscrepancyKind::Missing { want: want.clone() },
            });
            continue;
        };

        let got = action.object().cloned().unwrap_or(Value::Null);
        if !equivalent(want, &got) {
            let diff = diff(want, &got);
            out.push(Discrepancy {
                verb,
                index: i,
                kind: DiscrepancyKind::Mismatch {
                    want: want.clone(),
                    got,
                    diff,
                },
            });
        }
    }

    for (i, extra) in observed.iter().enumerate().skip(expected.len()) {
        out.push(Discrepancy {
            verb,
            index: i,
            kind: DiscrepancyKind::Extra {
                got: extra.object().cloned().unwrap_or(Value::Null),
            },
        });
    }
}

fn compare_names(expected: &[String], observed: &[Action], out: &mut Vec<Discrepancy>) {
    for (i, want) in expected.iter().enumerate() {
        let Some(action) = observed.get(i) else {
            out.push(Discrepancy {
                verb: Verb::Delete,
                index: i,
                kind: DiscrepancyKind::Missing {
                    want: Value::String(want.clone()),
                },
            });
            continue;
        };

        let got = action.name().unwrap_or_default();
        if want != got {
            out.push(Discrepancy {
                verb: Verb::Delete,
                index: i,
                kind: DiscrepancyKind::Mismatch {
                    want: Value::String(want.clone()),
                    got: Value::String(got.to_string()),
                    diff: format!("-{} +{}", want, got),
                },
            });
        }
    }

    for (i, extra) in observed.iter().enumerate().skip(expected.len()) {
        out.push(Discrepancy {
            verb: Verb::Delete,
            index: i,
            kind: DiscrepancyKind::Extra {
                got: Value::String(extra.name().unwrap_or_default().to_string()),
            },
        });
    }
}

/// One reported difference between expected and observed actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrepancy {
    pub verb: Verb,
    pub index: usize,
    pub kind: DiscrepancyKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiscrepancyKind {
    /// An expected call was never observed.
    Missing { want: Value },
    /// Positions align but the payloads differ.
    Mismatch {
        want: Value,
        got: Value,
        diff: String,
    },
    /// An observed call has no corresponding expectation.
    Extra { got: Value },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiscrepancyKind::Missing { want } => {
                write!(f, "Missing {}: {}", self.verb, render(want))
            }
            DiscrepancyKind::Mismatch { diff, .. } => {
                write!(f, "Unexpected {} (-want, +got): {}", self.verb, diff)
            }
            DiscrepancyKind::Extra { got } => {
                write!(f, "Extra {}: {}", self.verb, render(got))
            }
        }
    }
}

// Names and pre-rendered payloads read better without JSON string quoting.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        v => v.to_string(),
    }
}

/// Structural equality that treats absent, null, and empty fields as equal,
/// so default-valued fields on either side never cause false mismatches.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    canonicalize(a) == canonicalize(b)
}

/// Reduce a value to canonical form: null members, empty objects, and empty
/// arrays are pruned recursively, including containers emptied by pruning.
pub fn canonicalize(value: &Value) -> Value {
    prune(value).unwrap_or(Value::Null)
}

fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let pruned: serde_json::Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k.clone(), v)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                None
            } else {
                // Element positions are significant; pruning only applies
                // within each element.
                Some(Value::Array(
                    items
                        .iter()
                        .map(|v| prune(v).unwrap_or(Value::Null))
                        .collect(),
                ))
            }
        }
        v => Some(v.clone()),
    }
}

/// Field-level diff of two values in canonical form, one line per differing
/// path: `path: -<want> +<got>`, with `<absent>` for a missing side.
pub fn diff(want: &Value, got: &Value) -> String {
    let mut lines = Vec::new();
    diff_values("", Some(&canonicalize(want)), Some(&canonicalize(got)), &mut lines);
    lines.join("\n")
}

fn diff_values(path: &str, want: Option<&Value>, got: Option<&Value>, lines: &mut Vec<String>) {
    match (want, got) {
        (Some(Value::Object(w)), Some(Value::Object(g))) => {
            let mut keys: Vec<&String> = w.keys().chain(g.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                diff_values(&join_path(path, key), w.get(key), g.get(key), lines);
            }
        }
        (Some(Value::Array(w)), Some(Value::Array(g))) => {
            for i in 0..w.len().max(g.len()) {
                diff_values(&format!("{}[{}]", path, i), w.get(i), g.get(i), lines);
            }
        }
        (w, g) if w != g => {
            let path = if path.is_empty() { "(root)" } else { path };
            lines.push(format!(
                "{}: -{} +{}",
                path,
                w.map_or("<absent>".to_string(), |v| v.to_string()),
                g.map_or("<absent>".to_string(), |v| v.to_string()),
            ));
        }
        _ => {}
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
