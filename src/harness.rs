//! Verification entrypoints tying recorders, classification, and comparison
//! together.

use crate::action::ActionsByVerb;
use crate::compare::{Discrepancy, Expectation};
use crate::recorder::ActionRecorder;
use crate::Result;

/// Verify one backend's recorded actions against an expectation.
///
/// Classification and comparison run inline; the error path is reserved for
/// harness faults (a recorder that cannot enumerate its own log), which
/// abort immediately. Discrepancies never abort; all of them come back in
/// the returned list, and an empty list is a pass.
pub fn verify_actions(
    recorder: &dyn ActionRecorder,
    expect: &Expectation,
) -> Result<Vec<Discrepancy>> {
    let actions = recorder.actions()?;
    let by_verb = ActionsByVerb::partition(actions);
    Ok(expect.compare(&by_verb))
}

/// Test-facing assertion over [`verify_actions`].
///
/// # Panics
///
/// Panics on a harness fault, and on any discrepancy with a report listing
/// every one of them, so a single failing run shows every defect at once.
pub fn assert_actions(recorder: &dyn ActionRecorder, expect: &Expectation) {
    let discrepancies = match verify_actions(recorder, expect) {
        Ok(discrepancies) => discrepancies,
        Err(e) => panic!("failed to enumerate recorded actions: {}", e),
    };

    if !discrepancies.is_empty() {
        let report: Vec<String> = discrepancies.iter().map(|d| d.to_string()).collect();
        panic!(
            "recorded actions did not match expectation:\n{}",
            report.join("\n")
        );
    }
}
