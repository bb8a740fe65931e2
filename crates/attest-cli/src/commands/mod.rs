pub mod check;
pub mod eval;

use attest_kernel::Evaluation;
use serde_json::{Value, json};

pub const PAYLOAD_SCHEMA: u64 = 1;

/// JSON payload shared by `eval` and `check`.
///
/// `rootCause` and `chain` are null unless the outcome is false.
pub fn evaluation_payload(kind: &str, rules_path: &str, evaluation: &Evaluation) -> Value {
    let cause = evaluation.failed().then(|| evaluation.root_cause()).flatten();
    let evaluation_json = serde_json::to_value(evaluation).unwrap_or_else(|err| {
        eprintln!("error: failed to render evaluation: {err}");
        std::process::exit(2);
    });
    json!({
        "schema": PAYLOAD_SCHEMA,
        "kind": kind,
        "rulesPath": rules_path,
        "outcome": evaluation.outcome(),
        "rootCause": cause.as_ref().map(|cause| cause.name()),
        "chain": cause.as_ref().map(|cause| cause.chain()),
        "fingerprint": evaluation.fingerprint(),
        "evaluation": evaluation_json,
    })
}
