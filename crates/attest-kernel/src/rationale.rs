//! Human-readable explanation attached to every evaluation node.

use serde::{Deserialize, Serialize};

/// Expectation recorded for nodes that were never run.
pub const SKIPPED_EXPECTED: &str = "not evaluated";

/// Actual value recorded for nodes that were never run.
pub const SKIPPED_ACTUAL: &str = "skipped";

/// Why a node produced its outcome: what was expected, what was observed,
/// and an optional hint for the reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rationale {
    expected: String,
    actual: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl Rationale {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Fixed placeholder for a node that was skipped. The cause becomes the hint.
    pub fn skipped(cause: &str) -> Self {
        Self::new(SKIPPED_EXPECTED, SKIPPED_ACTUAL).with_hint(cause)
    }

    /// Rationale seen through a negation: `expected` and `hint` are wrapped in
    /// `not[...]`, `actual` is unchanged.
    pub fn negated(&self) -> Self {
        Self {
            expected: format!("not[{}]", self.expected),
            actual: self.actual.clone(),
            hint: self.hint.as_ref().map(|hint| format!("not[{hint}]")),
        }
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_skip_placeholder(&self) -> bool {
        self.expected == SKIPPED_EXPECTED && self.actual == SKIPPED_ACTUAL
    }
}

/// Produces a [`Rationale`] from a subject and the predicate result.
///
/// Invoked once per evaluated terminal, right after its predicate runs.
/// Never invoked for skipped nodes.
pub trait RationaleGenerator<T>: Send + Sync {
    fn generate(&self, subject: &T, passed: bool) -> Rationale;
}

impl<T, F> RationaleGenerator<T> for F
where
    F: Fn(&T, bool) -> Rationale + Send + Sync,
{
    fn generate(&self, subject: &T, passed: bool) -> Rationale {
        self(subject, passed)
    }
}
