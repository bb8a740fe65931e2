//! Tri-state outcome of an evaluation node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of evaluating one node.
///
/// `Skipped` is reserved for nodes the engine declined to run; it is never
/// produced by a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    True,
    False,
    Skipped,
}

impl Outcome {
    /// Map a predicate result onto an outcome.
    pub fn from_bool(passed: bool) -> Self {
        if passed { Outcome::True } else { Outcome::False }
    }

    /// Swap `True` and `False`. `Skipped` stays `Skipped`.
    pub fn negate(self) -> Self {
        match self {
            Outcome::True => Outcome::False,
            Outcome::False => Outcome::True,
            Outcome::Skipped => Outcome::Skipped,
        }
    }

    pub fn is_true(self) -> bool {
        self == Outcome::True
    }

    pub fn is_false(self) -> bool {
        self == Outcome::False
    }

    pub fn is_skipped(self) -> bool {
        self == Outcome::Skipped
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::True => "true",
            Outcome::False => "false",
            Outcome::Skipped => "skipped",
        }
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        Outcome::from_bool(passed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation_keeps_skipped() {
        assert_eq!(Outcome::True.negate(), Outcome::False);
        assert_eq!(Outcome::False.negate(), Outcome::True);
        assert_eq!(Outcome::Skipped.negate(), Outcome::Skipped);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_value(Outcome::Skipped).unwrap();
        assert_eq!(json, "skipped");
        assert_eq!(Outcome::from(true), Outcome::True);
    }
}
