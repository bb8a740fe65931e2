//! The short-circuiting algorithm shared by AND, OR, NAND and NOR.
//!
//! Every combinator runs the same loop over its children in insertion order.
//! Two policies distinguish them:
//!
//! - a **skip predicate** consulted against the tally of the children seen so
//!   far; once it holds, every remaining child is skipped without running;
//! - a **result rule** applied to the final tally.
//!
//! | Combinator | Skip once             | Result                  |
//! |------------|-----------------------|-------------------------|
//! | AND        | a child failed        | all passed              |
//! | OR         | a child passed        | some child passed       |
//! | NAND       | a child failed        | not(AND)                |
//! | NOR        | a child passed        | not(OR)                 |
//!
//! Empty child lists are vacuously true for AND and OR.

use crate::evaluation::Evaluation;
use crate::expression::Expression;
use crate::outcome::Outcome;
use crate::rationale::Rationale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Compound evaluation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    /// Conjunctive: all children must pass.
    And,
    /// Disjunctive: at least one child must pass.
    Or,
    /// Non-conjunctive: at least one child must fail.
    Nand,
    /// Non-disjunctive: all children must fail.
    Nor,
}

impl Combinator {
    pub const ALL: [Combinator; 4] = [
        Combinator::And,
        Combinator::Or,
        Combinator::Nand,
        Combinator::Nor,
    ];

    /// Whether the next child should be skipped given the children seen so far.
    pub fn should_skip(self, tally: &Tally) -> bool {
        match self {
            Combinator::And | Combinator::Nand => tally.failed > 0,
            Combinator::Or | Combinator::Nor => tally.passed > 0,
        }
    }

    /// Compute the compound outcome from the final tally.
    pub fn resolve(self, tally: &Tally) -> Outcome {
        match self {
            Combinator::And => conjunction(tally),
            Combinator::Or => disjunction(tally),
            Combinator::Nand => conjunction(tally).negate(),
            Combinator::Nor => disjunction(tally).negate(),
        }
    }

    /// The combinator's invariant in prose, used as the compound `expected`.
    pub fn invariant(self) -> &'static str {
        match self {
            Combinator::And => "All children must pass",
            Combinator::Or => "At least one child must pass",
            Combinator::Nand => "At least one child must fail",
            Combinator::Nor => "All children must fail",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
            Combinator::Nand => "nand",
            Combinator::Nor => "nor",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn conjunction(tally: &Tally) -> Outcome {
    if tally.total() == 0 {
        Outcome::True
    } else if tally.failed > 0 {
        Outcome::False
    } else if tally.passed == tally.total() {
        Outcome::True
    } else {
        Outcome::Skipped
    }
}

fn disjunction(tally: &Tally) -> Outcome {
    if tally.total() == 0 || tally.passed > 0 {
        Outcome::True
    } else if tally.failed == tally.total() {
        Outcome::False
    } else {
        Outcome::Skipped
    }
}

/// Running count of child outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::True => self.passed += 1,
            Outcome::False => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    /// Number of children processed, evaluated or skipped.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Count an already-built list of child evaluations.
    pub fn of(children: &[Evaluation]) -> Self {
        let mut tally = Tally::default();
        for child in children {
            tally.record(child.outcome());
        }
        tally
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Passed: {}, Failed: {}, Skipped: {}",
            self.passed, self.failed, self.skipped
        )
    }
}

/// Evaluate `children` under `combinator`, skipping once the outcome is decided.
pub(crate) fn evaluate_compound(
    name: &str,
    combinator: Combinator,
    children: &[Expression],
) -> Evaluation {
    let started = Instant::now();
    let mut tally = Tally::default();
    let mut evaluations = Vec::with_capacity(children.len());

    for (index, child) in children.iter().enumerate() {
        let evaluation = if combinator.should_skip(&tally) {
            if tally.skipped == 0 {
                tracing::debug!(
                    compound = name,
                    %combinator,
                    index,
                    remaining = children.len() - index,
                    "short-circuit"
                );
            }
            child.skip(&format!("short-circuited by {name}"))
        } else {
            child.evaluate()
        };
        tally.record(evaluation.outcome());
        evaluations.push(evaluation);
    }

    let outcome = combinator.resolve(&tally);
    let rationale = Rationale::new(combinator.invariant(), tally.to_string());
    Evaluation::compound(
        name,
        combinator,
        outcome,
        rationale,
        evaluations,
        started.elapsed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(passed: usize, failed: usize, skipped: usize) -> Tally {
        Tally {
            passed,
            failed,
            skipped,
        }
    }

    #[test]
    fn empty_tally_is_vacuous() {
        let empty = Tally::default();
        assert_eq!(Combinator::And.resolve(&empty), Outcome::True);
        assert_eq!(Combinator::Or.resolve(&empty), Outcome::True);
        assert_eq!(Combinator::Nand.resolve(&empty), Outcome::False);
        assert_eq!(Combinator::Nor.resolve(&empty), Outcome::False);
    }

    #[test]
    fn conjunction_rules() {
        assert_eq!(Combinator::And.resolve(&tally(3, 0, 0)), Outcome::True);
        assert_eq!(Combinator::And.resolve(&tally(1, 1, 1)), Outcome::False);
        assert_eq!(Combinator::And.resolve(&tally(2, 0, 1)), Outcome::Skipped);
        assert_eq!(Combinator::Nand.resolve(&tally(2, 0, 1)), Outcome::Skipped);
    }

    #[test]
    fn disjunction_rules() {
        assert_eq!(Combinator::Or.resolve(&tally(0, 2, 0)), Outcome::False);
        assert_eq!(Combinator::Or.resolve(&tally(1, 1, 1)), Outcome::True);
        assert_eq!(Combinator::Or.resolve(&tally(0, 1, 1)), Outcome::Skipped);
        assert_eq!(Combinator::Nor.resolve(&tally(0, 2, 0)), Outcome::True);
    }

    #[test]
    fn skip_predicates() {
        assert!(!Combinator::And.should_skip(&tally(2, 0, 0)));
        assert!(Combinator::And.should_skip(&tally(0, 1, 0)));
        assert!(Combinator::Nand.should_skip(&tally(0, 1, 0)));
        assert!(Combinator::Or.should_skip(&tally(1, 0, 0)));
        assert!(!Combinator::Nor.should_skip(&tally(0, 3, 0)));
    }

    #[test]
    fn tally_display() {
        assert_eq!(tally(1, 2, 3).to_string(), "Passed: 1, Failed: 2, Skipped: 3");
    }
}
