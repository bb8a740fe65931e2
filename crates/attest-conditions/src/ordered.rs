//! Equality and ordering checks over any `PartialOrd` value.
//!
//! Integers, floats, strings, timestamps and user types all go through the
//! same two conditions, [`Compare`] and [`Between`]. Incomparable values
//! (NaN) fail every ordering relation and every equality, except `!=`.

use crate::subject::Subject;
use attest_kernel::{Condition, Expression, Rationale};
use std::cmp::Ordering;
use std::fmt;

/// Binary relation between a subject and an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Relation {
    pub fn holds<T: PartialOrd + ?Sized>(self, subject: &T, operand: &T) -> bool {
        let ordering = subject.partial_cmp(operand);
        match self {
            Relation::Eq => ordering == Some(Ordering::Equal),
            Relation::Ne => ordering != Some(Ordering::Equal),
            Relation::Gt => ordering == Some(Ordering::Greater),
            Relation::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Relation::Lt => ordering == Some(Ordering::Less),
            Relation::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Eq => "==",
            Relation::Ne => "!=",
            Relation::Gt => ">",
            Relation::Ge => ">=",
            Relation::Lt => "<",
            Relation::Le => "<=",
        }
    }

    pub fn prose(self) -> &'static str {
        match self {
            Relation::Eq => "equal to",
            Relation::Ne => "not equal to",
            Relation::Gt => "greater than",
            Relation::Ge => "greater than or equal to",
            Relation::Lt => "less than",
            Relation::Le => "less than or equal to",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `subject <relation> operand`.
#[derive(Debug, Clone)]
pub struct Compare<T> {
    relation: Relation,
    operand: T,
}

impl<T> Compare<T> {
    pub fn new(relation: Relation, operand: T) -> Self {
        Self { relation, operand }
    }
}

impl<T> Condition<T> for Compare<T>
where
    T: PartialOrd + fmt::Debug + Send + Sync,
{
    fn test(&self, subject: &T) -> bool {
        self.relation.holds(subject, &self.operand)
    }

    fn rationale(&self, subject: &T, _passed: bool) -> Rationale {
        Rationale::new(
            format!("{} {:?}", self.relation.prose(), self.operand),
            format!("{subject:?}"),
        )
    }
}

/// `low <= subject <= high`.
#[derive(Debug, Clone)]
pub struct Between<T> {
    low: T,
    high: T,
}

impl<T> Condition<T> for Between<T>
where
    T: PartialOrd + fmt::Debug + Send + Sync,
{
    fn test(&self, subject: &T) -> bool {
        Relation::Ge.holds(subject, &self.low) && Relation::Le.holds(subject, &self.high)
    }

    fn rationale(&self, subject: &T, passed: bool) -> Rationale {
        let rationale = Rationale::new(
            format!("between {:?} and {:?}", self.low, self.high),
            format!("{subject:?}"),
        );
        if passed {
            return rationale;
        }
        if Relation::Lt.holds(subject, &self.low) {
            rationale.with_hint(format!("below the lower bound {:?}", self.low))
        } else if Relation::Gt.holds(subject, &self.high) {
            rationale.with_hint(format!("above the upper bound {:?}", self.high))
        } else {
            rationale
        }
    }
}

impl<T> Subject<T>
where
    T: PartialOrd + fmt::Debug + Clone + Send + Sync + 'static,
{
    pub fn is_equal_to(&self, operand: T) -> Expression {
        self.compare(Relation::Eq, operand)
    }

    pub fn is_not_equal_to(&self, operand: T) -> Expression {
        self.compare(Relation::Ne, operand)
    }

    pub fn is_greater_than(&self, operand: T) -> Expression {
        self.compare(Relation::Gt, operand)
    }

    pub fn is_greater_than_or_equal_to(&self, operand: T) -> Expression {
        self.compare(Relation::Ge, operand)
    }

    pub fn is_less_than(&self, operand: T) -> Expression {
        self.compare(Relation::Lt, operand)
    }

    pub fn is_less_than_or_equal_to(&self, operand: T) -> Expression {
        self.compare(Relation::Le, operand)
    }

    /// Inclusive on both ends.
    pub fn is_between(&self, low: T, high: T) -> Expression {
        let relation = format!("in [{low:?}, {high:?}]");
        self.bind(relation, Between { low, high })
    }

    pub fn compare(&self, relation: Relation, operand: T) -> Expression {
        let label = format!("{relation} {operand:?}");
        self.bind(label, Compare::new(relation, operand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::{that, that_named};
    use attest_kernel::Outcome;

    #[test]
    fn relations_on_integers() {
        assert!(Relation::Gt.holds(&3, &2));
        assert!(Relation::Ge.holds(&2, &2));
        assert!(!Relation::Lt.holds(&2, &2));
        assert!(Relation::Ne.holds(&1, &2));
    }

    #[test]
    fn nan_only_satisfies_not_equal() {
        let nan = f64::NAN;
        assert!(!Relation::Eq.holds(&nan, &nan));
        assert!(!Relation::Ge.holds(&nan, &0.0));
        assert!(!Relation::Le.holds(&nan, &0.0));
        assert!(Relation::Ne.holds(&nan, &nan));
    }

    #[test]
    fn compare_names_and_rationale() {
        let expr = that_named("retries", 5u32).is_less_than_or_equal_to(3);
        assert_eq!(expr.name(), "retries <= 3");

        let evaluation = expr.evaluate();
        assert_eq!(evaluation.outcome(), Outcome::False);
        assert_eq!(evaluation.rationale().expected(), "less than or equal to 3");
        assert_eq!(evaluation.rationale().actual(), "5");
    }

    #[test]
    fn works_for_strings_and_floats() {
        assert_eq!(
            that("beta".to_string())
                .is_greater_than("alpha".to_string())
                .evaluate()
                .outcome(),
            Outcome::True
        );
        assert_eq!(
            that(0.5f64).is_between(0.0, 1.0).evaluate().outcome(),
            Outcome::True
        );
    }

    #[test]
    fn between_hints_at_the_violated_bound() {
        let below = that(-1).is_between(0, 10).evaluate();
        assert_eq!(below.rationale().hint(), Some("below the lower bound 0"));

        let above = that_named("load", 11).is_between(0, 10);
        assert_eq!(above.name(), "load in [0, 10]");
        assert_eq!(
            above.evaluate().rationale().hint(),
            Some("above the upper bound 10")
        );
    }
}
