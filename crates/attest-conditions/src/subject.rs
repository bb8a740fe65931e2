//! The value wrapper every condition factory hangs off.

use attest_kernel::{Condition, Expression, Rationale};
use std::fmt;

/// Name used when a subject is created with [`that`].
pub const DEFAULT_SUBJECT_NAME: &str = "value";

/// A named value waiting to be checked.
///
/// Factory methods take `&self` and clone the value into the terminal they
/// build, so one subject can feed several checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject<T> {
    name: String,
    value: T,
}

/// Start a check on `value`, named [`DEFAULT_SUBJECT_NAME`].
pub fn that<T>(value: T) -> Subject<T> {
    that_named(DEFAULT_SUBJECT_NAME, value)
}

/// Start a check on `value` under a caller-chosen name.
pub fn that_named<T>(name: impl Into<String>, value: T) -> Subject<T> {
    Subject {
        name: name.into(),
        value,
    }
}

impl<T> Subject<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Terminal named `<subject> <relation>`.
    pub(crate) fn bind<C>(&self, relation: impl fmt::Display, condition: C) -> Expression
    where
        T: Clone + Send + Sync + 'static,
        C: Condition<T> + 'static,
    {
        Expression::terminal(
            format!("{} {}", self.name, relation),
            self.value.clone(),
            condition,
        )
    }
}

impl<T> Subject<T>
where
    T: fmt::Debug + Clone + Send + Sync + 'static,
{
    /// Ad-hoc check: `predicate` described in prose by `description`.
    pub fn satisfies<F>(&self, description: impl Into<String>, predicate: F) -> Expression
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let description = description.into();
        let relation = format!("satisfies {description}");
        self.bind(
            relation,
            Satisfies {
                description,
                predicate,
            },
        )
    }
}

/// Condition built by [`Subject::satisfies`].
pub struct Satisfies<F> {
    description: String,
    predicate: F,
}

impl<T, F> Condition<T> for Satisfies<F>
where
    T: fmt::Debug,
    F: Fn(&T) -> bool + Send + Sync,
{
    fn test(&self, subject: &T) -> bool {
        (self.predicate)(subject)
    }

    fn rationale(&self, subject: &T, _passed: bool) -> Rationale {
        Rationale::new(self.description.clone(), format!("{subject:?}"))
    }
}
