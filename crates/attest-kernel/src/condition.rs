//! The leaf contract: a predicate over a subject plus its rationale generator.
//!
//! Condition factories (see the `attest-conditions` crate) implement
//! [`Condition`] and bind a subject into a terminal
//! [`Expression`](crate::Expression). The kernel only requires that both
//! methods be pure functions of their arguments.

use crate::rationale::{Rationale, RationaleGenerator};
use std::marker::PhantomData;

/// A testable property of a subject of type `T`.
pub trait Condition<T>: Send + Sync {
    /// Run the predicate.
    fn test(&self, subject: &T) -> bool;

    /// Explain the outcome of [`Condition::test`] for this subject.
    fn rationale(&self, subject: &T, passed: bool) -> Rationale;
}

/// A [`Condition`] assembled from a predicate closure and a generator.
pub struct FnCondition<T, P, G> {
    predicate: P,
    generator: G,
    _subject: PhantomData<fn(&T)>,
}

impl<T, P, G> FnCondition<T, P, G>
where
    P: Fn(&T) -> bool + Send + Sync,
    G: RationaleGenerator<T>,
{
    pub fn new(predicate: P, generator: G) -> Self {
        Self {
            predicate,
            generator,
            _subject: PhantomData,
        }
    }
}

impl<T, P, G> Condition<T> for FnCondition<T, P, G>
where
    P: Fn(&T) -> bool + Send + Sync,
    G: RationaleGenerator<T>,
{
    fn test(&self, subject: &T) -> bool {
        (self.predicate)(subject)
    }

    fn rationale(&self, subject: &T, passed: bool) -> Rationale {
        self.generator.generate(subject, passed)
    }
}

/// Shorthand for [`FnCondition::new`].
pub fn condition<T, P, G>(predicate: P, generator: G) -> FnCondition<T, P, G>
where
    P: Fn(&T) -> bool + Send + Sync,
    G: RationaleGenerator<T>,
{
    FnCondition::new(predicate, generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_condition_delegates() {
        let positive = condition(
            |n: &i32| *n > 0,
            |n: &i32, _passed: bool| Rationale::new("> 0", n.to_string()),
        );
        assert!(positive.test(&4));
        assert!(!positive.test(&-4));
        assert_eq!(positive.rationale(&-4, false).actual(), "-4");
    }
}
