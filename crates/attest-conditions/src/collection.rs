//! Checks over `Vec<E>` subjects.

use crate::subject::Subject;
use attest_kernel::{Condition, Expression, Rationale};
use std::fmt;
use std::sync::Arc;

type ElementPredicate<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;

/// A single collection property.
pub enum CollectionCheck<E> {
    Empty,
    Size(usize),
    Contains(E),
    All(String, ElementPredicate<E>),
    Any(String, ElementPredicate<E>),
}

impl<E> CollectionCheck<E>
where
    E: PartialEq + fmt::Debug,
{
    pub fn test_slice(&self, items: &[E]) -> bool {
        match self {
            CollectionCheck::Empty => items.is_empty(),
            CollectionCheck::Size(expected) => items.len() == *expected,
            CollectionCheck::Contains(item) => items.contains(item),
            CollectionCheck::All(_, predicate) => items.iter().all(|item| predicate(item)),
            CollectionCheck::Any(_, predicate) => items.iter().any(|item| predicate(item)),
        }
    }

    fn expectation(&self) -> String {
        match self {
            CollectionCheck::Empty => "is empty".to_string(),
            CollectionCheck::Size(expected) => format!("has {expected} items"),
            CollectionCheck::Contains(item) => format!("contains {item:?}"),
            CollectionCheck::All(description, _) => format!("all items {description}"),
            CollectionCheck::Any(description, _) => format!("some item {description}"),
        }
    }

    fn hint(&self, items: &[E]) -> Option<String> {
        match self {
            CollectionCheck::All(_, predicate) => items
                .iter()
                .position(|item| !predicate(item))
                .map(|index| format!("first offending item at index {index}: {:?}", items[index])),
            CollectionCheck::Any(..) if items.is_empty() => {
                Some("collection is empty".to_string())
            }
            _ => None,
        }
    }
}

impl<E> fmt::Display for CollectionCheck<E>
where
    E: PartialEq + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expectation())
    }
}

impl<E> Condition<Vec<E>> for CollectionCheck<E>
where
    E: PartialEq + fmt::Debug + Send + Sync,
{
    fn test(&self, subject: &Vec<E>) -> bool {
        self.test_slice(subject)
    }

    fn rationale(&self, subject: &Vec<E>, passed: bool) -> Rationale {
        let rationale = Rationale::new(self.expectation(), format!("{} items", subject.len()));
        match self.hint(subject) {
            Some(hint) if !passed => rationale.with_hint(hint),
            _ => rationale,
        }
    }
}

impl<E> Subject<Vec<E>>
where
    E: PartialEq + fmt::Debug + Clone + Send + Sync + 'static,
{
    pub fn is_empty(&self) -> Expression {
        self.collection(CollectionCheck::Empty)
    }

    pub fn has_size(&self, size: usize) -> Expression {
        self.collection(CollectionCheck::Size(size))
    }

    pub fn contains_item(&self, item: E) -> Expression {
        self.collection(CollectionCheck::Contains(item))
    }

    /// Every item satisfies `predicate`; vacuously true when empty.
    pub fn all_satisfy<F>(&self, description: impl Into<String>, predicate: F) -> Expression
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.collection(CollectionCheck::All(description.into(), Arc::new(predicate)))
    }

    pub fn any_satisfy<F>(&self, description: impl Into<String>, predicate: F) -> Expression
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.collection(CollectionCheck::Any(description.into(), Arc::new(predicate)))
    }

    pub fn collection(&self, check: CollectionCheck<E>) -> Expression {
        let relation = check.to_string();
        self.bind(relation, check)
    }
}

#[cfg(test)]
mod tests {
    use crate::subject::that_named;
    use attest_kernel::Outcome;

    #[test]
    fn size_and_membership() {
        let ports = that_named("ports", vec![80u16, 443]);
        assert_eq!(ports.has_size(2).evaluate().outcome(), Outcome::True);
        assert_eq!(ports.contains_item(22).evaluate().outcome(), Outcome::False);
        assert_eq!(ports.is_empty().name(), "ports is empty");
        assert_eq!(ports.contains_item(22).evaluate().rationale().actual(), "2 items");
    }

    #[test]
    fn all_satisfy_points_at_the_offender() {
        let ports = that_named("ports", vec![8080u16, 80, 9000]);
        let evaluation = ports.all_satisfy("are unprivileged", |p| *p >= 1024).evaluate();
        assert_eq!(evaluation.outcome(), Outcome::False);
        assert_eq!(evaluation.rationale().expected(), "all items are unprivileged");
        assert_eq!(
            evaluation.rationale().hint(),
            Some("first offending item at index 1: 80")
        );
    }

    #[test]
    fn any_satisfy_on_empty() {
        let empty: Vec<i32> = Vec::new();
        let evaluation = that_named("xs", empty)
            .any_satisfy("is positive", |x| *x > 0)
            .evaluate();
        assert_eq!(evaluation.outcome(), Outcome::False);
        assert_eq!(evaluation.rationale().hint(), Some("collection is empty"));
    }
}
