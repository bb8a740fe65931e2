//! Unevaluated rule trees.
//!
//! An [`Expression`] is a value: once built it is never mutated, so one tree
//! can be evaluated any number of times, from any number of threads. Compound
//! nodes are assembled through [`CompoundBuilder`], which is the only place
//! children can be appended or prepended.

use crate::compound::{Combinator, evaluate_compound};
use crate::condition::Condition;
use crate::error::KernelError;
use crate::evaluation::Evaluation;
use crate::outcome::Outcome;
use crate::rationale::Rationale;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A node of an unevaluated rule tree.
#[derive(Clone)]
pub enum Expression {
    /// A predicate bound to its subject.
    Terminal(Terminal),
    /// Logical negation of exactly one child.
    Negated(Negated),
    /// AND / OR / NAND / NOR over an ordered list of children.
    Compound(Compound),
}

/// Subject and condition erased behind one object-safe call.
trait Probe: Send + Sync {
    fn probe(&self) -> (bool, Rationale);
}

struct Bound<T, C> {
    subject: T,
    condition: C,
}

impl<T, C> Probe for Bound<T, C>
where
    T: Send + Sync,
    C: Condition<T>,
{
    fn probe(&self) -> (bool, Rationale) {
        let passed = self.condition.test(&self.subject);
        let rationale = self.condition.rationale(&self.subject, passed);
        (passed, rationale)
    }
}

#[derive(Clone)]
pub struct Terminal {
    name: String,
    probe: Arc<dyn Probe>,
}

impl Terminal {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self) -> Evaluation {
        let started = Instant::now();
        let (passed, rationale) = self.probe.probe();
        let outcome = Outcome::from_bool(passed);
        tracing::trace!(terminal = %self.name, %outcome, "evaluated");
        Evaluation::terminal(&self.name, outcome, rationale, started.elapsed())
    }
}

#[derive(Clone)]
pub struct Negated {
    name: String,
    child: Box<Expression>,
}

impl Negated {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child(&self) -> &Expression {
        &self.child
    }

    fn evaluate(&self) -> Evaluation {
        let started = Instant::now();
        let inner = self.child.evaluate();
        Evaluation::negation(&self.name, inner, started.elapsed())
    }
}

#[derive(Clone)]
pub struct Compound {
    name: String,
    combinator: Combinator,
    children: Vec<Expression>,
}

impl Compound {
    /// Build a compound node. Fails if `name` is blank.
    pub fn new(
        combinator: Combinator,
        name: impl Into<String>,
        children: Vec<Expression>,
    ) -> Result<Self, KernelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KernelError::InvalidConstruction {
                reason: format!("{combinator} node requires a non-blank name"),
            });
        }
        Ok(Self {
            name,
            combinator,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }
}

impl Expression {
    /// Bind `subject` to `condition` under `name`.
    ///
    /// Nothing is evaluated here; the predicate and the rationale generator
    /// run only when the expression is evaluated.
    pub fn terminal<T, C>(name: impl Into<String>, subject: T, condition: C) -> Self
    where
        T: Send + Sync + 'static,
        C: Condition<T> + 'static,
    {
        Expression::Terminal(Terminal {
            name: name.into(),
            probe: Arc::new(Bound { subject, condition }),
        })
    }

    /// Wrap this expression in a negation named `not[<name>]`.
    pub fn negate(self) -> Self {
        Expression::Negated(Negated {
            name: format!("not[{}]", self.name()),
            child: Box::new(self),
        })
    }

    pub fn all(name: impl Into<String>) -> CompoundBuilder {
        CompoundBuilder::new(Combinator::And, name)
    }

    pub fn any(name: impl Into<String>) -> CompoundBuilder {
        CompoundBuilder::new(Combinator::Or, name)
    }

    pub fn nand(name: impl Into<String>) -> CompoundBuilder {
        CompoundBuilder::new(Combinator::Nand, name)
    }

    pub fn nor(name: impl Into<String>) -> CompoundBuilder {
        CompoundBuilder::new(Combinator::Nor, name)
    }

    pub fn name(&self) -> &str {
        match self {
            Expression::Terminal(t) => t.name(),
            Expression::Negated(n) => n.name(),
            Expression::Compound(c) => c.name(),
        }
    }

    /// Direct children: none for terminals, one for negations.
    pub fn children(&self) -> &[Expression] {
        match self {
            Expression::Terminal(_) => &[],
            Expression::Negated(n) => std::slice::from_ref(n.child.as_ref()),
            Expression::Compound(c) => c.children(),
        }
    }

    pub fn combinator(&self) -> Option<Combinator> {
        match self {
            Expression::Compound(c) => Some(c.combinator),
            _ => None,
        }
    }

    /// Evaluate the tree into a fresh [`Evaluation`].
    pub fn evaluate(&self) -> Evaluation {
        match self {
            Expression::Terminal(t) => t.evaluate(),
            Expression::Negated(n) => n.evaluate(),
            Expression::Compound(c) => evaluate_compound(&c.name, c.combinator, &c.children),
        }
    }

    /// Produce a fully skipped evaluation of this subtree.
    ///
    /// No predicate and no rationale generator is invoked anywhere below.
    pub fn skip(&self, cause: &str) -> Evaluation {
        match self {
            Expression::Terminal(t) => Evaluation::terminal(
                &t.name,
                Outcome::Skipped,
                Rationale::skipped(cause),
                Duration::ZERO,
            ),
            Expression::Negated(n) => {
                Evaluation::negation(&n.name, n.child.skip(cause), Duration::ZERO)
            }
            Expression::Compound(c) => Evaluation::compound(
                &c.name,
                c.combinator,
                Outcome::Skipped,
                Rationale::skipped(cause),
                c.children.iter().map(|child| child.skip(cause)).collect(),
                Duration::ZERO,
            ),
        }
    }

    /// Number of nodes in the tree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Expression::size).sum::<usize>()
    }
}

impl std::ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Terminal(t) => f.debug_tuple("Terminal").field(&t.name).finish(),
            Expression::Negated(n) => f.debug_tuple("Negated").field(&n.child).finish(),
            Expression::Compound(c) => f
                .debug_struct("Compound")
                .field("name", &c.name)
                .field("combinator", &c.combinator)
                .field("children", &c.children)
                .finish(),
        }
    }
}

impl From<Compound> for Expression {
    fn from(compound: Compound) -> Self {
        Expression::Compound(compound)
    }
}

/// Accumulates children for a compound node before it is frozen.
///
/// Children keep the order they end up in after all `append` / `prepend`
/// calls; that order is the short-circuit order.
#[derive(Debug, Clone)]
pub struct CompoundBuilder {
    combinator: Combinator,
    name: String,
    children: VecDeque<Expression>,
}

impl CompoundBuilder {
    pub fn new(combinator: Combinator, name: impl Into<String>) -> Self {
        Self {
            combinator,
            name: name.into(),
            children: VecDeque::new(),
        }
    }

    pub fn append(mut self, child: Expression) -> Self {
        self.children.push_back(child);
        self
    }

    pub fn prepend(mut self, child: Expression) -> Self {
        self.children.push_front(child);
        self
    }

    pub fn extend(mut self, children: impl IntoIterator<Item = Expression>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Freeze the children into an immutable compound expression.
    pub fn build(self) -> Result<Expression, KernelError> {
        Compound::new(self.combinator, self.name, self.children.into()).map(Expression::Compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::condition;

    fn constant(name: &str, value: bool) -> Expression {
        Expression::terminal(
            name,
            value,
            condition(
                |v: &bool| *v,
                |v: &bool, _passed: bool| Rationale::new("true", v.to_string()),
            ),
        )
    }

    #[test]
    fn builder_respects_prepend_and_append() {
        let expr = Expression::all("checks")
            .append(constant("b", true))
            .prepend(constant("a", true))
            .append(constant("c", true))
            .build()
            .unwrap();
        let names: Vec<&str> = expr.children().iter().map(Expression::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(expr.combinator(), Some(Combinator::And));
        assert_eq!(expr.size(), 4);
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = Expression::any("  ").append(constant("a", true)).build().unwrap_err();
        assert!(matches!(err, KernelError::InvalidConstruction { .. }));
        assert!(err.to_string().contains("or node"));
    }

    #[test]
    fn negation_name_and_children() {
        let expr = !constant("a", true);
        assert_eq!(expr.name(), "not[a]");
        assert_eq!(expr.children().len(), 1);
        assert_eq!(expr.children()[0].name(), "a");
    }

    #[test]
    fn debug_shows_structure() {
        let expr = Expression::nor("none").append(constant("a", false)).build().unwrap();
        let debug = format!("{expr:?}");
        assert!(debug.contains("Nor"));
        assert!(debug.contains("Terminal(\"a\")"));
    }
}
