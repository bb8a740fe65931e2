//! Evaluated result trees.
//!
//! An [`Evaluation`] mirrors the [`Expression`](crate::Expression) it came
//! from, node for node, and is immutable once produced. Each call to
//! `evaluate()` builds a new tree; nothing is shared between calls.
//!
//! Negation resolves polarity while it builds its node: a negated terminal
//! becomes a terminal evaluation named `not[...]` carrying the inverted
//! outcome, so the root-cause search never has to reason about negation.

use crate::compound::{Combinator, Tally};
use crate::outcome::Outcome;
use crate::rationale::Rationale;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Which kind of expression produced an evaluation node.
///
/// Negating a terminal folds into a single `Terminal` node named `not[x]`
/// with the outcome already inverted and the rationale wrapped in `not[...]`,
/// so a `Terminal` evaluation may come from a negated expression. Only
/// negated compounds produce `Negated` nodes. The evaluation tree can
/// therefore have fewer nodes than [`Expression::size`](crate::Expression::size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Terminal,
    Negated,
    And,
    Or,
    Nand,
    Nor,
}

impl NodeKind {
    pub fn combinator(self) -> Option<Combinator> {
        match self {
            NodeKind::And => Some(Combinator::And),
            NodeKind::Or => Some(Combinator::Or),
            NodeKind::Nand => Some(Combinator::Nand),
            NodeKind::Nor => Some(Combinator::Nor),
            NodeKind::Terminal | NodeKind::Negated => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Terminal => "terminal",
            NodeKind::Negated => "negated",
            NodeKind::And => "and",
            NodeKind::Or => "or",
            NodeKind::Nand => "nand",
            NodeKind::Nor => "nor",
        }
    }
}

impl From<Combinator> for NodeKind {
    fn from(combinator: Combinator) -> Self {
        match combinator {
            Combinator::And => NodeKind::And,
            Combinator::Or => NodeKind::Or,
            Combinator::Nand => NodeKind::Nand,
            Combinator::Nor => NodeKind::Nor,
        }
    }
}

/// One node of an evaluated tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    name: String,
    kind: NodeKind,
    outcome: Outcome,
    rationale: Rationale,
    #[serde(rename = "elapsedMicros", with = "micros")]
    elapsed: Duration,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Evaluation>,
}

impl Evaluation {
    pub(crate) fn terminal(
        name: &str,
        outcome: Outcome,
        rationale: Rationale,
        elapsed: Duration,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Terminal,
            outcome,
            rationale,
            elapsed,
            children: Vec::new(),
        }
    }

    pub(crate) fn compound(
        name: &str,
        combinator: Combinator,
        outcome: Outcome,
        rationale: Rationale,
        children: Vec<Evaluation>,
        elapsed: Duration,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind: combinator.into(),
            outcome,
            rationale,
            elapsed,
            children,
        }
    }

    /// Wrap `inner` in a negation named `name`.
    ///
    /// A terminal `inner` is folded into a single terminal node; anything else
    /// is kept as the only child of a `Negated` node. Skipped nodes keep their
    /// placeholder rationale.
    pub(crate) fn negation(name: &str, inner: Evaluation, elapsed: Duration) -> Self {
        let outcome = inner.outcome.negate();
        let rationale = if inner.outcome.is_skipped() {
            inner.rationale.clone()
        } else {
            inner.rationale.negated()
        };
        if inner.kind == NodeKind::Terminal {
            return Self::terminal(name, outcome, rationale, elapsed);
        }
        Self {
            name: name.to_string(),
            kind: NodeKind::Negated,
            outcome,
            rationale,
            elapsed,
            children: vec![inner],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn rationale(&self) -> &Rationale {
        &self.rationale
    }

    pub fn children(&self) -> &[Evaluation] {
        &self.children
    }

    /// Wall time spent producing this node, children included. Zero when skipped.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == NodeKind::Terminal
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_true()
    }

    pub fn failed(&self) -> bool {
        self.outcome.is_false()
    }

    pub fn skipped(&self) -> bool {
        self.outcome.is_skipped()
    }

    /// Outcome counts over the direct children.
    pub fn tally(&self) -> Tally {
        Tally::of(&self.children)
    }

    /// Pre-order walk over this node and all of its descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of nodes whose predicate actually ran.
    pub fn evaluated_terminals(&self) -> usize {
        self.iter()
            .filter(|node| node.is_terminal() && !node.skipped())
            .count()
    }

    /// Same names, kinds and outcomes, node for node.
    ///
    /// Rationale text and elapsed time are not compared.
    pub fn same_structure(&self, other: &Evaluation) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.outcome == other.outcome
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_structure(b))
    }

    /// Deterministic SHA-256 over the tree structure, hex encoded.
    ///
    /// Feeds depth, kind, name and outcome of every node in pre-order, so two
    /// trees share a fingerprint exactly when [`Evaluation::same_structure`]
    /// holds.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        feed(&mut hasher, self, 0);
        format!("{:x}", hasher.finalize())
    }
}

fn feed(hasher: &mut Sha256, node: &Evaluation, depth: usize) {
    hasher.update(depth.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(node.kind.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(node.name.len().to_string().as_bytes());
    hasher.update(b":");
    hasher.update(node.name.as_bytes());
    hasher.update(b":");
    hasher.update(node.outcome.as_str().as_bytes());
    hasher.update(b"\n");
    for child in &node.children {
        feed(hasher, child, depth + 1);
    }
}

/// Iterator returned by [`Evaluation::iter`].
pub struct PreOrder<'a> {
    stack: Vec<&'a Evaluation>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Evaluation;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

mod micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_micros)
    }
}
