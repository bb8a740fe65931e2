//! Locating the node that explains an evaluation.
//!
//! The root cause is the first terminal evaluation with outcome `False` found
//! by a depth-first, pre-order walk. Polarity has already been resolved by the
//! negation when the tree was built, so the walk never inverts anything.
//! A tree without a failing terminal has no root cause; that is reported as
//! `None` rather than as an error.

use crate::evaluation::Evaluation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names from the tree root down to, and including, the cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootCauseChain(Vec<String>);

impl RootCauseChain {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the tree root.
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Name of the cause itself.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl fmt::Display for RootCauseChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" > "))
    }
}

/// A reference to one specific node inside an evaluation tree.
///
/// Identity matters: two structurally equal nodes at different positions are
/// different causes. Use [`Cause::is`] to compare against a node.
#[derive(Debug, Clone)]
pub struct Cause<'a> {
    evaluation: &'a Evaluation,
    path: Vec<usize>,
    chain: RootCauseChain,
}

impl<'a> Cause<'a> {
    pub fn evaluation(&self) -> &'a Evaluation {
        self.evaluation
    }

    pub fn name(&self) -> &'a str {
        self.evaluation.name()
    }

    /// Child indexes leading from the tree root to the cause.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn chain(&self) -> &RootCauseChain {
        &self.chain
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Whether `node` is the very node this cause points at.
    pub fn is(&self, node: &Evaluation) -> bool {
        std::ptr::eq(self.evaluation, node)
    }
}

impl Evaluation {
    /// The failing terminal that explains this tree, if there is one.
    ///
    /// The walk does not look at this node's own outcome: a passing OR with a
    /// failed first branch still yields that branch. Only ask for the root
    /// cause of a tree that [`failed`](Evaluation::failed).
    ///
    /// A NAND or NOR can fail without any failing terminal (`NAND(T, T)`),
    /// which yields `None`. Nested under such a node, the first failing
    /// terminal found may not be what made it fail: in `NOR(OR(x = F, y = T))`
    /// the answer is `x`.
    pub fn root_cause(&self) -> Option<Cause<'_>> {
        let mut lineage = Vec::new();
        let mut path = Vec::new();
        search(self, &mut lineage, &mut path)
    }

    /// The proximate cause: this node if it is a failing terminal, otherwise
    /// the first direct child that failed.
    pub fn cause(&self) -> Option<Cause<'_>> {
        if self.is_terminal() {
            return self.failed().then(|| Cause {
                evaluation: self,
                path: Vec::new(),
                chain: RootCauseChain(vec![self.name().to_string()]),
            });
        }
        let (index, child) = self
            .children()
            .iter()
            .enumerate()
            .find(|(_, child)| child.failed())?;
        Some(Cause {
            evaluation: child,
            path: vec![index],
            chain: RootCauseChain(vec![self.name().to_string(), child.name().to_string()]),
        })
    }
}

fn search<'a>(
    node: &'a Evaluation,
    lineage: &mut Vec<&'a str>,
    path: &mut Vec<usize>,
) -> Option<Cause<'a>> {
    lineage.push(node.name());
    if node.is_terminal() && node.failed() {
        return Some(Cause {
            evaluation: node,
            path: path.clone(),
            chain: RootCauseChain(lineage.iter().map(|name| name.to_string()).collect()),
        });
    }
    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        if let Some(cause) = search(child, lineage, path) {
            return Some(cause);
        }
        path.pop();
    }
    lineage.pop();
    None
}
