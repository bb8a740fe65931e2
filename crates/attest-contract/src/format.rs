//! Text rendering of evaluation trees.
//!
//! One line per node, children indented under their parent:
//!
//! ```text
//! [FAIL] checks
//!     expected: All children must pass
//!     actual: Passed: 1, Failed: 1, Skipped: 0
//!   [PASS] a
//!   [FAIL] b  <- root cause
//!       expected: true
//!       actual: false
//! ```
//!
//! Skipped nodes always collapse to their own line. Passing nodes collapse
//! when `show_passing` is off.

use crate::config::FormatConfig;
use attest_kernel::{Cause, Evaluation, Outcome};
use std::fmt::Write as _;

/// Renders an evaluation tree using only its public read accessors.
pub trait Formatter {
    fn format(&self, evaluation: &Evaluation) -> String;
}

/// The default line-per-node formatter.
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    config: FormatConfig,
}

impl TextFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    fn render(&self, node: &Evaluation, depth: usize, cause: Option<&Cause<'_>>, out: &mut String) {
        let pad = " ".repeat(self.config.indent * depth);
        let _ = write!(out, "{pad}[{}] {}", marker(node.outcome()), node.name());
        if self.config.show_elapsed && !node.skipped() {
            let _ = write!(out, " ({}µs)", node.elapsed().as_micros());
        }
        if cause.is_some_and(|cause| cause.is(node)) {
            out.push_str("  <- root cause");
        }
        out.push('\n');

        let collapsed = node.skipped() || (node.passed() && !self.config.show_passing);
        if collapsed {
            return;
        }

        if self.config.show_rationale {
            let detail = " ".repeat(self.config.indent * (depth + 2));
            let rationale = node.rationale();
            let _ = writeln!(out, "{detail}expected: {}", rationale.expected());
            let _ = writeln!(out, "{detail}actual: {}", rationale.actual());
            if let Some(hint) = rationale.hint() {
                let _ = writeln!(out, "{detail}hint: {hint}");
            }
        }

        for child in node.children() {
            self.render(child, depth + 1, cause, out);
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, evaluation: &Evaluation) -> String {
        // passing and skipped trees have no root cause to mark
        let cause = evaluation.failed().then(|| evaluation.root_cause()).flatten();
        let mut out = String::new();
        self.render(evaluation, 0, cause.as_ref(), &mut out);
        if out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

/// `root > ... > cause`.
pub fn format_cause(cause: &Cause<'_>) -> String {
    cause.chain().to_string()
}

fn marker(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::True => "PASS",
        Outcome::False => "FAIL",
        Outcome::Skipped => "SKIP",
    }
}
