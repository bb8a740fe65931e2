//! `require`, `ensure` and `confirm`.
//!
//! All three evaluate the expression once and return the evaluation when the
//! outcome is `True` or `Skipped`. A `False` outcome becomes a
//! [`ContractViolation`] of the matching kind whose report is rendered with
//! the given formatter, or [`TextFormatter::default`] for the short forms.

use crate::format::{Formatter, TextFormatter};
use crate::violation::{ContractKind, ContractViolation, Failure};
use attest_kernel::{Evaluation, Expression};

/// Checks a precondition.
pub fn require(expression: &Expression) -> Result<Evaluation, ContractViolation> {
    require_with(expression, &TextFormatter::default())
}

/// Checks a postcondition.
pub fn ensure(expression: &Expression) -> Result<Evaluation, ContractViolation> {
    ensure_with(expression, &TextFormatter::default())
}

/// Checks an arbitrary assertion.
pub fn confirm(expression: &Expression) -> Result<Evaluation, ContractViolation> {
    confirm_with(expression, &TextFormatter::default())
}

pub fn require_with(
    expression: &Expression,
    formatter: &dyn Formatter,
) -> Result<Evaluation, ContractViolation> {
    check(ContractKind::Precondition, expression, formatter)
}

pub fn ensure_with(
    expression: &Expression,
    formatter: &dyn Formatter,
) -> Result<Evaluation, ContractViolation> {
    check(ContractKind::Postcondition, expression, formatter)
}

pub fn confirm_with(
    expression: &Expression,
    formatter: &dyn Formatter,
) -> Result<Evaluation, ContractViolation> {
    check(ContractKind::Verification, expression, formatter)
}

fn check(
    kind: ContractKind,
    expression: &Expression,
    formatter: &dyn Formatter,
) -> Result<Evaluation, ContractViolation> {
    let evaluation = expression.evaluate();
    if !evaluation.failed() {
        return Ok(evaluation);
    }

    let tree = formatter.format(&evaluation);
    let failure = Failure::new(kind, evaluation, tree);
    tracing::warn!(
        kind = %kind,
        root_cause = failure.root_cause_name().unwrap_or("<none>"),
        "contract violated"
    );
    Err(ContractViolation::new(kind, failure))
}
