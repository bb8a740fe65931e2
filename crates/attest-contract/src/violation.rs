//! The error raised when a contract evaluates to `False`.

use attest_kernel::{Evaluation, RootCauseChain};
use std::fmt;
use thiserror::Error;

/// Which entry point raised the violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Precondition,
    Postcondition,
    Verification,
}

impl ContractKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractKind::Precondition => "precondition",
            ContractKind::Postcondition => "postcondition",
            ContractKind::Verification => "verification",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about a failed contract.
#[derive(Debug, Clone)]
pub struct Failure {
    summary: String,
    report: String,
    chain: Option<RootCauseChain>,
    evaluation: Evaluation,
}

impl Failure {
    pub(crate) fn new(kind: ContractKind, evaluation: Evaluation, tree: String) -> Self {
        let (summary, chain) = match evaluation.root_cause() {
            Some(cause) => (cause.name().to_string(), Some(cause.chain().clone())),
            None => (evaluation.name().to_string(), None),
        };

        let mut report = format!("{kind} failed: {summary}\n");
        if let Some(chain) = &chain {
            report.push_str(&format!("root cause: {chain}\n"));
        }
        report.push_str(&tree);

        Self {
            summary,
            report,
            chain,
            evaluation,
        }
    }

    /// Root cause name, or the evaluation's own name when there is none.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Header line, cause chain and the rendered tree.
    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn chain(&self) -> Option<&RootCauseChain> {
        self.chain.as_ref()
    }

    pub fn root_cause_name(&self) -> Option<&str> {
        self.chain.as_ref().and_then(RootCauseChain::leaf)
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }
}

#[derive(Debug, Clone, Error)]
pub enum ContractViolation {
    #[error("precondition failed: {}", .0.summary)]
    Precondition(Box<Failure>),

    #[error("postcondition failed: {}", .0.summary)]
    Postcondition(Box<Failure>),

    #[error("verification failed: {}", .0.summary)]
    Verification(Box<Failure>),
}

impl ContractViolation {
    pub(crate) fn new(kind: ContractKind, failure: Failure) -> Self {
        let failure = Box::new(failure);
        match kind {
            ContractKind::Precondition => ContractViolation::Precondition(failure),
            ContractKind::Postcondition => ContractViolation::Postcondition(failure),
            ContractKind::Verification => ContractViolation::Verification(failure),
        }
    }

    pub fn kind(&self) -> ContractKind {
        match self {
            ContractViolation::Precondition(_) => ContractKind::Precondition,
            ContractViolation::Postcondition(_) => ContractKind::Postcondition,
            ContractViolation::Verification(_) => ContractKind::Verification,
        }
    }

    pub fn failure(&self) -> &Failure {
        match self {
            ContractViolation::Precondition(failure)
            | ContractViolation::Postcondition(failure)
            | ContractViolation::Verification(failure) => failure,
        }
    }

    pub fn evaluation(&self) -> &Evaluation {
        self.failure().evaluation()
    }

    pub fn report(&self) -> &str {
        self.failure().report()
    }

    pub fn into_evaluation(self) -> Evaluation {
        match self {
            ContractViolation::Precondition(failure)
            | ContractViolation::Postcondition(failure)
            | ContractViolation::Verification(failure) => failure.evaluation,
        }
    }
}
