//! # Attest Kernel
//!
//! A contract-verification engine: callers assemble a tree of conditions over
//! subject values, evaluate it once, and get back a result tree that says
//! what passed, what failed, what was never run, and which single node
//! explains the outcome.
//!
//! ## Architecture
//!
//! ```text
//! Condition<T>          ← predicate + rationale generator over a subject
//!     │
//! Expression            ← Terminal | Negated | Compound(AND/OR/NAND/NOR)
//!     │  evaluate()
//! Evaluation            ← outcome, rationale, children, elapsed
//!     │  root_cause()
//! Cause                 ← the failing terminal + RootCauseChain
//! ```
//!
//! Compound nodes short-circuit: once the outcome is decided the remaining
//! children are recorded as skipped and neither their predicates nor their
//! rationale generators run.

pub mod cause;
pub mod compound;
pub mod condition;
pub mod error;
pub mod evaluation;
pub mod expression;
pub mod outcome;
pub mod rationale;

pub use cause::{Cause, RootCauseChain};
pub use compound::{Combinator, Tally};
pub use condition::{Condition, FnCondition, condition};
pub use error::KernelError;
pub use evaluation::{Evaluation, NodeKind, PreOrder};
pub use expression::{Compound, CompoundBuilder, Expression, Negated, Terminal};
pub use outcome::Outcome;
pub use rationale::{Rationale, RationaleGenerator};
