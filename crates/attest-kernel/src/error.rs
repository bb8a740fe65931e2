//! Error types for kernel operations.

/// Errors raised while assembling expression trees.
///
/// Evaluation itself is total and has no error path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// A node was built from malformed parts.
    #[error("invalid construction: {reason}")]
    InvalidConstruction { reason: String },
}
