/// Errors raised while building conditions.
#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    /// A `matches` pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
