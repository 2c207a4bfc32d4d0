#![forbid(unsafe_code)]

/// Result alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors raised while accumulating batches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// The policy does not provide the named operation.
    #[error("{0} is not implemented for this policy")]
    NotImplemented(&'static str),
    /// A batch size of zero can never be filled.
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
}
