#![forbid(unsafe_code)]

use std::path::PathBuf;

/// Result alias for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors raised while building vocabularies, windows or streams.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Windows of length zero carry no tokens.
    #[error("window length must be greater than zero")]
    ZeroWindow,
    /// Reading or listing a path failed.
    #[error("{}: {}", .path.display(), .source)]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A vocabulary or config file did not parse.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Token data did not fit the requested array shape.
    #[error("array shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
    /// Batch configuration was rejected.
    #[error(transparent)]
    Batch(#[from] batch::BatchError),
}

impl EncodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EncodeError::Io {
            path: path.into(),
            source,
        }
    }
}
