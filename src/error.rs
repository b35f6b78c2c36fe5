use thiserror::Error;

/// Convenience result type for series and frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Error type returned by every fallible operation in this crate.
///
/// Errors are values: an operation that fails hands back a `FrameError` instead of a partially
/// built result, so a chain of operations joined with `?` stops at the first failure.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading/writing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON reading/writing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The execution engine's worker pool could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Shapes do not line up (unequal column lengths, mismatched operand lengths, ...).
    #[error("dimension mismatch: {message}")]
    Dimension { message: String },

    /// A column (or join/group key) name could not be found.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// A value cannot be represented in the requested kind, or a missing value was used where a
    /// concrete one is required (e.g. as an index).
    #[error("coercion error: {message}")]
    Coercion { message: String },

    /// An index points outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// The input is empty where at least one item is required.
    #[error("empty input: {message}")]
    Empty { message: String },

    /// The input has a shape the operation does not accept.
    #[error("unsupported input: {message}")]
    Unsupported { message: String },
}

impl FrameError {
    pub(crate) fn dimension(message: impl Into<String>) -> Self {
        Self::Dimension {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }

    pub(crate) fn coercion(message: impl Into<String>) -> Self {
        Self::Coercion {
            message: message.into(),
        }
    }

    pub(crate) fn empty(message: impl Into<String>) -> Self {
        Self::Empty {
            message: message.into(),
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}
