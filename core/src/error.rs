use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// A persisted record could not be decoded. `line` is 1-based.
    #[error("Malformed record on line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// A 1-based display index outside `1..=len`.
    #[error("Index {index} is out of range (there are {len} item(s))")]
    OutOfRange { index: usize, len: usize },

    #[error("{0}")]
    InvalidInput(String),

    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

impl TrackerError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
