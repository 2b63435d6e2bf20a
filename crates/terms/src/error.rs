use canonical::CanonicalError;
use thiserror::Error;

/// Errors raised while loading or normalizing a vocabulary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TermError {
    /// The vocabulary document is not a JSON array.
    #[error("vocabulary must be a JSON array of terms")]
    NotAnArray,

    /// An entry is neither a string nor a list of at least two strings, or it
    /// normalizes to nothing.
    #[error("malformed term at index {index}: {reason}")]
    Malformed { index: usize, reason: String },

    /// A list with a single string. It could mean a simple term or a truncated
    /// phrase, so it is rejected instead of guessed.
    #[error("term at index {index} is a single-element list; write it as a plain string")]
    AmbiguousPhrase { index: usize },

    /// The vocabulary document is not valid JSON.
    #[error("invalid vocabulary json: {0}")]
    Json(String),

    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}

impl TermError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        TermError::Malformed {
            index,
            reason: reason.into(),
        }
    }
}
