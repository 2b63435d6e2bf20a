//! Error types produced by the ingest crate.
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`MissingColumn`](IngestError::MissingColumn) | [`Dataset::require_column`](crate::Dataset::require_column) | Schema lacks a configured column |
//! | [`InvalidInteger`](IngestError::InvalidInteger) | [`coerce_metadata`](crate::coerce_metadata) | Metadata cell is present but not a count |
//!
//! A bad metadata value is never defaulted: it signals upstream corruption,
//! so the caller is expected to abort the run.
use thiserror::Error;

/// Errors that can occur while validating or coercing rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// A configured column does not exist in the dataset header.
    #[error("column {column:?} not found in dataset")]
    MissingColumn { column: String },

    /// A metadata cell holds a non-blank value that is not an integer.
    ///
    /// ```rust
    /// use ingest::IngestError;
    ///
    /// let err = IngestError::InvalidInteger {
    ///     row: 3,
    ///     column: "Likes".into(),
    ///     value: "abc".into(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "row 3: column \"Likes\" holds non-numeric value \"abc\""
    /// );
    /// ```
    #[error("row {row}: column {column:?} holds non-numeric value {value:?}")]
    InvalidInteger {
        row: usize,
        column: String,
        value: String,
    },
}
