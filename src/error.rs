use canonical::CanonicalError;
use ingest::IngestError;
use terms::TermError;
use thiserror::Error;

/// Errors surfaced by a filter run.
///
/// Everything is fatal: a run either completes or returns the first error.
/// Rows whose text is empty are not errors; they show up as
/// `MatchResult::Empty` and in [`FilterStats`](crate::FilterStats).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterError {
    /// Missing or unusable column, ambiguous term, or bad normalizer
    /// settings. Detected before any row is processed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A vocabulary entry is neither a string nor a list of strings.
    #[error("malformed term: {0}")]
    MalformedTerm(String),

    /// A metadata cell could not be coerced to an integer.
    #[error("processing error at row {row}: column {column:?} holds {value:?}")]
    Processing {
        row: usize,
        column: String,
        value: String,
    },
}

impl FilterError {
    /// Whether the error was raised before any row was touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FilterError::Configuration(_) | FilterError::MalformedTerm(_)
        )
    }
}

impl From<CanonicalError> for FilterError {
    fn from(err: CanonicalError) -> Self {
        FilterError::Configuration(err.to_string())
    }
}

impl From<TermError> for FilterError {
    fn from(err: TermError) -> Self {
        match err {
            TermError::AmbiguousPhrase { .. } | TermError::Canonical(_) => {
                FilterError::Configuration(err.to_string())
            }
            other => FilterError::MalformedTerm(other.to_string()),
        }
    }
}

impl From<IngestError> for FilterError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidInteger { row, column, value } => {
                FilterError::Processing { row, column, value }
            }
            other => FilterError::Configuration(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_phrase_is_configuration() {
        let err: FilterError = TermError::AmbiguousPhrase { index: 2 }.into();
        assert!(matches!(err, FilterError::Configuration(msg) if msg.contains("index 2")));
    }

    #[test]
    fn malformed_and_json_are_malformed_term() {
        let err: FilterError = TermError::NotAnArray.into();
        assert!(matches!(err, FilterError::MalformedTerm(_)));
        let err: FilterError = TermError::Json("eof".into()).into();
        assert!(matches!(err, FilterError::MalformedTerm(_)));
    }

    #[test]
    fn ingest_errors_split_by_kind() {
        let err: FilterError = IngestError::MissingColumn {
            column: "Likes".into(),
        }
        .into();
        assert!(err.is_configuration());

        let err: FilterError = IngestError::InvalidInteger {
            row: 4,
            column: "Likes".into(),
            value: "abc".into(),
        }
        .into();
        assert_eq!(
            err,
            FilterError::Processing {
                row: 4,
                column: "Likes".into(),
                value: "abc".into(),
            }
        );
        assert!(!err.is_configuration());
    }
}
