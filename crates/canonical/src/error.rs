use thiserror::Error;

/// Errors that can occur while preparing the normalization pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid normalize configuration: {0}")]
    InvalidConfig(String),
}
