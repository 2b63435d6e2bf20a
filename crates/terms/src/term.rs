use std::slice;

use serde::{Deserialize, Serialize};

/// A vocabulary entry.
///
/// Serialized untagged so the in-memory form mirrors the on-disk JSON
/// shape: a plain string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    /// Matches when the token appears anywhere in the row.
    Simple(String),
    /// Matches when every token appears in the row and the first token's
    /// leftmost occurrence is not after the second token's.
    Phrase(Vec<String>),
}

impl Term {
    /// Tokens of the term in declared order.
    pub fn tokens(&self) -> &[String] {
        match self {
            Term::Simple(token) => slice::from_ref(token),
            Term::Phrase(tokens) => tokens,
        }
    }

    /// Label reported in `MatchTerm`: the token itself, or the phrase tokens
    /// joined with `", "`.
    pub fn label(&self) -> String {
        match self {
            Term::Simple(token) => token.clone(),
            Term::Phrase(tokens) => tokens.join(", "),
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self, Term::Phrase(_))
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Simple(value.to_string())
    }
}

impl<const N: usize> From<[&str; N]> for Term {
    fn from(value: [&str; N]) -> Self {
        Term::Phrase(value.iter().map(|t| t.to_string()).collect())
    }
}
