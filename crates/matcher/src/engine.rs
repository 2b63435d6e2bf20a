use std::collections::BTreeSet;
use std::sync::Arc;

use canonical::{tokenize, Token};
use ingest::{Row, RowType};
use terms::{Term, Vocabulary};
use tracing::trace;

use crate::index::TokenIndex;
use crate::types::{MatchResult, MatchScope};

#[cfg(test)]
mod tests;

/// Evaluates a vocabulary against rows.
///
/// Holds only the immutable vocabulary, so one matcher can be shared across
/// worker threads. Each call builds and drops its own [`TokenIndex`].
#[derive(Debug, Clone)]
pub struct Matcher {
    vocabulary: Arc<Vocabulary>,
}

impl Matcher {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_vocabulary_arc(Arc::new(vocabulary))
    }

    pub fn with_vocabulary_arc(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Tokenizes row text with the vocabulary's normalizer settings.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text, self.vocabulary.config())
    }

    /// Runs every term against a prepared row index.
    pub fn match_index(&self, index: &TokenIndex) -> MatchResult {
        match_terms(index, self.vocabulary.terms())
    }

    /// Tokenizes, indexes and matches free text.
    pub fn match_text(&self, text: &str) -> MatchResult {
        let tokens = self.tokenize(text);
        if tokens.is_empty() {
            return MatchResult::Empty;
        }
        let index = TokenIndex::build(&tokens);
        self.match_index(&index)
    }

    /// Matches the target cell of `row` under `scope`.
    ///
    /// In post_only mode anything that is not a Post short-circuits to
    /// [`MatchResult::Excluded`] before its text is looked at.
    pub fn match_row(&self, row: &Row, scope: &MatchScope) -> MatchResult {
        if scope.post_only && row.row_type(&scope.type_column) != RowType::Post {
            trace!(row = row.index(), "row_excluded");
            return MatchResult::Excluded;
        }
        let result = self.match_text(&row.text(&scope.target_column));
        if result == MatchResult::Empty {
            trace!(row = row.index(), "row_empty");
        }
        result
    }
}

/// Evaluates `terms` against one row's index.
///
/// Simple terms need exact membership. Phrases need every token present and
/// the leftmost occurrence of the first token at or before the leftmost
/// occurrence of the second; later tokens are only checked for presence.
pub fn match_terms(index: &TokenIndex, terms: &[Term]) -> MatchResult {
    let mut labels = BTreeSet::new();
    for term in terms {
        let matched = match term {
            Term::Simple(token) => index.contains(token),
            Term::Phrase(tokens) => phrase_matches(index, tokens),
        };
        if matched {
            labels.insert(term.label());
        }
    }
    if labels.is_empty() {
        MatchResult::NoMatch
    } else {
        MatchResult::Matched(labels)
    }
}

fn phrase_matches(index: &TokenIndex, tokens: &[String]) -> bool {
    if !tokens.iter().all(|t| index.contains(t)) {
        return false;
    }
    match (tokens.first(), tokens.get(1)) {
        (Some(first), Some(second)) => {
            index.first_position(first) <= index.first_position(second)
        }
        // Vocabulary loading rejects phrases shorter than two tokens.
        _ => false,
    }
}
