use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-row outcome of term matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "labels", rename_all = "snake_case")]
pub enum MatchResult {
    /// The row had tokens but no term matched.
    NoMatch,
    /// Deduplicated labels of every matched term, sorted.
    Matched(BTreeSet<String>),
    /// post_only mode: the row is not a Post and was not evaluated. It is kept
    /// until the cascade decides.
    Excluded,
    /// The target text produced no tokens; the row was skipped.
    Empty,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    /// Whether the row survives the matching step (before any cascade).
    pub fn is_retained(&self) -> bool {
        matches!(self, MatchResult::Matched(_) | MatchResult::Excluded)
    }

    pub fn labels(&self) -> Option<&BTreeSet<String>> {
        match self {
            MatchResult::Matched(labels) => Some(labels),
            _ => None,
        }
    }
}

/// Which cell to match and whether post_only mode is on.
///
/// Passed explicitly into every [`Matcher::match_row`](crate::Matcher::match_row)
/// call; the matcher holds no mode state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScope {
    pub target_column: String,
    pub type_column: String,
    pub post_only: bool,
}

impl MatchScope {
    pub fn new(target_column: impl Into<String>) -> Self {
        Self {
            target_column: target_column.into(),
            type_column: "Type".to_string(),
            post_only: false,
        }
    }

    pub fn post_only(mut self, type_column: impl Into<String>) -> Self {
        self.type_column = type_column.into();
        self.post_only = true;
        self
    }
}
