use std::time::Duration;

use ingest::Row;
use matcher::MatchResult;
use serde::Serialize;

use crate::cascade::RemovedComment;
use crate::config::MatchTermFormat;

/// A retained row together with its match outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRow {
    pub row: Row,
    pub result: MatchResult,
}

impl AnnotatedRow {
    /// Renders the `MatchTerm` cell. Rows without labels render empty.
    pub fn match_term(&self, format: &MatchTermFormat) -> String {
        self.result
            .labels()
            .map(|labels| format.render(labels))
            .unwrap_or_default()
    }
}

/// Row counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Rows in the input dataset.
    pub total_rows: usize,
    /// Rows whose text was tokenized and matched.
    pub evaluated_rows: usize,
    pub matched_rows: usize,
    /// Rows whose target text had no tokens.
    pub empty_rows: usize,
    /// Non-post rows bypassed in post_only mode.
    pub excluded_rows: usize,
    pub removed_comments: usize,
    pub emitted_rows: usize,
}

/// Result of [`filter_dataset`](crate::filter_dataset).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutput {
    /// Input header, in order.
    pub columns: Vec<String>,
    /// Emitted rows in input order.
    pub rows: Vec<AnnotatedRow>,
    pub removed_comments: Vec<RemovedComment>,
    pub stats: FilterStats,
    /// Wall time of the run, validation to annotation.
    pub elapsed: Duration,
}

impl FilterOutput {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(row index, MatchTerm)` pairs, handy for assertions and reports.
    pub fn match_terms(&self, format: &MatchTermFormat) -> Vec<(usize, String)> {
        self.rows
            .iter()
            .map(|r| (r.row.index(), r.match_term(format)))
            .collect()
    }
}
