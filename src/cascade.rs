//! Parent/child cascade for post_only runs.
//!
//! After matching, a comment is kept only when the post it replies to was
//! itself matched. Posts that survived matching seed the id set; comments are
//! then checked against it in one pass.
use std::collections::HashSet;

use ingest::RowType;
use serde::Serialize;
use tracing::info;

use crate::output::AnnotatedRow;

/// Column names the cascade reads.
#[derive(Debug, Clone, Copy)]
pub struct CascadeColumns<'a> {
    pub id_column: &'a str,
    pub parent_id_column: &'a str,
    pub type_column: &'a str,
}

/// Why a comment was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// The parent id names a post that was not matched.
    ParentNotMatched,
    /// The comment has no parent id at all.
    MissingParentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedComment {
    /// Original row index of the comment.
    pub row: usize,
    pub comment_id: Option<String>,
    pub parent_id: Option<String>,
    pub reason: RemovalReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// Surviving rows in input order.
    pub rows: Vec<AnnotatedRow>,
    pub removed: Vec<RemovedComment>,
}

/// Drops comments whose parent post is not among the matched posts.
///
/// Rows that are neither posts nor comments pass through unchanged.
pub fn cascade(rows: Vec<AnnotatedRow>, columns: CascadeColumns<'_>) -> CascadeOutcome {
    let matched_posts: HashSet<String> = rows
        .iter()
        .filter(|r| r.result.is_matched() && r.row.row_type(columns.type_column) == RowType::Post)
        .map(|r| r.row.text(columns.id_column).into_owned())
        .filter(|id| !id.is_empty())
        .collect();

    let mut kept = Vec::with_capacity(rows.len());
    let mut removed = Vec::new();

    for annotated in rows {
        if annotated.row.row_type(columns.type_column) != RowType::Comment {
            kept.push(annotated);
            continue;
        }
        let parent = annotated.row.text(columns.parent_id_column).into_owned();
        let reason = if parent.is_empty() {
            Some(RemovalReason::MissingParentId)
        } else if !matched_posts.contains(&parent) {
            Some(RemovalReason::ParentNotMatched)
        } else {
            None
        };
        match reason {
            None => kept.push(annotated),
            Some(reason) => {
                let record = RemovedComment {
                    row: annotated.row.index(),
                    comment_id: non_empty(annotated.row.text(columns.id_column).into_owned()),
                    parent_id: non_empty(parent),
                    reason,
                };
                info!(
                    row = record.row,
                    source_post = record.parent_id.as_deref().unwrap_or(""),
                    reason = ?record.reason,
                    "removed_comment"
                );
                removed.push(record);
            }
        }
    }

    CascadeOutcome {
        rows: kept,
        removed,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
