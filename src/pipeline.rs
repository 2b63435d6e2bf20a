//! The end-to-end filter run: validate, evaluate rows, cascade, annotate.
use std::time::{Duration, Instant};

use ingest::{coerce_metadata, Dataset, Row};
use matcher::{MatchResult, MatchScope, Matcher};
use rayon::prelude::*;
use terms::Vocabulary;
use tracing::{debug, info, info_span, warn};

use crate::cascade::{cascade, CascadeColumns};
use crate::config::FilterConfig;
use crate::error::FilterError;
use crate::output::{AnnotatedRow, FilterOutput, FilterStats};
use crate::platform::{extract_shortcode, Platform, SHORTCODE_COLUMN};

/// Parses a JSON vocabulary with the run's normalizer settings.
pub fn load_vocabulary(json: &str, config: &FilterConfig) -> Result<Vocabulary, FilterError> {
    let vocabulary = Vocabulary::from_json_str(json, &config.normalize)?;
    debug!(terms = vocabulary.len(), "vocabulary_ready");
    Ok(vocabulary)
}

/// Filters `dataset` against `vocabulary`.
///
/// Convenience wrapper over [`filter_with_matcher`].
pub fn filter_dataset(
    dataset: Dataset,
    vocabulary: Vocabulary,
    config: &FilterConfig,
) -> Result<FilterOutput, FilterError> {
    filter_with_matcher(dataset, &Matcher::new(vocabulary), config)
}

/// Runs one filter pass.
///
/// The configuration is checked against the dataset header before any row is
/// touched. Rows are then coerced and matched (on the rayon pool when
/// `config.parallel` is set), unmatched rows are dropped, and in post_only
/// mode comments whose parent post did not match are removed. Output keeps
/// input order; the first failing row, by index, aborts the run.
pub fn filter_with_matcher(
    dataset: Dataset,
    matcher: &Matcher,
    config: &FilterConfig,
) -> Result<FilterOutput, FilterError> {
    let span = info_span!(
        "termfilter.filter",
        rows = dataset.len(),
        terms = matcher.vocabulary().len(),
        post_only = config.post_only,
        parallel = config.parallel,
    );
    let _enter = span.enter();

    let start = Instant::now();
    let result = run(dataset, matcher, config).map(|mut output| {
        output.elapsed = start.elapsed();
        output
    });
    match &result {
        Ok(output) => {
            let s = &output.stats;
            info!(
                elapsed_ms = output.elapsed.as_millis() as u64,
                total = s.total_rows,
                evaluated = s.evaluated_rows,
                matched = s.matched_rows,
                empty = s.empty_rows,
                excluded = s.excluded_rows,
                removed_comments = s.removed_comments,
                emitted = s.emitted_rows,
                "filter_complete"
            );
        }
        Err(err) => warn!(error = %err, "filter_aborted"),
    }
    result
}

fn run(
    dataset: Dataset,
    matcher: &Matcher,
    config: &FilterConfig,
) -> Result<FilterOutput, FilterError> {
    config.validate_against(&dataset)?;

    let mut scope = MatchScope::new(config.target_column.as_str());
    if config.post_only {
        scope = scope.post_only(config.type_column.as_str());
    }

    let mut columns = dataset.columns().to_vec();
    let total_rows = dataset.len();
    let rows = dataset.into_rows();

    let evaluate = |row: Row| evaluate_row(row, matcher, &scope, &config.metadata_columns);
    let evaluated: Vec<Result<AnnotatedRow, FilterError>> = if config.parallel {
        rows.into_par_iter().map(evaluate).collect()
    } else {
        rows.into_iter().map(evaluate).collect()
    };
    let evaluated = evaluated.into_iter().collect::<Result<Vec<_>, _>>()?;

    let mut stats = FilterStats {
        total_rows,
        ..FilterStats::default()
    };
    for annotated in &evaluated {
        match annotated.result {
            MatchResult::Matched(_) => stats.matched_rows += 1,
            MatchResult::Empty => stats.empty_rows += 1,
            MatchResult::Excluded => stats.excluded_rows += 1,
            MatchResult::NoMatch => {}
        }
    }
    stats.evaluated_rows = total_rows - stats.excluded_rows;

    let retained: Vec<AnnotatedRow> = evaluated
        .into_iter()
        .filter(|r| r.result.is_retained())
        .collect();

    let (mut rows, removed_comments) = if config.post_only {
        let outcome = cascade(
            retained,
            CascadeColumns {
                id_column: &config.id_column,
                parent_id_column: &config.parent_id_column,
                type_column: &config.type_column,
            },
        );
        (outcome.rows, outcome.removed)
    } else {
        (retained, Vec::new())
    };

    if config.platform.emits_shortcode() {
        let url_column = Platform::Instagram.profile().id_column;
        for annotated in &mut rows {
            let code = extract_shortcode(&annotated.row.text(url_column)).to_string();
            annotated.row.set(SHORTCODE_COLUMN, code);
        }
        if !columns.iter().any(|c| c == SHORTCODE_COLUMN) {
            columns.push(SHORTCODE_COLUMN.to_string());
        }
    }

    stats.removed_comments = removed_comments.len();
    stats.emitted_rows = rows.len();

    Ok(FilterOutput {
        columns,
        rows,
        removed_comments,
        stats,
        elapsed: Duration::ZERO,
    })
}

fn evaluate_row<S: AsRef<str>>(
    mut row: Row,
    matcher: &Matcher,
    scope: &MatchScope,
    metadata_columns: &[S],
) -> Result<AnnotatedRow, FilterError> {
    coerce_metadata(&mut row, metadata_columns)?;
    let result = matcher.match_row(&row, scope);
    Ok(AnnotatedRow { row, result })
}
