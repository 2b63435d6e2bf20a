//! Engagement-metadata coercion.
//!
//! Exporters leave count columns (likes, retweets, follower counts...) blank
//! when the platform reported nothing. Coercion turns those into `0` and every
//! other value into an `i64`, so downstream consumers see one type.
use crate::error::IngestError;
use crate::types::{Cell, Row};

/// Cell values that spreadsheet and dataframe exports use for "no value".
const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// Coerces every listed column present in `row` to [`Cell::Integer`].
///
/// Blank cells and missing-value markers become `0`. Columns that the row
/// does not have are skipped; schema checks happen before any row is touched.
/// Already-coerced cells are left as they are.
pub fn coerce_metadata<S: AsRef<str>>(row: &mut Row, columns: &[S]) -> Result<(), IngestError> {
    let index = row.index();
    for column in columns {
        let column = column.as_ref();
        let Some(cell) = row.get_mut(column) else {
            continue;
        };
        let value = match cell {
            Cell::Integer(_) => continue,
            Cell::Empty => 0,
            Cell::Text(raw) => parse_count(raw).ok_or_else(|| IngestError::InvalidInteger {
                row: index,
                column: column.to_string(),
                value: raw.clone(),
            })?,
        };
        *cell = Cell::Integer(value);
    }
    Ok(())
}

/// Parses a count cell.
///
/// Accepts optional surrounding whitespace, an optional sign, and integral
/// decimals such as `"12.0"` (float-typed export columns). Blank text and
/// missing-value markers read as `0`. Returns `None` for anything else.
pub fn parse_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        return Some(0);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let (whole, fraction) = trimmed.split_once('.')?;
    if whole.is_empty() || whole == "-" || whole == "+" {
        return None;
    }
    if !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    whole.parse::<i64>().ok()
}
