//! termfilter ingest layer.
//!
//! Holds the in-memory shape of an exported dataset and the metadata
//! coercion that runs over each row before matching.
//!
//! ## Core types
//!
//! - [`Dataset`]: header plus rows, with schema checks
//!   ([`Dataset::require_column`]).
//! - [`Row`]: ordered column → [`Cell`] mapping with a stable row index.
//! - [`RowType`]: `Post` / `Comment` / other, read from the `Type` column.
//!
//! ## Example
//!
//! ```rust
//! use ingest::{coerce_metadata, Cell, Dataset};
//!
//! let mut dataset = Dataset::new(["Caption", "Likes"]);
//! dataset.push_record(["hello", ""]);
//! dataset.push_record(["again", "12"]);
//!
//! let mut rows = dataset.into_rows();
//! for row in &mut rows {
//!     coerce_metadata(row, &["Likes"]).unwrap();
//! }
//! assert_eq!(rows[0].get("Likes"), Some(&Cell::Integer(0)));
//! assert_eq!(rows[1].get("Likes"), Some(&Cell::Integer(12)));
//! ```

mod error;
mod metadata;
mod types;

pub use crate::error::IngestError;
pub use crate::metadata::{coerce_metadata, parse_count};
pub use crate::types::{Cell, Dataset, Row, RowType};

#[cfg(test)]
mod tests {
    use super::*;

    fn likes_row(index: usize, likes: &str) -> Row {
        Row::from_pairs(index, [("Caption", "text"), ("Likes", likes)])
    }

    #[test]
    fn blank_metadata_becomes_zero() {
        let mut row = likes_row(0, "");
        coerce_metadata(&mut row, &["Likes"]).expect("coerces");
        assert_eq!(row.get("Likes"), Some(&Cell::Integer(0)));

        let mut row = likes_row(1, "   ");
        coerce_metadata(&mut row, &["Likes"]).expect("coerces");
        assert_eq!(row.get("Likes"), Some(&Cell::Integer(0)));
    }

    #[test]
    fn numeric_metadata_becomes_integer() {
        let mut row = likes_row(0, "12");
        coerce_metadata(&mut row, &["Likes"]).expect("coerces");
        assert_eq!(row.get("Likes"), Some(&Cell::Integer(12)));
    }

    #[test]
    fn non_numeric_metadata_is_an_error_with_row_index() {
        let mut row = likes_row(7, "abc");
        let err = coerce_metadata(&mut row, &["Likes"]).expect_err("must fail");
        assert_eq!(
            err,
            IngestError::InvalidInteger {
                row: 7,
                column: "Likes".into(),
                value: "abc".into(),
            }
        );
    }

    #[test]
    fn coercion_is_idempotent_and_skips_absent_columns() {
        let mut row = likes_row(0, "5");
        coerce_metadata(&mut row, &["Likes", "Comments"]).expect("coerces");
        coerce_metadata(&mut row, &["Likes", "Comments"]).expect("coerces again");
        assert_eq!(row.get("Likes"), Some(&Cell::Integer(5)));
        assert_eq!(row.get("Comments"), None);
        assert_eq!(row.get("Caption"), Some(&Cell::Text("text".into())));
    }

    #[test]
    fn parse_count_accepts_export_forms() {
        assert_eq!(parse_count("42"), Some(42));
        assert_eq!(parse_count(" -3 "), Some(-3));
        assert_eq!(parse_count("+8"), Some(8));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count("7."), Some(7));
        assert_eq!(parse_count("NaN"), Some(0));
        assert_eq!(parse_count(""), Some(0));
    }

    #[test]
    fn parse_count_rejects_non_integers() {
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count("12.5"), None);
        assert_eq!(parse_count(".5"), None);
        assert_eq!(parse_count("1,234"), None);
        assert_eq!(parse_count("1e3"), None);
    }

    #[test]
    fn push_record_pads_short_records() {
        let mut dataset = Dataset::new(["a", "b", "c"]);
        let index = dataset.push_record(["1"]);
        assert_eq!(index, 0);
        let row = &dataset.rows()[0];
        assert_eq!(row.get("a"), Some(&Cell::Text("1".into())));
        assert_eq!(row.get("b"), Some(&Cell::Empty));
        assert_eq!(row.get("c"), Some(&Cell::Empty));
    }

    #[test]
    fn require_column_reports_missing_name() {
        let dataset = Dataset::new(["Tweet Text"]);
        assert!(dataset.require_column("Tweet Text").is_ok());
        assert_eq!(
            dataset.require_column("Caption"),
            Err(IngestError::MissingColumn {
                column: "Caption".into()
            })
        );
    }

    #[test]
    fn row_type_parsing() {
        assert_eq!(RowType::parse("Post"), RowType::Post);
        assert_eq!(RowType::parse(" Comment "), RowType::Comment);
        assert_eq!(RowType::parse("Reply"), RowType::Other("Reply".into()));
        let row = Row::from_pairs(0, [("Type", "Comment")]);
        assert_eq!(row.row_type("Type"), RowType::Comment);
        assert_eq!(row.row_type("Missing"), RowType::Other(String::new()));
    }

    #[test]
    fn cells_keep_column_order_and_serialize_untagged() {
        let mut row = Row::from_pairs(0, [("z", "1"), ("a", "")]);
        row.set("m", 3_i64);
        let names: Vec<&str> = row.cells().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        let json = serde_json::to_value(row.get("m")).expect("serializes");
        assert_eq!(json, serde_json::json!(3));
    }
}
