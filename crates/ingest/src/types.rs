//! Core data model types for the ingest crate.
//!
//! ```text
//! Dataset
//! ├── columns: Vec<String>        header, in file order
//! └── rows: Vec<Row>
//!     ├── index: usize            stable position in the dataset
//!     └── cells: IndexMap<String, Cell>
//!         ├── Text(String)
//!         ├── Integer(i64)        after metadata coercion
//!         └── Empty               missing or blank
//! ```
//!
//! The row index is only used to emit or remove rows; matching never looks
//! at it.
use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    Integer(i64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Builds a cell from raw text; blank text becomes [`Cell::Empty`].
    pub fn from_raw(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// Text view of the cell. Integers are rendered in decimal.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(text) => Cow::Borrowed(text.as_str()),
            Cell::Integer(value) => Cow::Owned(value.to_string()),
            Cell::Empty => Cow::Borrowed(""),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_raw(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::from_raw(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

/// Row kind in post/comment exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowType {
    Post,
    Comment,
    /// Any other value, including a blank cell.
    Other(String),
}

impl RowType {
    /// Parses the exporter's `Type` cell. Matching is exact, as exported.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Post" => RowType::Post,
            "Comment" => RowType::Comment,
            other => RowType::Other(other.to_string()),
        }
    }
}

/// An ordered mapping from column name to cell, tagged with its row index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    index: usize,
    cells: IndexMap<String, Cell>,
}

impl Row {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cells: IndexMap::new(),
        }
    }

    /// Builds a row from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<K, V, I>(index: usize, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Cell>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            index,
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Text of `column`, or `""` when the column is absent.
    pub fn text(&self, column: &str) -> Cow<'_, str> {
        self.cells
            .get(column)
            .map(Cell::to_text)
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Inserts or replaces a cell. New columns go to the end.
    pub fn set(&mut self, column: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(column.into(), cell.into());
    }

    pub(crate) fn get_mut(&mut self, column: &str) -> Option<&mut Cell> {
        self.cells.get_mut(column)
    }

    pub fn row_type(&self, type_column: &str) -> RowType {
        RowType::parse(&self.text(type_column))
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A full in-memory dataset: header plus rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a record aligned with the header.
    ///
    /// Missing trailing values become [`Cell::Empty`]; extra values are
    /// ignored. Returns the new row's index.
    pub fn push_record<I, S>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = self.rows.len();
        let mut values = values.into_iter();
        let mut row = Row::new(index);
        for column in &self.columns {
            let cell = values.next().map(Cell::from_raw).unwrap_or_default();
            row.set(column.clone(), cell);
        }
        self.rows.push(row);
        index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fails with [`IngestError::MissingColumn`] when the header lacks `column`.
    pub fn require_column(&self, column: &str) -> Result<(), IngestError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(IngestError::MissingColumn {
                column: column.to_string(),
            })
        }
    }
}
