//! CSV reading and writing at the edges of a run.
//!
//! The core never touches the filesystem; these helpers load a [`Dataset`]
//! and write a [`FilterOutput`] back out.
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use ingest::Dataset;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MatchTermFormat;
use crate::output::FilterOutput;

/// Column appended to every output file.
pub const MATCH_TERM_COLUMN: &str = "MatchTerm";

#[derive(Debug, Error)]
pub enum CsvIoError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed csv: column {column:?} appears more than once in the header")]
    DuplicateColumn { column: String },
}

/// Reads a headed CSV file. Every cell is text; blanks become empty cells.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, CsvIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => CsvIoError::NotFound {
            path: path.to_path_buf(),
        },
        _ => CsvIoError::Io(err),
    })?;
    let dataset = read_dataset_from(file)?;
    debug!(path = %path.display(), rows = dataset.len(), "dataset_read");
    Ok(dataset)
}

pub fn read_dataset_from<R: Read>(reader: R) -> Result<Dataset, CsvIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = reader.headers()?;
    reject_duplicate_columns(headers)?;
    let mut dataset = Dataset::new(headers.iter());
    for record in reader.records() {
        let record = record?;
        dataset.push_record(record.iter());
    }
    Ok(dataset)
}

fn reject_duplicate_columns(headers: &csv::StringRecord) -> Result<(), CsvIoError> {
    let mut seen = HashSet::with_capacity(headers.len());
    match headers.iter().find(|column| !seen.insert(*column)) {
        Some(column) => Err(CsvIoError::DuplicateColumn {
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Writes `output` with its columns followed by `MatchTerm`.
///
/// An input that already carries a `MatchTerm` column has it overwritten in
/// place. When no row survived, only the header is written.
pub fn write_output<P: AsRef<Path>>(
    path: P,
    output: &FilterOutput,
    format: &MatchTermFormat,
) -> Result<(), CsvIoError> {
    let path = path.as_ref();
    if output.is_empty() {
        warn!(path = %path.display(), "no_rows_matched");
    }
    let file = File::create(path)?;
    write_output_to(file, output, format)?;
    debug!(path = %path.display(), rows = output.len(), "output_written");
    Ok(())
}

pub fn write_output_to<W: Write>(
    writer: W,
    output: &FilterOutput,
    format: &MatchTermFormat,
) -> Result<(), CsvIoError> {
    let mut writer = csv::Writer::from_writer(writer);
    let existing = output.columns.iter().position(|c| c == MATCH_TERM_COLUMN);
    let mut header: Vec<&str> = output.columns.iter().map(String::as_str).collect();
    if existing.is_none() {
        header.push(MATCH_TERM_COLUMN);
    }
    writer.write_record(&header)?;

    for annotated in &output.rows {
        let mut record: Vec<String> = output
            .columns
            .iter()
            .map(|column| annotated.row.text(column).into_owned())
            .collect();
        let match_term = annotated.match_term(format);
        match existing {
            Some(at) => record[at] = match_term,
            None => record.push(match_term),
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// `<dir>/<stem>_filtered.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_filtered.csv"))
}
