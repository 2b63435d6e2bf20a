//! Workspace umbrella crate for termfilter.
//!
//! Filters exported social-media datasets against a vocabulary of terms and
//! phrases. The stage crates do the per-row work:
//!
//! - `canonical`: Unicode normalization and tokenization.
//! - `terms`: vocabulary loading and validation.
//! - `ingest`: rows, cells and metadata coercion.
//! - `matcher`: per-row token index and term matching.
//!
//! This crate adds the run around them: configuration, the post/comment
//! cascade, the platform column table and CSV I/O.
//!
//! ```rust
//! use termfilter::{filter_dataset, load_vocabulary, Dataset, FilterConfig, MatchTermFormat};
//!
//! let config = FilterConfig::new("Text");
//! let vocabulary = load_vocabulary(r#"["alert", ["breaking", "news"]]"#, &config).unwrap();
//!
//! let mut dataset = Dataset::new(["Text"]);
//! dataset.push_record(["Breaking news alert today"]);
//! dataset.push_record(["Weather is nice"]);
//!
//! let output = filter_dataset(dataset, vocabulary, &config).unwrap();
//! assert_eq!(output.len(), 1);
//! assert_eq!(
//!     output.rows[0].match_term(&MatchTermFormat::JsonList),
//!     r#"["alert","breaking, news"]"#
//! );
//! ```

pub mod cascade;
pub mod config;
pub mod csv_io;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod platform;

pub use canonical::{normalize, tokenize, NormalizeConfig, Token};
pub use ingest::{Cell, Dataset, Row, RowType};
pub use matcher::{MatchResult, MatchScope, Matcher};
pub use terms::{Term, Vocabulary};

pub use crate::cascade::{cascade, CascadeColumns, CascadeOutcome, RemovalReason, RemovedComment};
pub use crate::config::{ConfigLoadError, FilterConfig, FilterTarget, MatchTermFormat, RunConfig};
pub use crate::error::FilterError;
pub use crate::output::{AnnotatedRow, FilterOutput, FilterStats};
pub use crate::pipeline::{filter_dataset, filter_with_matcher, load_vocabulary};
pub use crate::platform::{extract_shortcode, Platform, PlatformProfile, SHORTCODE_COLUMN};
