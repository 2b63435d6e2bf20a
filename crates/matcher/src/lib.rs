//! # termfilter matcher (`matcher`)
//!
//! Decides, row by row, which vocabulary terms a row's target text contains.
//!
//! ## Core types
//!
//! - [`TokenIndex`]: per-row character trie for exact token membership and
//!   leftmost positions. Built and dropped inside each evaluation.
//! - [`Matcher`]: holds the shared [`terms::Vocabulary`] and evaluates rows.
//! - [`MatchScope`]: target column, type column and the post_only switch.
//! - [`MatchResult`]: `NoMatch`, `Matched(labels)`, `Excluded` or `Empty`.
//!
//! ## Example
//!
//! ```rust
//! use canonical::NormalizeConfig;
//! use matcher::{Matcher, MatchResult};
//! use terms::Vocabulary;
//!
//! let vocab = Vocabulary::from_json_str(
//!     r#"["alert", ["breaking", "news"]]"#,
//!     &NormalizeConfig::default(),
//! )
//! .unwrap();
//! let matcher = Matcher::new(vocab);
//!
//! let result = matcher.match_text("Breaking news alert today");
//! let labels: Vec<_> = result.labels().unwrap().iter().cloned().collect();
//! assert_eq!(labels, vec!["alert", "breaking, news"]);
//!
//! assert_eq!(matcher.match_text("nothing here"), MatchResult::NoMatch);
//! ```

pub mod engine;
pub mod index;
pub mod types;

pub use crate::engine::{match_terms, Matcher};
pub use crate::index::TokenIndex;
pub use crate::types::{MatchResult, MatchScope};
