//! Vocabulary model for termfilter.
//!
//! A vocabulary is an ordered list of [`Term`] values, each either a single
//! token or a phrase of two or more tokens. Terms are normalized once, at
//! load time, with the same [`canonical::NormalizeConfig`] the matcher later
//! uses for rows.
//!
//! The on-disk shape is a JSON array:
//!
//! ```rust
//! use canonical::NormalizeConfig;
//! use terms::{Term, Vocabulary};
//!
//! let vocab = Vocabulary::from_json_str(
//!     r#"["Alert", ["Breaking", "News"]]"#,
//!     &NormalizeConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(vocab.terms()[0], Term::Simple("alert".into()));
//! assert_eq!(vocab.terms()[1].label(), "breaking, news");
//! ```

mod error;
mod term;
mod vocabulary;

pub use crate::error::TermError;
pub use crate::term::Term;
pub use crate::vocabulary::Vocabulary;
