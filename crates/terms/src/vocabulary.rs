use std::io::Read;

use canonical::{normalize_token, NormalizeConfig};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TermError;
use crate::term::Term;

/// An ordered, normalized vocabulary.
///
/// Every token stored here has already gone through [`normalize_token`] with
/// [`Vocabulary::config`]. Rows must be tokenized with that same config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<Term>,
    config: NormalizeConfig,
}

impl Vocabulary {
    /// Normalizes and validates terms built in code.
    pub fn from_terms<I>(terms: I, cfg: &NormalizeConfig) -> Result<Self, TermError>
    where
        I: IntoIterator<Item = Term>,
    {
        cfg.validate()?;
        let terms = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| normalize_term(index, term, cfg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::finish(terms, cfg))
    }

    /// Parses a vocabulary from an already decoded JSON document.
    ///
    /// The document must be an array whose entries are strings or arrays of
    /// at least two strings.
    pub fn from_json_value(value: &Value, cfg: &NormalizeConfig) -> Result<Self, TermError> {
        cfg.validate()?;
        let entries = value.as_array().ok_or(TermError::NotAnArray)?;
        let terms = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let raw = term_from_value(index, entry)?;
                normalize_term(index, raw, cfg)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::finish(terms, cfg))
    }

    pub fn from_json_str(json: &str, cfg: &NormalizeConfig) -> Result<Self, TermError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| TermError::Json(e.to_string()))?;
        Self::from_json_value(&value, cfg)
    }

    pub fn from_reader<R: Read>(reader: R, cfg: &NormalizeConfig) -> Result<Self, TermError> {
        let value: Value =
            serde_json::from_reader(reader).map_err(|e| TermError::Json(e.to_string()))?;
        Self::from_json_value(&value, cfg)
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Normalizer settings the terms were folded with.
    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn finish(terms: Vec<Term>, cfg: &NormalizeConfig) -> Self {
        if terms.is_empty() {
            warn!("vocabulary_empty");
        }
        debug!(
            terms = terms.len(),
            phrases = terms.iter().filter(|t| t.is_phrase()).count(),
            "vocabulary_loaded"
        );
        Self {
            terms,
            config: cfg.clone(),
        }
    }
}

fn term_from_value(index: usize, entry: &Value) -> Result<Term, TermError> {
    match entry {
        Value::String(token) => Ok(Term::Simple(token.clone())),
        Value::Array(items) => {
            let tokens = items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        TermError::malformed(index, "phrase members must be strings")
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Term::Phrase(tokens))
        }
        other => Err(TermError::malformed(
            index,
            format!("expected a string or a list of strings, found {}", json_kind(other)),
        )),
    }
}

fn normalize_term(index: usize, term: Term, cfg: &NormalizeConfig) -> Result<Term, TermError> {
    match term {
        Term::Simple(token) => Ok(Term::Simple(normalize_piece(index, &token, cfg)?)),
        Term::Phrase(tokens) => match tokens.len() {
            0 => Err(TermError::malformed(index, "phrase list is empty")),
            1 => Err(TermError::AmbiguousPhrase { index }),
            _ => {
                let tokens = tokens
                    .iter()
                    .map(|token| normalize_piece(index, token, cfg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Phrase(tokens))
            }
        },
    }
}

/// Normalizes one term or phrase member.
///
/// Rows are split on whitespace, so a piece that still contains whitespace
/// after trimming can never equal a row token. It is kept, word by word
/// normalized, and reported.
fn normalize_piece(index: usize, raw: &str, cfg: &NormalizeConfig) -> Result<String, TermError> {
    let trimmed = raw.trim();
    let token = if trimmed.contains(char::is_whitespace) {
        let words: Vec<String> = trimmed
            .split_whitespace()
            .map(|word| normalize_token(word, cfg))
            .filter(|word| !word.is_empty())
            .collect();
        let joined = words.join(" ");
        if words.len() > 1 {
            warn!(index, term = %trimmed, "term_never_matches");
        }
        joined
    } else {
        normalize_token(trimmed, cfg)
    };
    if token.is_empty() {
        return Err(TermError::malformed(
            index,
            format!("{raw:?} is empty after normalization"),
        ));
    }
    Ok(token)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
