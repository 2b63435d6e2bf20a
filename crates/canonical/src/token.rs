use serde::{Deserialize, Serialize};

use crate::config::NormalizeConfig;
use crate::normalize::normalize_token;

/// A normalized token with its place in the row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Normalized token text.
    pub text: String,
    /// Ordinal position among the tokens kept for this row.
    pub position: usize,
    /// Byte offset (inclusive) of the source piece in the raw text.
    pub start: usize,
    /// Byte offset (exclusive) of the source piece in the raw text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Splits raw row text on Unicode whitespace and normalizes every piece.
///
/// Pieces that are empty after stripping (a lone "!!!" or "—") are dropped
/// and do not consume a position. Blank input yields an empty vector.
///
/// ```rust
/// use canonical::{tokenize, NormalizeConfig};
///
/// let tokens = tokenize("Olá, #Mundo! @user", &NormalizeConfig::default());
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["ola", "#mundo", "@user"]);
/// ```
pub fn tokenize(text: &str, cfg: &NormalizeConfig) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(piece_start) = start.take() {
                push_piece(&mut tokens, text, piece_start, idx, cfg);
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(piece_start) = start {
        push_piece(&mut tokens, text, piece_start, text.len(), cfg);
    }

    tokens
}

fn push_piece(
    tokens: &mut Vec<Token>,
    text: &str,
    start: usize,
    end: usize,
    cfg: &NormalizeConfig,
) {
    let normalized = normalize_token(&text[start..end], cfg);
    if normalized.is_empty() {
        return;
    }
    tokens.push(Token {
        text: normalized,
        position: tokens.len(),
        start,
        end,
    });
}
