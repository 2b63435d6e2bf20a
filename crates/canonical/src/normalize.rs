use std::borrow::Cow;

use deunicode::deunicode_char;
use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;

/// Folds `text` into its canonical comparable form.
///
/// With the default config this is diacritic-insensitive and
/// case-insensitive:
///
/// ```rust
/// use canonical::{normalize, NormalizeConfig};
///
/// let cfg = NormalizeConfig::default();
/// assert_eq!(normalize("CAFÉ", &cfg), "cafe");
/// assert_eq!(normalize("café", &cfg), normalize("cafe", &cfg));
/// assert_eq!(normalize("Łódź", &cfg), "lodz");
/// assert_eq!(normalize("Straße", &cfg), "strasse");
/// ```
///
/// The result is a fixed point: `normalize(normalize(x)) == normalize(x)`.
/// Punctuation is left alone here; stripping happens per token in
/// [`normalize_token`].
pub fn normalize(text: &str, cfg: &NormalizeConfig) -> String {
    match (cfg.fold_diacritics, cfg.lowercase) {
        (true, true) => {
            // Compatibility forms can decompose to uppercase ("ᴬ" → "A"), so
            // lowercase after the first fold and fold once more.
            let lowered = fold(text).to_lowercase();
            fold(&lowered).into_owned()
        }
        (true, false) => fold(text).into_owned(),
        (false, true) => text.to_lowercase(),
        (false, false) => text.to_string(),
    }
}

/// Normalizes a single whitespace-free piece and drops every character that
/// cannot be part of a token.
///
/// Kept characters are Unicode letters and digits plus `#`, `@` and `_`, so
/// hashtags and mentions stay first-class tokens.
pub fn normalize_token(piece: &str, cfg: &NormalizeConfig) -> String {
    let mut normalized = normalize(piece, cfg);
    normalized.retain(is_token_char);
    normalized
}

/// Returns true for characters that survive token stripping.
#[inline]
pub fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '#' | '@' | '_')
}

/// NFKD decomposition, removal of non-spacing marks, then ASCII
/// transliteration of Latin letters that have no decomposition
/// (`ł`, `ø`, `đ`, `ß`, `æ`).
fn fold(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for ch in text.nfkd().filter(|ch| !ch.is_mark_nonspacing()) {
        match transliterate_latin(ch) {
            Some(ascii) => out.push_str(ascii),
            None => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Other scripts are left alone so they still tokenize as written.
fn transliterate_latin(ch: char) -> Option<&'static str> {
    if ch.is_ascii() || !ch.is_alphabetic() || !is_latin_block(ch) {
        return None;
    }
    deunicode_char(ch).filter(|ascii| {
        !ascii.is_empty() && ascii.bytes().all(|b| b.is_ascii_alphanumeric())
    })
}

fn is_latin_block(ch: char) -> bool {
    matches!(
        ch,
        '\u{00C0}'..='\u{024F}'
            | '\u{1E00}'..='\u{1EFF}'
            | '\u{2C60}'..='\u{2C7F}'
            | '\u{A720}'..='\u{A7FF}'
            | '\u{AB30}'..='\u{AB6F}'
    )
}
