//! termfilter canonical text layer.
//!
//! Folds text into a comparable form and splits row text into tokens. The
//! vocabulary loader and the row matcher both go through this crate with the
//! same [`NormalizeConfig`], which is what makes a term and a row token equal.
//!
//! ## What we do
//!
//! - Diacritic folding (NFKD + non-spacing mark removal, then ASCII
//!   transliteration of Latin letters like `ł`, `ø`, `ß` via `deunicode`)
//! - Locale-free lowercasing
//! - Whitespace tokenization with per-token character stripping; letters,
//!   digits, `#`, `@` and `_` survive
//! - Ordinal positions and raw byte spans on every token
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text and config give
//! the same tokens on any machine.

mod config;
mod error;
mod normalize;
mod token;

pub use crate::config::NormalizeConfig;
pub use crate::error::CanonicalError;
pub use crate::normalize::{is_token_char, normalize, normalize_token};
pub use crate::token::{tokenize, Token};

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn case_and_diacritic_insensitive() {
        let cfg = NormalizeConfig::default();
        let a = normalize("CAFÉ", &cfg);
        let b = normalize("cafe", &cfg);
        let c = normalize("café", &cfg);
        let d = normalize("Cafe\u{0301}", &cfg);
        assert_eq!(a, "cafe");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c, d);
    }

    #[test]
    fn normalize_is_idempotent() {
        let cfg = NormalizeConfig::default();
        let inputs = [
            "CAFÉ",
            "São Paulo",
            "İstanbul",
            "ｆｕｌｌｗｉｄｔｈ",
            "\u{1D2C}BC",
            "Straße",
            "ẞ ŁÓDŹ Ørsted Æ",
            "ΣΊΣΥΦΟΣ",
            "emoji \u{1f600} ok",
            "",
        ];
        for input in inputs {
            let once = normalize(input, &cfg);
            let twice = normalize(&once, &cfg);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn undecomposable_latin_letters_transliterate() {
        let cfg = NormalizeConfig::default();
        assert_eq!(normalize("Łódź", &cfg), "lodz");
        assert_eq!(normalize("Ørsted", &cfg), "orsted");
        assert_eq!(normalize("Đorđe", &cfg), "dorde");
        assert_eq!(normalize("Straße", &cfg), "strasse");
        assert_eq!(normalize("Æther", &cfg), "aether");
        assert_eq!(normalize("Łódź", &cfg), normalize("lodz", &cfg));
    }

    #[test]
    fn transliteration_leaves_symbols_and_other_scripts() {
        let cfg = NormalizeConfig::default();
        assert_eq!(normalize("3×4", &cfg), "3×4");
        assert_eq!(normalize("世界", &cfg), "世界");
        assert_eq!(normalize("москва", &cfg), "москва");
    }

    #[test]
    fn compatibility_forms_fold() {
        let cfg = NormalizeConfig::default();
        assert_eq!(normalize("ｆｕｌｌ", &cfg), "full");
        assert_eq!(normalize("İstanbul", &cfg), "istanbul");
    }

    #[test]
    fn token_stripping_keeps_hashtags_and_mentions() {
        let cfg = NormalizeConfig::default();
        let tokens = tokenize("Breaking: #News from @Reuters_Br, (today)!", &cfg);
        assert_eq!(
            texts(&tokens),
            vec!["breaking", "#news", "from", "@reuters_br", "today"]
        );
    }

    #[test]
    fn punctuation_only_pieces_are_dropped_without_consuming_positions() {
        let cfg = NormalizeConfig::default();
        let tokens = tokenize("new !!! — year", &cfg);
        assert_eq!(texts(&tokens), vec!["new", "year"]);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn token_spans_point_into_raw_text() {
        let cfg = NormalizeConfig::default();
        let raw = "  Olá\tmundo! ";
        let tokens = tokenize(raw, &cfg);
        assert_eq!(tokens.len(), 2);
        assert_eq!(&raw[tokens[0].start..tokens[0].end], "Olá");
        assert_eq!(&raw[tokens[1].start..tokens[1].end], "mundo!");
    }

    #[test]
    fn blank_text_has_no_tokens() {
        let cfg = NormalizeConfig::default();
        assert!(tokenize("", &cfg).is_empty());
        assert!(tokenize(" \n\t ", &cfg).is_empty());
        assert!(tokenize("... !!", &cfg).is_empty());
    }

    #[test]
    fn non_latin_scripts_survive() {
        let cfg = NormalizeConfig::default();
        let tokens = tokenize("こんにちは 世界", &cfg);
        assert_eq!(texts(&tokens), vec!["こんにちは", "世界"]);
    }

    #[test]
    fn lowercase_can_be_disabled() {
        let cfg = NormalizeConfig {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(normalize("Café", &cfg), "Cafe");
    }

    #[test]
    fn invalid_config_version_rejected() {
        let cfg = NormalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(CanonicalError::InvalidConfig(_))));
        assert!(NormalizeConfig::default().validate().is_ok());
    }
}
