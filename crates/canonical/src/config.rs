//! Configuration types for the normalization pass.
//!
//! [`NormalizeConfig`] controls how vocabulary terms and row text are folded
//! into comparable tokens. The same value must be used for both sides of a
//! match; the umbrella crate threads one instance through the vocabulary
//! loader and the matcher so the two passes cannot drift apart.
//!
//! # Versioning
//!
//! Any change to folding behavior must come with a version bump. Version 0 is
//! reserved and rejected by [`NormalizeConfig::validate`].
//!
//! # Examples
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.fold_diacritics);
//! assert!(config.lowercase);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the normalization and tokenization pass.
///
/// Cheap to clone and serde-friendly so it can be embedded in the run
/// configuration file:
///
/// ```json
/// {
///   "version": 1,
///   "fold_diacritics": true,
///   "lowercase": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Version of the folding rules. Must be >= 1.
    pub version: u32,

    /// If true, decompose with NFKD and drop non-spacing marks, so that
    /// "café", "cafe\u{0301}" and "cafe" fold to the same token.
    ///
    /// Compatibility characters are folded as well ("ｃａｆｅ" → "cafe"), and
    /// Latin letters without a decomposition are transliterated
    /// ("Łódź" → "Lodz", "ß" → "ss").
    pub fold_diacritics: bool,

    /// If true, apply locale-free Unicode lowercasing.
    pub lowercase: bool,
}

impl NormalizeConfig {
    /// Rejects reserved or inconsistent settings.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            fold_diacritics: true,
            lowercase: true,
        }
    }
}
