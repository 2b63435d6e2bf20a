//! Platform column profiles.
//!
//! Exporters for each social network name their columns differently. Rather
//! than branching on the platform inside the engine, the differences live in
//! one lookup table, [`Platform::profile`], whose columns are copied into a
//! [`FilterConfig`](crate::FilterConfig).
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Source platform of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    /// Column names supplied by the caller.
    #[default]
    Custom,
}

/// Column layout of one platform's export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Post text column; `None` when the caller must name it.
    pub text_column: Option<&'static str>,
    /// Author column; `None` when the caller must name it.
    pub user_column: Option<&'static str>,
    /// Post identifier referenced by comments.
    pub id_column: &'static str,
    /// Column on comments pointing at the parent post.
    pub parent_id_column: &'static str,
    /// Engagement counts coerced to integers.
    pub metadata_columns: &'static [&'static str],
}

const TWITTER: PlatformProfile = PlatformProfile {
    text_column: Some("Tweet Text"),
    user_column: Some("Username"),
    id_column: "Tweet ID (click to view url)",
    parent_id_column: "SourcePostId",
    metadata_columns: &[
        "Retweets",
        "Comments",
        "Favorites",
        "Author Favorites",
        "Author Followers",
        "Author Friends",
    ],
};

const INSTAGRAM: PlatformProfile = PlatformProfile {
    text_column: Some("Caption"),
    user_column: Some("Username"),
    id_column: "URL",
    parent_id_column: "SourceLink",
    metadata_columns: &["Likes", "Comments", "Video View Count"],
};

const CUSTOM: PlatformProfile = PlatformProfile {
    text_column: None,
    user_column: None,
    id_column: "URL",
    parent_id_column: "SourceLink",
    metadata_columns: &[],
};

impl Platform {
    pub fn profile(self) -> &'static PlatformProfile {
        match self {
            Platform::Twitter => &TWITTER,
            Platform::Instagram => &INSTAGRAM,
            Platform::Custom => &CUSTOM,
        }
    }

    /// Whether emitted rows get a `Shortcode` column derived from `URL`.
    pub fn emits_shortcode(self) -> bool {
        matches!(self, Platform::Instagram)
    }
}

/// Column added to Instagram output rows.
pub const SHORTCODE_COLUMN: &str = "Shortcode";

static SHORTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/p/([^/]+)/").expect("shortcode pattern is valid"));

/// Extracts the post shortcode from an Instagram URL
/// (`https://www.instagram.com/p/<code>/`). Returns `""` when absent.
pub fn extract_shortcode(url: &str) -> &str {
    SHORTCODE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str())
}
