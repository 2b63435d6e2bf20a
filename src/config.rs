//! Run configuration.
//!
//! Two layers:
//!
//! - [`RunConfig`] is the loose, file- and CLI-facing form. Most fields are
//!   optional and fall back to the [`Platform`] profile.
//! - [`FilterConfig`] is the resolved form the engine consumes. Every column
//!   is explicit.
//!
//! ## Example YAML configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "election sample"
//! platform: instagram
//! target: text
//! post_only: true
//! metadata_columns: ["Likes", "Comments"]
//! match_term_format:
//!   style: delimited
//!   separator: " | "
//! normalize:
//!   version: 1
//!   fold_diacritics: true
//!   lowercase: true
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use canonical::NormalizeConfig;
use ingest::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::FilterError;
use crate::platform::Platform;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error(transparent)]
    Invalid(#[from] FilterError),
}

/// Which column of a post the vocabulary is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterTarget {
    /// The post text (tweet text, caption).
    #[default]
    Text,
    /// The author column. Implies post_only unless overridden.
    Username,
}

/// How the `MatchTerm` cell is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum MatchTermFormat {
    /// JSON array of labels: `["alert","breaking, news"]`.
    #[default]
    JsonList,
    /// Labels joined with `separator`.
    Delimited { separator: String },
}

impl MatchTermFormat {
    pub fn render(&self, labels: &BTreeSet<String>) -> String {
        match self {
            MatchTermFormat::JsonList => serde_json::to_string(labels).unwrap_or_default(),
            MatchTermFormat::Delimited { separator } => labels
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(separator),
        }
    }
}

/// Fully resolved engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub platform: Platform,
    /// Column whose text is matched.
    pub target_column: String,
    /// Columns coerced to integers (blank → 0).
    pub metadata_columns: Vec<String>,
    /// Drop comments whose parent post did not match.
    pub post_only: bool,
    /// Column holding `Post` / `Comment`.
    pub type_column: String,
    /// Post identifier column.
    pub id_column: String,
    /// Parent-post identifier column on comments.
    pub parent_id_column: String,
    pub match_term_format: MatchTermFormat,
    /// Evaluate rows on the rayon pool.
    pub parallel: bool,
    pub normalize: NormalizeConfig,
}

impl FilterConfig {
    /// Text filtering over `target_column` with custom-platform defaults.
    pub fn new(target_column: impl Into<String>) -> Self {
        let profile = Platform::Custom.profile();
        Self {
            platform: Platform::Custom,
            target_column: target_column.into(),
            metadata_columns: Vec::new(),
            post_only: false,
            type_column: default_type_column(),
            id_column: profile.id_column.to_string(),
            parent_id_column: profile.parent_id_column.to_string(),
            match_term_format: MatchTermFormat::default(),
            parallel: true,
            normalize: NormalizeConfig::default(),
        }
    }

    /// Configuration for a known platform's export layout.
    ///
    /// [`Platform::Custom`] has no default columns and is rejected; use
    /// [`FilterConfig::new`] or a [`RunConfig`] with explicit columns.
    pub fn for_platform(platform: Platform, target: FilterTarget) -> Result<Self, FilterError> {
        RunConfig {
            platform,
            target,
            ..RunConfig::default()
        }
        .resolve()
    }

    /// Loads a [`RunConfig`] file and resolves it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        Ok(RunConfig::from_file(path)?.resolve()?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        Ok(RunConfig::from_yaml(yaml)?.resolve()?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        Ok(RunConfig::from_json(json)?.resolve()?)
    }

    pub fn with_post_only(mut self, post_only: bool) -> Self {
        self.post_only = post_only;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_metadata_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_match_term_format(mut self, format: MatchTermFormat) -> Self {
        self.match_term_format = format;
        self
    }

    /// Checks the configuration on its own, without a dataset.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.normalize.validate()?;
        non_empty("target_column", &self.target_column)?;
        for column in &self.metadata_columns {
            non_empty("metadata_columns", column)?;
        }
        if self.post_only {
            non_empty("type_column", &self.type_column)?;
            non_empty("id_column", &self.id_column)?;
            non_empty("parent_id_column", &self.parent_id_column)?;
        }
        if let MatchTermFormat::Delimited { separator } = &self.match_term_format {
            if separator.is_empty() {
                return Err(FilterError::Configuration(
                    "match_term_format separator must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Checks that every configured column exists in `dataset`.
    ///
    /// Runs before any row is processed.
    pub fn validate_against(&self, dataset: &Dataset) -> Result<(), FilterError> {
        self.validate()?;
        dataset.require_column(&self.target_column)?;
        for column in &self.metadata_columns {
            dataset.require_column(column)?;
        }
        if self.post_only {
            dataset.require_column(&self.type_column)?;
            dataset.require_column(&self.id_column)?;
            dataset.require_column(&self.parent_id_column)?;
        }
        Ok(())
    }
}

fn non_empty(field: &str, value: &str) -> Result<(), FilterError> {
    if value.trim().is_empty() {
        return Err(FilterError::Configuration(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// File- and CLI-facing configuration.
///
/// Unset columns fall back to the platform profile when resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunConfig {
    /// Configuration format version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub target: FilterTarget,

    /// Explicit column to match; wins over `target`.
    #[serde(default)]
    pub target_column: Option<String>,

    /// Text column for custom exports.
    #[serde(default)]
    pub text_column: Option<String>,

    /// Author column for custom exports.
    #[serde(default)]
    pub user_column: Option<String>,

    #[serde(default)]
    pub metadata_columns: Option<Vec<String>>,

    /// Defaults to true for [`FilterTarget::Username`], false otherwise.
    #[serde(default)]
    pub post_only: Option<bool>,

    #[serde(default)]
    pub type_column: Option<String>,

    #[serde(default)]
    pub id_column: Option<String>,

    #[serde(default)]
    pub parent_id_column: Option<String>,

    #[serde(default)]
    pub match_term_format: MatchTermFormat,

    #[serde(default = "true_value")]
    pub parallel: bool,

    #[serde(default)]
    pub normalize: NormalizeConfig,
}

impl RunConfig {
    /// Load a YAML or JSON configuration file, chosen by extension
    /// (`.json` is JSON, anything else YAML).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: RunConfig = serde_yaml::from_str(yaml)?;
        config.check_version()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.check_version()?;
        Ok(config)
    }

    fn check_version(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }
    }

    /// Resolves platform fallbacks into a validated [`FilterConfig`].
    pub fn resolve(self) -> Result<FilterConfig, FilterError> {
        let profile = self.platform.profile();

        let target_column = match (self.target_column, self.target) {
            (Some(column), _) => column,
            (None, FilterTarget::Text) => self
                .text_column
                .or_else(|| profile.text_column.map(str::to_string))
                .ok_or_else(|| missing_column(self.platform, "text_column"))?,
            (None, FilterTarget::Username) => self
                .user_column
                .or_else(|| profile.user_column.map(str::to_string))
                .ok_or_else(|| missing_column(self.platform, "user_column"))?,
        };

        let config = FilterConfig {
            platform: self.platform,
            target_column,
            metadata_columns: self.metadata_columns.unwrap_or_else(|| {
                profile
                    .metadata_columns
                    .iter()
                    .map(|c| c.to_string())
                    .collect()
            }),
            post_only: self
                .post_only
                .unwrap_or(self.target == FilterTarget::Username),
            type_column: self.type_column.unwrap_or_else(default_type_column),
            id_column: self
                .id_column
                .unwrap_or_else(|| profile.id_column.to_string()),
            parent_id_column: self
                .parent_id_column
                .unwrap_or_else(|| profile.parent_id_column.to_string()),
            match_term_format: self.match_term_format,
            parallel: self.parallel,
            normalize: self.normalize,
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            name: None,
            platform: Platform::default(),
            target: FilterTarget::default(),
            target_column: None,
            text_column: None,
            user_column: None,
            metadata_columns: None,
            post_only: None,
            type_column: None,
            id_column: None,
            parent_id_column: None,
            match_term_format: MatchTermFormat::default(),
            parallel: true,
            normalize: NormalizeConfig::default(),
        }
    }
}

fn missing_column(platform: Platform, field: &str) -> FilterError {
    FilterError::Configuration(format!(
        "platform {platform:?} has no default column; set {field}"
    ))
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_type_column() -> String {
    "Type".to_string()
}

fn true_value() -> bool {
    true
}
