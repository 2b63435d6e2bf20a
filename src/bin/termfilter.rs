//! termfilter: filter an exported social-media CSV by a vocabulary.
//!
//! Reads a JSON vocabulary and a CSV dataset, keeps the rows whose target
//! column contains at least one term, and writes them with a `MatchTerm`
//! column to `<dataset>_filtered.csv` (or `--output`).
//!
//! Exit codes:
//! - 0: success
//! - 1: incorrect file format
//! - 2: invalid value (configuration or vocabulary)
//! - 3: file not found
//! - 4: processing error
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termfilter::csv_io::{self, CsvIoError};
use termfilter::{
    ConfigLoadError, FilterError, FilterTarget, MatchTermFormat, Platform, RunConfig, Vocabulary,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "termfilter")]
#[command(about = "Filter social-media CSV exports by a vocabulary of terms and phrases", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON vocabulary: an array of strings and string arrays.
    vocabulary: PathBuf,

    /// CSV dataset with a header row.
    dataset: PathBuf,

    /// Export layout of the dataset.
    #[arg(short, long, value_enum)]
    platform: Option<PlatformArg>,

    /// Match the post text or the author.
    #[arg(short, long, value_enum)]
    target: Option<TargetArg>,

    /// Match this column directly, ignoring --target.
    #[arg(long)]
    column: Option<String>,

    /// Text column for custom exports.
    #[arg(long)]
    text_column: Option<String>,

    /// Author column for custom exports.
    #[arg(long)]
    user_column: Option<String>,

    /// Metadata columns coerced to integers (repeatable).
    #[arg(long = "metadata", value_name = "COLUMN")]
    metadata: Vec<String>,

    /// Keep only matched posts and their comments.
    #[arg(long, overrides_with = "no_post_only")]
    post_only: bool,

    /// Evaluate every row on its own, comments included.
    #[arg(long)]
    no_post_only: bool,

    /// YAML or JSON run configuration; flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rendering of the MatchTerm column.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Separator for --format delimited.
    #[arg(long, default_value = "; ")]
    separator: String,

    /// Evaluate rows on the current thread only.
    #[arg(long)]
    sequential: bool,

    /// Log filter, e.g. `info` or `termfilter=debug`.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    Twitter,
    Instagram,
    Custom,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Twitter => Platform::Twitter,
            PlatformArg::Instagram => Platform::Instagram,
            PlatformArg::Custom => Platform::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    Text,
    Username,
}

impl From<TargetArg> for FilterTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Text => FilterTarget::Text,
            TargetArg::Username => FilterTarget::Username,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// `["a","b, c"]`
    Json,
    /// Labels joined with --separator.
    Delimited,
}

#[derive(Debug, Error)]
enum InputError {
    #[error("{} is not a .{expected} file", path.display())]
    WrongExtension {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<()> {
    check_extension(&cli.vocabulary, "json")?;
    check_extension(&cli.dataset, "csv")?;

    let mut run_config = match &cli.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RunConfig::default(),
    };
    apply_flags(&mut run_config, &cli);
    let config = run_config.resolve()?;

    let vocab_text =
        fs::read_to_string(&cli.vocabulary).map_err(|err| not_found_or(err, &cli.vocabulary))?;
    let vocab_json: serde_json::Value = serde_json::from_str(&vocab_text)
        .with_context(|| format!("parsing vocabulary {}", cli.vocabulary.display()))?;
    let vocabulary =
        Vocabulary::from_json_value(&vocab_json, &config.normalize).map_err(FilterError::from)?;

    let dataset = csv_io::read_dataset(&cli.dataset)
        .with_context(|| format!("reading dataset {}", cli.dataset.display()))?;

    let output = termfilter::filter_dataset(dataset, vocabulary, &config)?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| csv_io::default_output_path(&cli.dataset));
    csv_io::write_output(&output_path, &output, &config.match_term_format)
        .with_context(|| format!("writing {}", output_path.display()))?;

    info!(
        path = %output_path.display(),
        rows = output.stats.emitted_rows,
        "output_saved"
    );
    Ok(())
}

fn apply_flags(run_config: &mut RunConfig, cli: &Cli) {
    if let Some(platform) = cli.platform {
        run_config.platform = platform.into();
    }
    if let Some(target) = cli.target {
        run_config.target = target.into();
    }
    if cli.column.is_some() {
        run_config.target_column = cli.column.clone();
    }
    if cli.text_column.is_some() {
        run_config.text_column = cli.text_column.clone();
    }
    if cli.user_column.is_some() {
        run_config.user_column = cli.user_column.clone();
    }
    if !cli.metadata.is_empty() {
        run_config.metadata_columns = Some(cli.metadata.clone());
    }
    if cli.post_only {
        run_config.post_only = Some(true);
    } else if cli.no_post_only {
        run_config.post_only = Some(false);
    }
    match cli.format {
        Some(FormatArg::Json) => run_config.match_term_format = MatchTermFormat::JsonList,
        Some(FormatArg::Delimited) => {
            run_config.match_term_format = MatchTermFormat::Delimited {
                separator: cli.separator.clone(),
            }
        }
        None => {}
    }
    if cli.sequential {
        run_config.parallel = false;
    }
}

fn check_extension(path: &Path, expected: &'static str) -> Result<(), InputError> {
    let matches = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected));
    if matches {
        Ok(())
    } else {
        Err(InputError::WrongExtension {
            path: path.to_path_buf(),
            expected,
        })
    }
}

fn not_found_or(err: std::io::Error, path: &Path) -> anyhow::Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        InputError::NotFound {
            path: path.to_path_buf(),
        }
        .into()
    } else {
        anyhow::Error::new(err).context(format!("reading {}", path.display()))
    }
}

/// Maps the first recognized cause to the documented exit code.
fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<InputError>() {
            return match e {
                InputError::WrongExtension { .. } => 1,
                InputError::NotFound { .. } => 3,
            };
        }
        if let Some(e) = cause.downcast_ref::<ConfigLoadError>() {
            return match e {
                ConfigLoadError::FileRead(io) if io.kind() == std::io::ErrorKind::NotFound => 3,
                ConfigLoadError::Invalid(inner) => filter_exit_code(inner),
                _ => 1,
            };
        }
        if let Some(e) = cause.downcast_ref::<FilterError>() {
            return filter_exit_code(e);
        }
        if let Some(e) = cause.downcast_ref::<CsvIoError>() {
            return match e {
                CsvIoError::NotFound { .. } => 3,
                _ => 1,
            };
        }
    }
    1
}

fn filter_exit_code(err: &FilterError) -> u8 {
    match err {
        FilterError::Processing { .. } => 4,
        _ => 2,
    }
}
