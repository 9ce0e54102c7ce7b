//! Error types for scoring, gating and status reporting.

use std::fmt;
use std::path::PathBuf;

/// Failure to load a load-test report from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The report file does not exist.
    #[error(
        "Required file '{}' not found. Please ensure both PR and Baseline files are present.",
        .path.display()
    )]
    FileNotFound { path: PathBuf },

    /// The report exists but is not valid JSON.
    #[error("Failed to parse JSON content from '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Any other read failure (permissions, path is a directory, ...).
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Named steps of the `aggregate.summaries.<metric>.<percentile>` lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Aggregate,
    Summaries,
    Metric,
    Percentile,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aggregate => "aggregate",
            Self::Summaries => "summaries",
            Self::Metric => "metric",
            Self::Percentile => "percentile",
        };
        f.write_str(name)
    }
}

/// Failure to pull the metric value out of a parsed report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    /// The first lookup step whose key was absent.
    #[error("{}", missing_field_message(.segment, .key))]
    MissingField { segment: PathSegment, key: String },

    /// The value was found but is not a number.
    #[error("The extracted {percentile} value is not a valid number (found {found}).")]
    InvalidValue { percentile: String, found: String },
}

fn missing_field_message(segment: &PathSegment, key: &str) -> String {
    match segment {
        PathSegment::Aggregate => {
            format!("The top-level '{key}' key is missing in the report.")
        }
        PathSegment::Summaries => {
            format!("The '{key}' key is missing under 'aggregate' in the report.")
        }
        PathSegment::Metric => format!("The metric key '{key}' is missing under 'summaries'."),
        PathSegment::Percentile => {
            format!("The percentile key '{key}' is missing in the metric summary.")
        }
    }
}

impl ExtractError {
    /// Lookup step that failed, if this is a missing-field error.
    pub fn missing_segment(&self) -> Option<PathSegment> {
        match self {
            Self::MissingField { segment, .. } => Some(*segment),
            Self::InvalidValue { .. } => None,
        }
    }
}

/// Failure reading or writing the `{"score": n}` hand-off file.
#[derive(Debug, thiserror::Error)]
pub enum ScoreFileError {
    #[error("failed to read score file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("score file '{}' is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("score file '{}' has no 'score' field", .path.display())]
    MissingScore { path: PathBuf },

    #[error("score file '{}' has a non-numeric score: {found}", .path.display())]
    InvalidScore { path: PathBuf, found: String },

    #[error("failed to encode score for '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write score file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration errors (file, flags or environment).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("missing required setting {name} (set the environment variable or pass --{flag})")]
    MissingEnv {
        name: &'static str,
        flag: &'static str,
    },
}

/// Status API errors.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// HTTP client could not be constructed.
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// Transport-level failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// Non-2xx response from the status API.
    #[error("status API rejected the request: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for StatusError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Which of the two input reports an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRole {
    PullRequest,
    Baseline,
}

impl fmt::Display for ReportRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullRequest => f.write_str("PR"),
            Self::Baseline => f.write_str("Baseline"),
        }
    }
}

/// Top-level error for the scoring pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PqiError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("{role} report '{}': {source}", .path.display())]
    Extract {
        role: ReportRole,
        path: PathBuf,
        source: ExtractError,
    },

    #[error(transparent)]
    ScoreFile(#[from] ScoreFileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

/// Result type for pipeline operations.
pub type PqiResult<T> = Result<T, PqiError>;
