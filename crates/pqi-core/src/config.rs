//! Configuration for the report and gate flows.
//!
//! Settings come from three layers: built-in defaults, an optional YAML file
//! (`pqi.yaml`), and CLI flags / environment. The CLI applies its overrides on
//! top of a [`PqiConfig`] and then builds a [`ReportConfig`] or [`GateConfig`]
//! once per run.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "pqi.yaml";

pub const DEFAULT_METRIC_KEY: &str = "plugins.metrics-by-endpoint.response_time./api/login";
pub const DEFAULT_PERCENTILE_KEY: &str = "p90";
pub const DEFAULT_METRIC_TITLE: &str = "Login API (p90 Response Time)";

pub const DEFAULT_PR_REPORT: &str = "artillery_report.json";
pub const DEFAULT_BASELINE_REPORT: &str = "baseline_report.json";
pub const DEFAULT_HTML_OUTPUT: &str = "load_performance_simple_report.html";
pub const DEFAULT_SCORE_FILE: &str = "pqi_score.json";

pub const DEFAULT_REPORT_THRESHOLD: f64 = 95.0;
pub const DEFAULT_GATE_THRESHOLD: f64 = 110.0;
pub const DEFAULT_STATUS_CONTEXT: &str = "performance-check";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Which metric to read from each report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricConfig {
    /// Literal key under `aggregate.summaries`. May contain dots.
    pub key: String,
    /// Key inside the metric summary, e.g. `p90`.
    pub percentile: String,
    /// Human-readable label used in the scorecard.
    pub title: String,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_METRIC_KEY.to_string(),
            percentile: DEFAULT_PERCENTILE_KEY.to_string(),
            title: DEFAULT_METRIC_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub penalty_factor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty_factor: crate::score::DEFAULT_PENALTY_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    pub pr: PathBuf,
    pub baseline: PathBuf,
    pub out: PathBuf,
    pub threshold: f64,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            pr: PathBuf::from(DEFAULT_PR_REPORT),
            baseline: PathBuf::from(DEFAULT_BASELINE_REPORT),
            out: PathBuf::from(DEFAULT_HTML_OUTPUT),
            threshold: DEFAULT_REPORT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSection {
    pub score_file: PathBuf,
    pub threshold: f64,
    pub context: String,
    pub api_url: String,
}

impl Default for GateSection {
    fn default() -> Self {
        Self {
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
            threshold: DEFAULT_GATE_THRESHOLD,
            context: DEFAULT_STATUS_CONTEXT.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Contents of `pqi.yaml`. Every section is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PqiConfig {
    pub version: u32,
    pub metric: MetricConfig,
    pub scoring: ScoringConfig,
    pub report: ReportSection,
    pub gate: GateSection,
}

impl Default for PqiConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            metric: MetricConfig::default(),
            scoring: ScoringConfig::default(),
            report: ReportSection::default(),
            gate: GateSection::default(),
        }
    }
}

impl PqiConfig {
    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        if self.metric.key.is_empty() {
            return Err(invalid("metric.key", "must not be empty"));
        }
        if self.metric.percentile.is_empty() {
            return Err(invalid("metric.percentile", "must not be empty"));
        }
        let factor = self.scoring.penalty_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(invalid(
                "scoring.penalty_factor",
                format!("must be a finite number >= 0, got {factor}"),
            ));
        }
        if !self.report.threshold.is_finite() {
            return Err(invalid("report.threshold", "must be a finite number"));
        }
        if !self.gate.threshold.is_finite() {
            return Err(invalid("gate.threshold", "must be a finite number"));
        }
        Ok(())
    }

    /// Settings for one report-generation run.
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            pr_report: self.report.pr.clone(),
            baseline_report: self.report.baseline.clone(),
            metric: self.metric.clone(),
            penalty_factor: self.scoring.penalty_factor,
            threshold: self.report.threshold,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<PqiConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: PqiConfig = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// An explicit path must exist; otherwise `pqi.yaml` is used only if present.
pub fn resolve_config(explicit: Option<&Path>) -> Result<PqiConfig, ConfigError> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                tracing::debug!(path = %default_path.display(), "using default config file");
                load_config(default_path)
            } else {
                Ok(PqiConfig::default())
            }
        }
    }
}

/// Inputs of the report generator, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub pr_report: PathBuf,
    pub baseline_report: PathBuf,
    pub metric: MetricConfig,
    pub penalty_factor: f64,
    /// Score required for the scorecard to show "merge allowed".
    pub threshold: f64,
}

/// Where and how to publish the commit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTarget {
    pub api_url: String,
    pub repo: String,
    pub sha: String,
    pub token: String,
}

impl StatusTarget {
    /// Build a target from values that usually come from `TARGET_REPO`,
    /// `TARGET_SHA` and `GH_TOKEN`. Empty values count as missing.
    pub fn resolve(
        api_url: impl Into<String>,
        repo: Option<String>,
        sha: Option<String>,
        token: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: api_url.into(),
            repo: required(repo, "TARGET_REPO", "repo")?,
            sha: required(sha, "TARGET_SHA", "sha")?,
            token: required(token, "GH_TOKEN", "token")?,
        })
    }
}

fn required(
    value: Option<String>,
    name: &'static str,
    flag: &'static str,
) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingEnv { name, flag })
}

/// Inputs of the gate verifier, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub score_file: PathBuf,
    pub threshold: f64,
    pub context: String,
    /// `None` skips the status notification.
    pub status: Option<StatusTarget>,
}
