use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pqi_core::config::PqiConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pqi",
    version,
    about = "Performance Quality Index: score load-test regressions and gate merges on them"
)]
pub struct Cli {
    /// Config file (default: ./pqi.yaml when present)
    #[arg(long, global = true, env = "PQI_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace). PQI_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score the PR load test against the baseline and write the scorecard
    Report(ReportArgs),
    /// Check a computed score against the gate threshold and publish a commit status
    Verify(VerifyArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ReportFormat {
    #[default]
    Html,
    Markdown,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Pull-request load-test report [default: artillery_report.json]
    #[arg(long, env = "PQI_PR_REPORT")]
    pub pr: Option<PathBuf>,

    /// Baseline load-test report [default: baseline_report.json]
    #[arg(long, env = "PQI_BASELINE_REPORT")]
    pub baseline: Option<PathBuf>,

    /// Scorecard output path [default: load_performance_simple_report.html]
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
    pub format: ReportFormat,

    /// Also write {"score": n} here for `pqi verify` (skipped when scoring fails)
    #[arg(long)]
    pub score_out: Option<PathBuf>,

    /// Literal key under aggregate.summaries (dots are part of the key)
    #[arg(long, env = "PQI_METRIC_KEY")]
    pub metric_key: Option<String>,

    /// Percentile key inside the metric summary, e.g. p90
    #[arg(long, env = "PQI_PERCENTILE_KEY")]
    pub percentile: Option<String>,

    /// Label for the metric in the scorecard
    #[arg(long)]
    pub metric_title: Option<String>,

    /// Score points deducted per millisecond of regression [default: 0.5]
    #[arg(long, env = "PQI_PENALTY_FACTOR")]
    pub penalty_factor: Option<f64>,

    /// Score required for "merge allowed" on the scorecard [default: 95]
    #[arg(long, env = "PQI_REPORT_THRESHOLD")]
    pub threshold: Option<f64>,
}

impl ReportArgs {
    /// Flags and env take precedence over the config file.
    pub fn apply(&self, cfg: &mut PqiConfig) {
        if let Some(pr) = &self.pr {
            cfg.report.pr = pr.clone();
        }
        if let Some(baseline) = &self.baseline {
            cfg.report.baseline = baseline.clone();
        }
        if let Some(key) = &self.metric_key {
            cfg.metric.key = key.clone();
        }
        if let Some(percentile) = &self.percentile {
            cfg.metric.percentile = percentile.clone();
        }
        if let Some(title) = &self.metric_title {
            cfg.metric.title = title.clone();
        }
        if let Some(factor) = self.penalty_factor {
            cfg.scoring.penalty_factor = factor;
        }
        if let Some(threshold) = self.threshold {
            cfg.report.threshold = threshold;
        }
    }

    /// Explicit `--out` wins; markdown swaps the configured extension.
    pub fn output_path(&self, cfg: &PqiConfig) -> PathBuf {
        match (&self.out, self.format) {
            (Some(out), _) => out.clone(),
            (None, ReportFormat::Html) => cfg.report.out.clone(),
            (None, ReportFormat::Markdown) => cfg.report.out.with_extension("md"),
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    /// Score file produced by the scoring step [default: pqi_score.json]
    #[arg(long)]
    pub score_file: Option<PathBuf>,

    /// Minimum score for the gate to pass [default: 110]
    #[arg(long, env = "PQI_GATE_THRESHOLD")]
    pub threshold: Option<f64>,

    /// Status context label [default: performance-check]
    #[arg(long)]
    pub context: Option<String>,

    /// Commit to attach the status to
    #[arg(long, env = "TARGET_SHA")]
    pub sha: Option<String>,

    /// Repository as owner/name
    #[arg(long, env = "TARGET_REPO")]
    pub repo: Option<String>,

    /// Status API token
    #[arg(long, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Status API base URL [default: https://api.github.com]
    #[arg(long, env = "PQI_GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Only print the verdict and set the exit code; do not publish a status
    #[arg(long)]
    pub no_notify: bool,
}

impl VerifyArgs {
    pub fn apply(&self, cfg: &mut PqiConfig) {
        if let Some(path) = &self.score_file {
            cfg.gate.score_file = path.clone();
        }
        if let Some(threshold) = self.threshold {
            cfg.gate.threshold = threshold;
        }
        if let Some(context) = &self.context {
            cfg.gate.context = context.clone();
        }
        if let Some(api_url) = &self.api_url {
            cfg.gate.api_url = api_url.clone();
        }
    }
}
