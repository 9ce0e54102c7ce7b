//! Performance Quality Index (PQI) for load-test regressions.
//!
//! Compares a pull-request load test against a baseline run, turns the
//! latency regression into a 0–100 score, renders a scorecard and decides
//! whether a change may merge.
//!
//! # Quick Start
//!
//! ```no_run
//! use pqi_core::config::PqiConfig;
//! use pqi_core::scorecard::build_scorecard;
//!
//! let card = build_scorecard(&PqiConfig::default().report_config());
//! std::fs::write("load_performance_simple_report.html", card.to_html())?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Pipeline
//!
//! | Step | Module |
//! |------|--------|
//! | Load report JSON | [`loader`] |
//! | Pull `aggregate.summaries[<metric>][<percentile>]` | [`extract`] |
//! | Score the regression | [`score`] |
//! | Render HTML / Markdown / terminal | [`scorecard`] |
//! | Gate on a threshold | [`gate`] |
//! | Publish commit status | [`status`] |

pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod loader;
pub mod score;
pub mod scorecard;
pub mod status;

pub use config::{GateConfig, MetricConfig, PqiConfig, ReportConfig, StatusTarget};
pub use error::{
    ConfigError, ExtractError, LoadError, PathSegment, PqiError, PqiResult, ReportRole,
    ScoreFileError, StatusError,
};
pub use extract::extract_metric;
pub use gate::{
    read_score_file, write_score_file, GateDecision, ScoreFile, StatusNotification, StatusState,
};
pub use loader::load_report;
pub use score::{calculate_score, ScoreResult, ScoreStatus};
pub use scorecard::{build_scorecard, MergeVerdict, Scorecard};
pub use status::{StatusClient, StatusResponse};
