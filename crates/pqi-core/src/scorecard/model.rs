use crate::score::ScoreResult;

/// Banner shown at the top of the scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeVerdict {
    Allowed,
    Blocked,
    /// Inputs could not be scored.
    Error,
}

impl MergeVerdict {
    pub fn banner(self) -> &'static str {
        match self {
            Self::Allowed => "MERGE ALLOWED",
            Self::Blocked => "MERGE BLOCKED",
            Self::Error => "ERROR",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Allowed => "✅",
            Self::Blocked => "🛑",
            Self::Error => "🚨",
        }
    }
}

/// One measured input report.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredReport {
    /// File name shown in the "Source" column.
    pub source: String,
    /// `None` when the report could not be loaded or had no usable metric.
    pub value: Option<f64>,
}

/// Everything the scorecard renderers need. Built by
/// [`build_scorecard`](super::build_scorecard).
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    pub metric_title: String,
    pub percentile: String,
    pub baseline: MeasuredReport,
    pub pull_request: MeasuredReport,
    pub threshold: f64,
    pub penalty_factor: f64,

    /// Present only when both values were extracted.
    pub result: Option<ScoreResult>,

    /// First upstream failure, rendered as an error banner.
    pub error: Option<String>,
}

impl Scorecard {
    pub fn verdict(&self) -> MergeVerdict {
        match (&self.error, &self.result) {
            (None, Some(r)) if r.score >= self.threshold => MergeVerdict::Allowed,
            (None, Some(_)) => MergeVerdict::Blocked,
            _ => MergeVerdict::Error,
        }
    }

    /// Final score, or `None` when the run errored.
    pub fn score(&self) -> Option<f64> {
        if self.error.is_some() {
            return None;
        }
        self.result.map(|r| r.score)
    }
}
