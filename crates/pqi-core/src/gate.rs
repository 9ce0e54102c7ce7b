//! Merge gate: compare a computed score against a threshold.

use crate::error::ScoreFileError;
use crate::extract::coerce_f64;
use serde::Serialize;
use std::path::Path;

/// Result of comparing a score to the gate threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateDecision {
    pub passed: bool,
    pub threshold: f64,
    pub observed_score: f64,
}

impl GateDecision {
    pub fn evaluate(observed_score: f64, threshold: f64) -> Self {
        Self {
            passed: observed_score >= threshold,
            threshold,
            observed_score,
        }
    }

    /// Human-readable line for stdout.
    pub fn message(&self) -> String {
        if self.passed {
            format!(
                "✅ Performance Passed: {} >= {}",
                self.observed_score, self.threshold
            )
        } else {
            format!(
                "❌ Performance Failed: {} < {}",
                self.observed_score, self.threshold
            )
        }
    }

    /// Commit status to publish for this decision.
    pub fn notification(&self, context: impl Into<String>) -> StatusNotification {
        let (state, description) = if self.passed {
            (
                StatusState::Success,
                format!("Performance score OK ({})", self.observed_score),
            )
        } else {
            (
                StatusState::Failure,
                format!("Performance score too low ({})", self.observed_score),
            )
        };
        StatusNotification {
            state,
            context: context.into(),
            description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Success,
    Failure,
}

/// Body of `POST /repos/{repo}/statuses/{sha}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusNotification {
    pub state: StatusState,
    pub context: String,
    pub description: String,
}

/// The `{"score": n}` file handed from scoring to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreFile {
    pub score: f64,
}

/// Read a score file. Extra fields are ignored; numeric strings are accepted.
pub fn read_score_file(path: &Path) -> Result<ScoreFile, ScoreFileError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ScoreFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| ScoreFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let value = doc
        .get("score")
        .ok_or_else(|| ScoreFileError::MissingScore {
            path: path.to_path_buf(),
        })?;
    let score = coerce_f64(value).ok_or_else(|| ScoreFileError::InvalidScore {
        path: path.to_path_buf(),
        found: value.to_string(),
    })?;

    Ok(ScoreFile { score })
}

/// Write `{"score": n}`. The score is stored unrounded so the gate compares
/// the same value the scorecard did.
pub fn write_score_file(path: &Path, score: f64) -> Result<(), ScoreFileError> {
    let file = ScoreFile { score };
    let body = serde_json::to_string_pretty(&file).map_err(|source| ScoreFileError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, body).map_err(|source| ScoreFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), score, "wrote score file");
    Ok(())
}
