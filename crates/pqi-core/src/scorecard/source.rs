use super::model::{MeasuredReport, Scorecard};
use crate::config::ReportConfig;
use crate::error::{PqiError, PqiResult, ReportRole};
use crate::extract::extract_metric;
use crate::loader::load_report;
use crate::score::{calculate_score, ScoreResult};
use std::path::Path;

/// Load both reports, extract the metric and score the PR.
///
/// Never fails: load and extraction errors end up in [`Scorecard::error`] so
/// the caller can always render a document.
pub fn build_scorecard(config: &ReportConfig) -> Scorecard {
    let mut card = Scorecard {
        metric_title: config.metric.title.clone(),
        percentile: config.metric.percentile.clone(),
        baseline: MeasuredReport {
            source: display_name(&config.baseline_report),
            value: None,
        },
        pull_request: MeasuredReport {
            source: display_name(&config.pr_report),
            value: None,
        },
        threshold: config.threshold,
        penalty_factor: config.penalty_factor,
        result: None,
        error: None,
    };

    match measure(config, &mut card) {
        Ok(result) => {
            tracing::debug!(
                score = result.score,
                regression = result.regression,
                "scored pull request"
            );
            card.result = Some(result);
        }
        Err(e) => {
            tracing::warn!(error = %e, "scorecard inputs unusable, rendering error banner");
            card.error = Some(e.to_string());
        }
    }
    card
}

fn measure(config: &ReportConfig, card: &mut Scorecard) -> PqiResult<ScoreResult> {
    let pr_doc = load_report(&config.pr_report)?;
    let baseline_doc = load_report(&config.baseline_report)?;

    let pr_value = extract_metric(&pr_doc, &config.metric).map_err(|source| PqiError::Extract {
        role: ReportRole::PullRequest,
        path: config.pr_report.clone(),
        source,
    })?;
    card.pull_request.value = Some(pr_value);

    let baseline_value =
        extract_metric(&baseline_doc, &config.metric).map_err(|source| PqiError::Extract {
            role: ReportRole::Baseline,
            path: config.baseline_report.clone(),
            source,
        })?;
    card.baseline.value = Some(baseline_value);

    Ok(calculate_score(pr_value, baseline_value, config.penalty_factor))
}

fn display_name(path: &Path) -> String {
    path.display().to_string()
}
