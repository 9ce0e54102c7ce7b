use super::model::{MergeVerdict, Scorecard};
use crate::score::BASE_SCORE;

const NOT_AVAILABLE: &str = "N/A";

impl Scorecard {
    /// Short summary printed after the report is written.
    pub fn to_terminal(&self) -> String {
        let verdict = self.verdict();
        let mut lines = Vec::new();

        match (&self.error, self.score()) {
            (Some(error), _) => lines.push(format!("   ❌ Execution Failed: {}", error)),
            (None, Some(score)) => lines.push(format!("   Final PQI Score: {:.2}", score)),
            (None, None) => lines.push(format!("   Final PQI Score: {}", NOT_AVAILABLE)),
        }
        lines.push(format!(
            "   Merge Status: {} {} (threshold {})",
            verdict.banner(),
            verdict.icon(),
            self.threshold
        ));

        lines.join("\n")
    }

    /// Format as markdown (CI job summaries, PR comments).
    pub fn to_markdown(&self) -> String {
        let verdict = self.verdict();
        let mut md = String::new();

        md.push_str(&format!(
            "## Load Test Performance Gate: {} {}\n\n",
            verdict.banner(),
            verdict.icon()
        ));
        md.push_str(&format!(
            "**Performance Quality Index (PQI):** {}  \n",
            fmt2(self.score())
        ));
        md.push_str(&format!("**Required Threshold:** {}\n\n", self.threshold));

        md.push_str("### Scoring Breakdown\n\n");
        md.push_str(&format!(
            "| Metric | {} Value (ms) | Source |\n",
            escape_cell(&self.percentile)
        ));
        md.push_str("|--------|---------------|--------|\n");
        md.push_str(&format!(
            "| {} (Baseline) | {} | `{}` |\n",
            escape_cell(&self.metric_title),
            fmt2(self.baseline.value),
            escape_cell(&self.baseline.source)
        ));
        md.push_str(&format!(
            "| {} (Pull Request) | {} | `{}` |\n",
            escape_cell(&self.metric_title),
            fmt2(self.pull_request.value),
            escape_cell(&self.pull_request.source)
        ));
        md.push_str(&format!(
            "| **Regression (Δ)** | {} | |\n\n",
            self.regression_ms()
        ));

        md.push_str("### Score Calculation\n\n");
        md.push_str("| Step | Detail | Result |\n");
        md.push_str("|------|--------|--------|\n");
        for step in self.calculation_steps() {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                step.label,
                escape_cell(&step.detail),
                escape_cell(&step.result)
            ));
        }

        if let Some(error) = &self.error {
            md.push_str(&format!("\n> **Error:** {}\n", error));
        }

        md
    }

    /// Format as a standalone HTML document.
    pub fn to_html(&self) -> String {
        let verdict = self.verdict();
        let score_class = match verdict {
            MergeVerdict::Allowed => "good",
            MergeVerdict::Blocked | MergeVerdict::Error => "poor",
        };
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("<title>Simple Load Performance Scorecard</title>\n");
        html.push_str("<style>\n");
        html.push_str("body { font-family: system-ui, sans-serif; margin: 20px; background: #f4f7f6; color: #333; }\n");
        html.push_str(".container { max-width: 800px; margin: 0 auto; background: #fff; padding: 30px; border-radius: 8px; }\n");
        html.push_str(".score-card { text-align: center; margin: 30px 0; }\n");
        html.push_str(".final-score { font-size: 4.5em; font-weight: bold; line-height: 1; }\n");
        html.push_str(".good { color: #28a745; }\n");
        html.push_str(".poor { color: #dc3545; }\n");
        html.push_str(".status-box { padding: 10px; border-radius: 5px; font-weight: bold; text-align: center; background: #f8d7da; color: #721c24; }\n");
        html.push_str("table { width: 100%; border-collapse: collapse; margin-top: 20px; }\n");
        html.push_str("th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }\n");
        html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
        html.push_str("<h1>Simple Load Test Performance Gate Check</h1>\n");

        html.push_str("<div class=\"score-card\">\n");
        html.push_str(&format!(
            "  <h2 class=\"{}\" id=\"verdict\">{} {}</h2>\n",
            score_class,
            verdict.banner(),
            verdict.icon()
        ));
        html.push_str("  <p>Performance Quality Index (PQI)</p>\n");
        html.push_str(&format!(
            "  <div class=\"final-score {}\" id=\"score\">{}</div>\n",
            score_class,
            fmt2(self.score())
        ));
        html.push_str(&format!(
            "  <p>Required Threshold: {}</p>\n",
            self.threshold
        ));
        html.push_str("</div>\n");

        html.push_str("<h2>Scoring Breakdown</h2>\n<table>\n");
        html.push_str(&format!(
            "<thead><tr><th>Metric</th><th>{} Value (ms)</th><th>Source</th></tr></thead>\n<tbody>\n",
            escape(&self.percentile)
        ));
        html.push_str(&format!(
            "<tr><td>{} (Baseline)</td><td>{}</td><td>{}</td></tr>\n",
            escape(&self.metric_title),
            fmt2(self.baseline.value),
            escape(&self.baseline.source)
        ));
        html.push_str(&format!(
            "<tr><td>{} (Pull Request)</td><td>{}</td><td>{}</td></tr>\n",
            escape(&self.metric_title),
            fmt2(self.pull_request.value),
            escape(&self.pull_request.source)
        ));
        html.push_str(&format!(
            "<tr><th>Regression (&Delta;)</th><th colspan=\"2\">{}</th></tr>\n",
            escape(&self.regression_ms())
        ));
        html.push_str("</tbody>\n</table>\n");

        html.push_str("<h2>Score Calculation</h2>\n<table>\n");
        html.push_str(
            "<thead><tr><th>Step</th><th>Detail</th><th>Result</th></tr></thead>\n<tbody>\n",
        );
        for step in self.calculation_steps() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(step.label),
                escape(&step.detail),
                escape(&step.result)
            ));
        }
        html.push_str("</tbody>\n</table>\n");

        if let Some(error) = &self.error {
            html.push_str(&format!(
                "<p class=\"status-box\" id=\"error\">Error: {}</p>\n",
                escape(error)
            ));
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    fn regression_ms(&self) -> String {
        match self.result {
            Some(r) if self.error.is_none() => format!("{:.2} ms", r.regression),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Base 100 → regression → penalty → final score.
    fn calculation_steps(&self) -> Vec<CalculationStep> {
        let result = self.result.filter(|_| self.error.is_none());
        let penalty = result.map(|r| r.penalty);
        let penalty_factor = result.map_or(self.penalty_factor, |r| r.penalty_factor);

        vec![
            CalculationStep {
                label: "Base Score",
                detail: format!("Start at {}", BASE_SCORE),
                result: format!("{}", BASE_SCORE),
            },
            CalculationStep {
                label: "Regression",
                detail: format!(
                    "{} ms → {} ms",
                    fmt2(self.baseline.value),
                    fmt2(self.pull_request.value)
                ),
                result: self.regression_ms(),
            },
            CalculationStep {
                label: "Penalty Calculation",
                detail: format!("Regression ms × {}", penalty_factor),
                result: match penalty {
                    Some(p) => format!("-{:.2} Points", p),
                    None => NOT_AVAILABLE.to_string(),
                },
            },
            CalculationStep {
                label: "Final Score",
                detail: format!("{} - {}", BASE_SCORE, fmt2(penalty)),
                result: fmt2(self.score()),
            },
        ]
    }
}

struct CalculationStep {
    label: &'static str,
    detail: String,
    result: String,
}

fn fmt2(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Markdown table cells end at an unescaped `|`.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
