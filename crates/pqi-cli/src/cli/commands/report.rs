use crate::cli::args::{ReportArgs, ReportFormat};
use crate::exit_codes;
use anyhow::Context;
use pqi_core::config::PqiConfig;
use pqi_core::gate::write_score_file;
use pqi_core::scorecard::build_scorecard;

/// Report generator. Always exits 0 once the scorecard is written; scoring
/// failures are shown inside the document, not through the exit code.
pub fn run(args: ReportArgs, mut cfg: PqiConfig) -> anyhow::Result<i32> {
    args.apply(&mut cfg);
    cfg.validate()?;

    let out = args.output_path(&cfg);
    let card = build_scorecard(&cfg.report_config());

    let document = match args.format {
        ReportFormat::Html => card.to_html(),
        ReportFormat::Markdown => card.to_markdown(),
    };
    std::fs::write(&out, document)
        .with_context(|| format!("failed to write scorecard {}", out.display()))?;
    tracing::info!(path = %out.display(), verdict = ?card.verdict(), "wrote scorecard");

    if let Some(score_out) = &args.score_out {
        match card.score() {
            Some(score) => write_score_file(score_out, score)?,
            None => tracing::warn!(
                path = %score_out.display(),
                "scoring failed, score file not written"
            ),
        }
    }

    println!(
        "\n✅ Success: Load performance report saved as '{}'",
        out.display()
    );
    println!("{}", card.to_terminal());

    Ok(exit_codes::SUCCESS)
}
