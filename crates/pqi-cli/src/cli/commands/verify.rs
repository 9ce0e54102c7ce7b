use crate::cli::args::VerifyArgs;
use crate::exit_codes;
use anyhow::Context;
use pqi_core::config::{GateConfig, PqiConfig, StatusTarget};
use pqi_core::gate::{read_score_file, GateDecision};
use pqi_core::status::StatusClient;

/// Gate verifier. Exit 0 on pass, 1 on fail. Unreadable score files, missing
/// settings and failed status posts are returned as errors (fatal).
pub async fn run(args: VerifyArgs, mut cfg: PqiConfig) -> anyhow::Result<i32> {
    args.apply(&mut cfg);
    cfg.validate()?;

    let status = if args.no_notify {
        None
    } else {
        Some(StatusTarget::resolve(
            cfg.gate.api_url.clone(),
            args.repo.clone(),
            args.sha.clone(),
            args.token.clone(),
        )?)
    };
    let gate = GateConfig {
        score_file: cfg.gate.score_file.clone(),
        threshold: cfg.gate.threshold,
        context: cfg.gate.context.clone(),
        status,
    };

    let score = read_score_file(&gate.score_file)?.score;
    let decision = GateDecision::evaluate(score, gate.threshold);
    println!("{}", decision.message());

    match &gate.status {
        Some(target) => {
            let client = StatusClient::for_target(target)?;
            let response = client
                .post_status(
                    &target.repo,
                    &target.sha,
                    &decision.notification(&gate.context),
                )
                .await
                .with_context(|| {
                    format!(
                        "failed to publish commit status for {}@{}",
                        target.repo, target.sha
                    )
                })?;
            println!("GitHub Status Response: {}", response.body);
        }
        None => tracing::info!("status notification disabled (--no-notify)"),
    }

    Ok(if decision.passed {
        exit_codes::SUCCESS
    } else {
        exit_codes::GATE_FAILED
    })
}
