use super::args::*;

pub(crate) mod report;
pub(crate) mod verify;

use crate::exit_codes::SUCCESS;
use pqi_core::config::resolve_config;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    if let Command::Version = cli.cmd {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let config = resolve_config(cli.config.as_deref())?;

    match cli.cmd {
        Command::Report(args) => report::run(args, config),
        Command::Verify(args) => verify::run(args, config).await,
        Command::Version => Ok(SUCCESS),
    }
}
