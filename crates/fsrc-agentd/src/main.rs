use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use tracing::{error, info};

use fsrc_core::{
    LogArgs,
    agent::{AgentArgs, AgentOutcome, AgentPipeline, AgentSettings, agent_argument_spec},
    config::{CliValues, ConfigResolver},
    error::CoreError,
};
use fsrc_exec::SubprocessRunner;
use fsrc_observe::{init_local_offset, init_logger};

/// Build packages from a source checkout within an OCI container.
///
/// Packages are written to the workdir. If the workdir is not a volume of
/// the container, the build is lost when the container exits. Only
/// committed changes are built.
#[derive(Debug, Parser)]
#[command(name = "fsrc-agent", version)]
struct Cli {
    #[command(flatten)]
    agent: AgentArgs,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_local_offset();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if let Err(err) = setup_logging(&cli.log) {
        eprintln!("fsrc-agent: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&matches).await {
        Ok(AgentOutcome::Skipped) => ExitCode::SUCCESS,
        Ok(AgentOutcome::Built { source_package, .. }) => {
            info!(srpm = %source_package.display(), "packages built");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "build failed");
            err.exit_status()
        }
    }
}

fn setup_logging(log: &LogArgs) -> anyhow::Result<()> {
    init_logger(&log.to_logger_config("info")).context("failed to initialize logger")?;
    Ok(())
}

async fn run(matches: &ArgMatches) -> Result<AgentOutcome, CoreError> {
    let spec = agent_argument_spec();
    let resolved = ConfigResolver::new(&spec)
        .with_cli(CliValues::from_matches(&spec, matches))
        .with_summary_at_info()
        .resolve();
    let settings = AgentSettings::from_resolved(&resolved)?;

    let runner = SubprocessRunner::new();
    AgentPipeline::new(&runner, settings).run().await
}
