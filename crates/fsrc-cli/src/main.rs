use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use tracing::{error, info};

use fsrc_core::{
    EngineSelector, LogArgs,
    agent::agent_argument_spec,
    config::{CliValues, ConfigFile, ConfigResolver},
    error::CoreError,
    forward_arguments,
    host::{EXAMPLE_CONFIG, HostArgs, HostPipeline, HostSettings, host_argument_spec},
};
use fsrc_exec::SubprocessRunner;
use fsrc_observe::{init_local_offset, init_logger};

/// Build packages using a container.
///
/// Builds a build-image, then runs `fsrc-agent` inside it. Options may be
/// given on the command line or in a YAML configuration file (`--config`);
/// see `--example-yaml`.
#[derive(Debug, Parser)]
#[command(name = "fsrc-build", version)]
struct Cli {
    #[command(flatten)]
    host: HostArgs,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_local_offset();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.host.example_yaml {
        print!("{EXAMPLE_CONFIG}");
        return ExitCode::SUCCESS;
    }

    if let Err(err) = setup_logging(&cli.log) {
        eprintln!("fsrc-build: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli, &matches).await {
        Ok(()) => {
            info!("build finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "build failed");
            err.exit_status()
        }
    }
}

fn setup_logging(log: &LogArgs) -> anyhow::Result<()> {
    init_logger(&log.to_logger_config("debug")).context("failed to initialize logger")?;
    Ok(())
}

async fn run(cli: &Cli, matches: &ArgMatches) -> Result<(), CoreError> {
    let spec = host_argument_spec();
    let file = cli
        .host
        .config
        .as_deref()
        .map(ConfigFile::load)
        .transpose()?;
    let resolved = ConfigResolver::new(&spec)
        .with_cli(CliValues::from_matches(&spec, matches))
        .with_file(file)
        .resolve();

    let settings = HostSettings::from_resolved(&resolved)?;
    let agent_args = forward_arguments(&agent_argument_spec(), &resolved);

    let runner = SubprocessRunner::new();
    let engine = EngineSelector::new(&runner)
        .select(settings.container_engine.as_deref())
        .await?;

    HostPipeline::new(&runner, engine, settings)
        .with_agent_args(agent_args)
        .run()
        .await
}
