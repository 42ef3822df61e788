use clap::{Args, Command};
use fsrc_model::{ArgumentSpec, DEFAULT_BUILD_CONTEXT, DEFAULT_CONTAINERFILE};

use crate::{agent::AgentArgs, config::argument_spec};

/// Options of the host orchestrator.
///
/// The agent's options are flattened in first: every agent option may be
/// given to the host, which forwards it.
#[derive(Debug, Clone, Default, Args)]
pub struct HostArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Container engine to use (typically podman or docker).
    #[arg(long, value_name = "ENGINE")]
    pub container_engine: Option<String>,

    /// Path to the source checkout on the host.
    #[arg(short, long, value_name = "DIR")]
    pub source_dir: Option<String>,

    /// Path to a host directory where output will be saved.
    #[arg(short, long, value_name = "DIR")]
    pub artifacts_dir: Option<String>,

    /// Base image (example: quay.io/centos/centos:stream9).
    #[arg(long, value_name = "IMAGE")]
    pub base_image: Option<String>,

    /// What to build; repeatable. Defaults to everything.
    #[arg(short, long, alias = "tasks", value_name = "TASK", value_parser = ["image", "packages"])]
    pub task: Vec<String>,

    /// Path to a host directory caching package manager state.
    #[arg(long, value_name = "DIR")]
    pub dnf_cache: Option<String>,

    /// Start a shell in the build container instead of building packages.
    #[arg(long)]
    pub shell: bool,

    /// Print an example configuration file and exit.
    #[arg(long)]
    pub example_yaml: bool,

    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Build-image descriptor, relative to the repository checkout.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONTAINERFILE)]
    pub containerfile: Option<String>,

    /// Directory sent to the engine as the image build context.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_BUILD_CONTEXT)]
    pub build_context: Option<String>,
}

/// Bare clap command holding the host options.
pub fn host_command() -> Command {
    HostArgs::augment_args(Command::new("fsrc-build"))
}

/// Every option the host resolves, agent options included.
pub fn host_argument_spec() -> ArgumentSpec {
    argument_spec(&host_command())
}
