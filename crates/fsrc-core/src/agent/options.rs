use clap::{Args, Command};
use fsrc_model::{
    ArgumentSpec, DEFAULT_GIT_REF, DEFAULT_GIT_REPO, DEFAULT_PACKAGE_NAME, DEFAULT_PACKAGE_SOURCE,
    DEFAULT_SOURCE_PATH, DEFAULT_WORKDIR,
};

use crate::config::argument_spec;

/// Options of the build agent.
///
/// This declaration is the only description of what the agent accepts. The
/// host flattens it into its own command line and forwards values through the
/// [`ArgumentSpec`] derived from it, so the two never drift apart.
#[derive(Debug, Clone, Default, Args)]
pub struct AgentArgs {
    /// Path to the source checkout.
    #[arg(long, alias = "samba-source", value_name = "DIR", default_value = DEFAULT_SOURCE_PATH)]
    pub source_path: Option<String>,

    /// Path to packaging specific sources.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_PACKAGE_SOURCE)]
    pub package_source: Option<String>,

    /// Path to the working directory.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_WORKDIR)]
    pub workdir: Option<String>,

    /// Name of a sub-directory of the working directory to write results to.
    #[arg(short, long, value_name = "NAME")]
    pub job: Option<String>,

    /// Name of the package being built.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_PACKAGE_NAME)]
    pub package_name: Option<String>,

    /// Install build dependencies declared by a descriptor or source package.
    #[arg(long, value_name = "PATH")]
    pub install_deps_from: Option<String>,

    /// Git ref to check out.
    #[arg(long, value_name = "REF", default_value = DEFAULT_GIT_REF)]
    pub git_ref: Option<String>,

    /// Git repository to clone when no checkout exists.
    #[arg(long, value_name = "URL", default_value = DEFAULT_GIT_REPO)]
    pub git_repo: Option<String>,

    /// Check out the git ref even if a checkout already exists.
    #[arg(long)]
    pub force_ref: bool,

    /// Install the baseline toolchain before anything else.
    #[arg(long)]
    pub bootstrap: bool,

    /// Keep package manager state; never clean its cache.
    #[arg(long)]
    pub keep_dnf: bool,

    /// Stop after dependency installation.
    #[arg(long)]
    pub skip_build: bool,

    /// Enable building Ceph components.
    #[arg(long)]
    pub with_ceph: bool,
}

/// Bare clap command holding only the agent options.
pub fn agent_command() -> Command {
    AgentArgs::augment_args(Command::new("fsrc-agent"))
}

/// Forwarding contract of the agent.
pub fn agent_argument_spec() -> ArgumentSpec {
    argument_spec(&agent_command())
}

#[cfg(test)]
mod tests {
    use fsrc_model::OptionKind;

    use super::*;

    #[test]
    fn spec_lists_every_agent_option_in_order() {
        let spec = agent_argument_spec();
        let flags: Vec<&str> = spec.iter().map(|o| o.flag()).collect();
        assert_eq!(
            flags,
            [
                "--source-path",
                "--package-source",
                "--workdir",
                "--job",
                "--package-name",
                "--install-deps-from",
                "--git-ref",
                "--git-repo",
                "--force-ref",
                "--bootstrap",
                "--keep-dnf",
                "--skip-build",
                "--with-ceph",
            ]
        );
    }

    #[test]
    fn kinds_and_alternate_keys() {
        let spec = agent_argument_spec();
        assert!(spec.get("keep_dnf").unwrap().kind().is_toggle());
        assert!(spec.get("with_ceph").unwrap().kind().is_toggle());
        assert_eq!(
            spec.get("source_path").unwrap().kind(),
            &OptionKind::Value {
                alternate_key: Some("samba_source".into())
            }
        );
        assert_eq!(spec.get("job").unwrap().kind(), &OptionKind::value());
    }
}
