//! Package-manager commands: toolchain bootstrap and build dependencies.
use fsrc_exec::CommandSpec;

use super::{AgentSettings, OsRelease};

/// Baseline toolchain installed by `--bootstrap`.
pub const BOOTSTRAP_PACKAGES: [&str; 4] = [
    "git",
    "gcc",
    "/usr/bin/rpmbuild",
    "dnf-command(builddep)",
];

/// Repository release packages installed on CentOS before `builddep`.
pub const CENTOS_RELEASE_PACKAGES: [&str; 3] = [
    "epel-release",
    "centos-release-gluster",
    "centos-release-ceph",
];

/// Repositories enabled for `builddep` on CentOS.
pub const CENTOS_REPOS: [&str; 2] = ["crb", "resilientstorage"];

/// `dnf`, with the cache kept when package-manager state is persistent.
pub fn dnf(keep_cache: bool) -> CommandSpec {
    let cmd = CommandSpec::new("dnf");
    if keep_cache {
        cmd.arg("--setopt=keepcache=True")
    } else {
        cmd
    }
}

pub fn bootstrap_command(settings: &AgentSettings) -> CommandSpec {
    dnf(settings.keep_dnf)
        .args(["install", "-y"])
        .args(BOOTSTRAP_PACKAGES)
}

/// Commands installing the build dependencies declared by `source`.
///
/// In order:
/// 1. `dnf install` of the builddep plugin and, on CentOS, extra release
///    packages;
/// 2. `dnf builddep` with feature defines and, on CentOS, extra repositories;
/// 3. `dnf clean all`, unless package-manager state is kept.
pub fn dependency_commands(
    settings: &AgentSettings,
    source: &str,
    platform: &OsRelease,
) -> Vec<CommandSpec> {
    let centos = platform.is_centos();
    let mut commands = Vec::with_capacity(3);

    let mut install = dnf(settings.keep_dnf)
        .args(["install", "-y"])
        .arg("dnf-command(builddep)");
    if centos {
        install = install.args(CENTOS_RELEASE_PACKAGES);
    }
    commands.push(install);

    let mut builddep = dnf(settings.keep_dnf)
        .args(["builddep", "-y"])
        .args(settings.features.builddep_defines());
    if centos {
        builddep = builddep.args(CENTOS_REPOS.iter().map(|r| format!("--enablerepo={r}")));
    }
    commands.push(builddep.arg(source));

    if !settings.keep_dnf {
        commands.push(CommandSpec::new("dnf").args(["clean", "all"]));
    }
    commands
}
