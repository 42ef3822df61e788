//! Source checkout and source archive.
use std::path::Path;

use fsrc_exec::CommandSpec;
use fsrc_model::VersionInfo;

use super::AgentSettings;

/// A usable checkout is a directory holding a `.git` directory.
pub fn has_checkout(path: &Path) -> bool {
    path.is_dir() && path.join(".git").is_dir()
}

/// Commands bringing the checkout to the requested ref.
///
/// An existing checkout is reused, and only switched to `git_ref` when
/// `force_ref` is set. Otherwise `git_repo` is cloned and `git_ref` checked
/// out.
pub fn acquisition_commands(settings: &AgentSettings, existing: bool) -> Vec<CommandSpec> {
    let checkout = CommandSpec::new("git")
        .args(["checkout", settings.git_ref.as_str()])
        .current_dir(&settings.source_path);

    if existing {
        return if settings.force_ref {
            vec![checkout]
        } else {
            Vec::new()
        };
    }
    vec![
        CommandSpec::new("git")
            .arg("clone")
            .arg(settings.git_repo.as_str())
            .arg(settings.source_path.to_string_lossy()),
        checkout,
    ]
}

/// `git archive` of `HEAD` into `<write_dir>/<stem>.tar.gz`, rooted at `<stem>/`.
pub fn archive_command(
    settings: &AgentSettings,
    version: &VersionInfo,
    dest: &Path,
) -> CommandSpec {
    let stem = version.package_stem(&settings.package_name);
    CommandSpec::new("git")
        .arg("archive")
        .arg(format!("--prefix={stem}/"))
        .arg(format!("--output={}", dest.display()))
        .arg("HEAD")
        .current_dir(&settings.source_path)
}

/// Tarball name for `version`.
pub fn archive_name(settings: &AgentSettings, version: &VersionInfo) -> String {
    format!("{}.tar.gz", version.package_stem(&settings.package_name))
}
