//! Packaging descriptor, source package and binary packages.
use std::{
    fs,
    path::{Path, PathBuf},
};

use fsrc_exec::CommandSpec;
use fsrc_model::VersionInfo;
use tracing::debug;
use walkdir::WalkDir;

use super::AgentSettings;
use crate::error::CoreError;

/// Suffix of source packages.
pub const SOURCE_PACKAGE_SUFFIX: &str = ".src.rpm";

/// Rendered packaging descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub text: String,
    /// Number of placeholder lines replaced.
    pub replaced: usize,
}

/// Marker identifying the placeholder line of a descriptor template.
pub fn placeholder(package: &str) -> String {
    format!("{package}_version 4.999")
}

/// Replace every placeholder line of `template` with
/// `%global <package>_version <version>`.
///
/// All other lines are copied unchanged, line endings included.
pub fn render_descriptor(template: &str, package: &str, version: &str) -> Descriptor {
    let marker = placeholder(package);
    let mut text = String::with_capacity(template.len() + version.len());
    let mut replaced = 0;

    for line in template.split_inclusive('\n') {
        if line.contains(&marker) {
            let ending = if line.ends_with("\r\n") {
                "\r\n"
            } else if line.ends_with('\n') {
                "\n"
            } else {
                ""
            };
            text.push_str(&format!("%global {package}_version {version}{ending}"));
            replaced += 1;
        } else {
            text.push_str(line);
        }
    }
    Descriptor { text, replaced }
}

/// Recursively copy `from` into `to`, merging with existing content.
///
/// Returns the number of files copied.
pub fn copy_tree(from: &Path, to: &Path) -> Result<usize, CoreError> {
    let mut copied = 0;
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry.map_err(|e| CoreError::io(from, e.into()))?;
        let rel = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| CoreError::io(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| CoreError::io(&target, e))?;
            copied += 1;
        }
    }
    debug!(from = %from.display(), to = %to.display(), copied, "copied packaging sources");
    Ok(copied)
}

/// `rpmbuild -bs` with every rpm directory pointed at `write_dir`.
pub fn source_package_command(
    settings: &AgentSettings,
    write_dir: &Path,
    version: &VersionInfo,
) -> CommandSpec {
    let wdir = write_dir.display();
    CommandSpec::new("rpmbuild")
        .args(["--define".to_string(), format!("_topdir {wdir}")])
        .args(["--define".to_string(), format!("_sourcedir {wdir}")])
        .args(["--define".to_string(), format!("_srcrpmdir {wdir}")])
        .args([
            "--define".to_string(),
            format!(
                "custom_{}_version {}",
                settings.package_name,
                version.package_version()
            ),
        ])
        .arg("-bs")
        .arg(
            write_dir
                .join(settings.descriptor_name())
                .to_string_lossy(),
        )
}

/// Find the source package named `<stem>*.src.rpm` under `dir`.
///
/// The walk is sorted by file name; with several matches the last one wins.
pub fn find_source_package(dir: &Path, stem: &str) -> Result<PathBuf, CoreError> {
    let mut found = None;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| CoreError::io(dir, e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(stem) && name.ends_with(SOURCE_PACKAGE_SUFFIX) {
            debug!(path = %entry.path().display(), "source package candidate");
            found = Some(entry.path().to_path_buf());
        }
    }
    found.ok_or_else(|| CoreError::SourcePackageNotFound {
        stem: stem.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// `rpmbuild --rebuild` of `srpm`, with the feature switches.
pub fn rebuild_command(settings: &AgentSettings, write_dir: &Path, srpm: &Path) -> CommandSpec {
    CommandSpec::new("rpmbuild")
        .args([
            "--define".to_string(),
            format!("_topdir {}", write_dir.display()),
        ])
        .arg("--rebuild")
        .args(settings.features.rpmbuild_switches())
        .arg(srpm.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::FeatureSet;

    const TEMPLATE: &str = "Name: samba\n%global samba_version 4.999\nVersion: %{samba_version}\n";

    fn version() -> VersionInfo {
        VersionInfo::new("2024-01-05 10:20:30 +0000", "abc1234").unwrap()
    }

    #[test]
    fn renders_only_the_placeholder_line() {
        let out = render_descriptor(TEMPLATE, "samba", "20240105.102030.abc1234");
        assert_eq!(out.replaced, 1);
        assert_eq!(
            out.text,
            "Name: samba\n\
             %global samba_version 20240105.102030.abc1234\n\
             Version: %{samba_version}\n"
        );
    }

    #[test]
    fn keeps_line_endings() {
        let out = render_descriptor("a\r\n%define samba_version 4.999\r\nb", "samba", "1.2");
        assert_eq!(out.text, "a\r\n%global samba_version 1.2\r\nb");

        let out = render_descriptor("%global samba_version 4.999", "samba", "1.2");
        assert_eq!(out.text, "%global samba_version 1.2");
    }

    #[test]
    fn template_without_placeholder_is_copied() {
        let out = render_descriptor("Name: sssd\n", "samba", "1.2");
        assert_eq!(out.replaced, 0);
        assert_eq!(out.text, "Name: sssd\n");
    }

    #[test]
    fn copy_tree_merges_into_existing_dir() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir(src.path().join("patches")).unwrap();
        fs::write(src.path().join("samba-master.spec"), TEMPLATE).unwrap();
        fs::write(src.path().join("patches/fix.patch"), "diff").unwrap();
        fs::write(dst.path().join("keep.txt"), "x").unwrap();

        assert_eq!(copy_tree(src.path(), dst.path()).unwrap(), 2);
        assert!(dst.path().join("samba-master.spec").is_file());
        assert!(dst.path().join("patches/fix.patch").is_file());
        assert!(dst.path().join("keep.txt").is_file());
    }

    #[test]
    fn source_package_command_points_all_dirs_at_write_dir() {
        let cmd = source_package_command(
            &AgentSettings::default(),
            Path::new("/srv/build/work/c9s"),
            &version(),
        );
        assert_eq!(
            cmd.argv(),
            [
                "rpmbuild",
                "--define",
                "_topdir /srv/build/work/c9s",
                "--define",
                "_sourcedir /srv/build/work/c9s",
                "--define",
                "_srcrpmdir /srv/build/work/c9s",
                "--define",
                "custom_samba_version 20240105.102030.abc1234",
                "-bs",
                "/srv/build/work/c9s/samba.spec",
            ]
        );
    }

    #[test]
    fn discovery_matches_stem_and_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let stem = version().package_stem("samba");
        fs::create_dir(dir.path().join("SRPMS")).unwrap();
        fs::write(dir.path().join(format!("{stem}.tar.gz")), "").unwrap();
        fs::write(
            dir.path().join(format!("SRPMS/{stem}-1.el9.src.rpm")),
            "",
        )
        .unwrap();

        let found = find_source_package(dir.path(), &stem).unwrap();
        assert_eq!(found, dir.path().join(format!("SRPMS/{stem}-1.el9.src.rpm")));
    }

    #[test]
    fn discovery_fails_on_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("samba-20240105.102030.abc1234-1.src.rpm"),
            "",
        )
        .unwrap();

        let err = find_source_package(dir.path(), "samba-20240105-102030.abc1234").unwrap_err();
        assert!(matches!(err, CoreError::SourcePackageNotFound { .. }));
    }

    #[test]
    fn rebuild_carries_feature_switches() {
        let settings = AgentSettings {
            features: FeatureSet { with_ceph: true },
            ..Default::default()
        };
        let cmd = rebuild_command(
            &settings,
            Path::new("/tmp"),
            Path::new("/tmp/samba-1-1.src.rpm"),
        );
        assert_eq!(
            cmd.argv(),
            [
                "rpmbuild",
                "--define",
                "_topdir /tmp",
                "--rebuild",
                "--with=vfs_cephfs",
                "--with=ceph_mutex",
                "/tmp/samba-1-1.src.rpm",
            ]
        );
    }
}
