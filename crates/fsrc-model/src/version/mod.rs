//! Version identifier derived from the latest source-control commit.
//!
//! The same string names the tarball, the archive prefix, the rendered
//! packaging descriptor and the source package. Every stage must build it
//! through [`VersionInfo`] so they agree byte for byte.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Turn an ISO-like commit date into a filename-safe version component.
///
/// `2024-01-05 10:20:30 +0000` becomes `20240105.102030`:
/// - `-` is removed;
/// - the trailing whitespace-separated token (the UTC offset) is dropped;
/// - `:` is removed;
/// - the remaining space becomes `.`.
///
/// The function is idempotent: a normalized string has no space, so no token
/// is dropped on a second pass.
pub fn normalize_commit_date(date: &str) -> String {
    let mut out = date.trim().replace('-', "");
    if let Some(idx) = out.rfind(' ') {
        out.truncate(idx);
    }
    out.retain(|c| c != ':');
    out.replace(' ', ".")
}

/// Version data of one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Commit date as reported by git (`--date=iso`).
    commit_date: String,
    /// [`normalize_commit_date`] of `commit_date`.
    normalized_date: String,
    /// Abbreviated commit hash.
    commit_hash: String,
}

impl VersionInfo {
    /// Build version info from raw git output.
    pub fn new(
        commit_date: impl Into<String>,
        commit_hash: impl Into<String>,
    ) -> ModelResult<Self> {
        let commit_date = commit_date.into().trim().to_string();
        let commit_hash = commit_hash.into().trim().to_string();

        if commit_date.is_empty() {
            return Err(ModelError::InvalidVersion("empty commit date".into()));
        }
        if commit_hash.is_empty() || !commit_hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ModelError::InvalidVersion(format!(
                "commit hash is not hex: {commit_hash:?}"
            )));
        }
        let normalized_date = normalize_commit_date(&commit_date);
        Ok(Self {
            commit_date,
            normalized_date,
            commit_hash,
        })
    }

    pub fn commit_date(&self) -> &str {
        &self.commit_date
    }

    pub fn normalized_date(&self) -> &str {
        &self.normalized_date
    }

    pub fn commit_hash(&self) -> &str {
        &self.commit_hash
    }

    /// Package version: `<normalized_date>.<commit_hash>`.
    pub fn package_version(&self) -> String {
        format!("{}.{}", self.normalized_date, self.commit_hash)
    }

    /// Version-stamped package name: `<package>-<version>`.
    ///
    /// Used as archive prefix, tarball stem and source-package search prefix.
    pub fn package_stem(&self, package: &str) -> String {
        format!("{package}-{}", self.package_version())
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VersionInfo(date={:?}, version={})",
            self.commit_date,
            self.package_version()
        )
    }
}
