use std::path::{Path, PathBuf};

use fsrc_model::{
    DEFAULT_GIT_REF, DEFAULT_GIT_REPO, DEFAULT_PACKAGE_NAME, DEFAULT_PACKAGE_SOURCE,
    DEFAULT_SOURCE_PATH, FALLBACK_WORKDIR,
};

use crate::config::{ConfigError, ResolvedConfig};

/// Optional build features.
///
/// Dependency installation and the binary build read the same set, so the
/// built packages always match the installed build dependencies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    pub with_ceph: bool,
}

impl FeatureSet {
    /// Macro definitions for `dnf builddep`.
    pub fn builddep_defines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.with_ceph {
            out.push("--define=with_vfs_cephfs 1".to_string());
        }
        out
    }

    /// Conditional-build switches for `rpmbuild --rebuild`.
    pub fn rpmbuild_switches(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.with_ceph {
            out.push("--with=vfs_cephfs".to_string());
            out.push("--with=ceph_mutex".to_string());
        }
        out
    }
}

/// Typed view of the agent's resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub source_path: PathBuf,
    pub package_source: PathBuf,
    pub workdir: Option<PathBuf>,
    pub job: Option<String>,
    pub package_name: String,
    pub install_deps_from: Option<String>,
    pub git_ref: String,
    pub git_repo: String,
    pub force_ref: bool,
    pub bootstrap: bool,
    pub keep_dnf: bool,
    pub skip_build: bool,
    pub features: FeatureSet,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            package_source: PathBuf::from(DEFAULT_PACKAGE_SOURCE),
            workdir: None,
            job: None,
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            install_deps_from: None,
            git_ref: DEFAULT_GIT_REF.to_string(),
            git_repo: DEFAULT_GIT_REPO.to_string(),
            force_ref: false,
            bootstrap: false,
            keep_dnf: false,
            skip_build: false,
            features: FeatureSet::default(),
        }
    }
}

impl AgentSettings {
    /// Build settings from a resolved configuration.
    ///
    /// Rules:
    /// - `package_name` and `job` must be single path components;
    /// - options missing from `cfg` keep their [`Default`] values.
    pub fn from_resolved(cfg: &ResolvedConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings = Self {
            source_path: cfg
                .text("source_path")
                .map(PathBuf::from)
                .unwrap_or(defaults.source_path),
            package_source: cfg
                .text("package_source")
                .map(PathBuf::from)
                .unwrap_or(defaults.package_source),
            workdir: cfg.text("workdir").map(PathBuf::from),
            job: cfg.text("job").map(str::to_string),
            package_name: cfg
                .text("package_name")
                .map(str::to_string)
                .unwrap_or(defaults.package_name),
            install_deps_from: cfg.text("install_deps_from").map(str::to_string),
            git_ref: cfg
                .text("git_ref")
                .map(str::to_string)
                .unwrap_or(defaults.git_ref),
            git_repo: cfg
                .text("git_repo")
                .map(str::to_string)
                .unwrap_or(defaults.git_repo),
            force_ref: cfg.toggle("force_ref"),
            bootstrap: cfg.toggle("bootstrap"),
            keep_dnf: cfg.toggle("keep_dnf"),
            skip_build: cfg.toggle("skip_build"),
            features: FeatureSet {
                with_ceph: cfg.toggle("with_ceph"),
            },
        };

        check_component("package_name", &settings.package_name)?;
        if let Some(job) = &settings.job {
            check_component("job", job)?;
        }
        Ok(settings)
    }

    /// Directory receiving every generated artifact.
    ///
    /// `workdir` (or `/tmp` when unset), plus `job` when set.
    pub fn write_dir(&self) -> PathBuf {
        let base = self
            .workdir
            .as_deref()
            .unwrap_or_else(|| Path::new(FALLBACK_WORKDIR));
        match &self.job {
            Some(job) => base.join(job),
            None => base.to_path_buf(),
        }
    }

    /// Packaging descriptor template shipped in the packaging sources.
    pub fn template_name(&self) -> String {
        format!("{}-master.spec", self.package_name)
    }

    /// Rendered packaging descriptor.
    pub fn descriptor_name(&self) -> String {
        format!("{}.spec", self.package_name)
    }
}

fn check_component(name: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name: name.to_string(),
        reason: format!("{reason}: {value:?}"),
    };
    if value.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.contains('/') || value == "." || value == ".." {
        return Err(invalid("must be a single path component"));
    }
    Ok(())
}
