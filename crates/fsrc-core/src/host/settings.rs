use std::path::PathBuf;

use fsrc_model::{
    DEFAULT_BUILD_CONTEXT, DEFAULT_CONTAINERFILE, DEFAULT_PACKAGE_NAME, DEFAULT_SOURCE_PATH,
    DEFAULT_WORKDIR, TaskSet,
};

use crate::config::{ConfigError, ResolvedConfig};

/// Typed view of the host's resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSettings {
    pub container_engine: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub artifacts_dir: Option<PathBuf>,
    pub base_image: Option<String>,
    pub tasks: TaskSet,
    pub dnf_cache: Option<PathBuf>,
    pub shell: bool,
    pub containerfile: PathBuf,
    pub build_context: PathBuf,
    pub job: Option<String>,
    pub package_name: String,
    /// Agent-side mount point of `source_dir`.
    pub source_path: String,
    /// Agent-side mount point of `artifacts_dir`.
    pub workdir: String,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            container_engine: None,
            source_dir: None,
            artifacts_dir: None,
            base_image: None,
            tasks: TaskSet::all(),
            dnf_cache: None,
            shell: false,
            containerfile: PathBuf::from(DEFAULT_CONTAINERFILE),
            build_context: PathBuf::from(DEFAULT_BUILD_CONTEXT),
            job: None,
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            source_path: DEFAULT_SOURCE_PATH.to_string(),
            workdir: DEFAULT_WORKDIR.to_string(),
        }
    }
}

impl HostSettings {
    pub fn from_resolved(cfg: &ResolvedConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let tasks = TaskSet::from_names(cfg.list("task")).map_err(|e| ConfigError::Invalid {
            name: "task".into(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            container_engine: cfg.text("container_engine").map(str::to_string),
            source_dir: cfg.text("source_dir").map(PathBuf::from),
            artifacts_dir: cfg.text("artifacts_dir").map(PathBuf::from),
            base_image: cfg.text("base_image").map(str::to_string),
            tasks,
            dnf_cache: cfg.text("dnf_cache").map(PathBuf::from),
            shell: cfg.toggle("shell"),
            containerfile: cfg
                .text("containerfile")
                .map(PathBuf::from)
                .unwrap_or(defaults.containerfile),
            build_context: cfg
                .text("build_context")
                .map(PathBuf::from)
                .unwrap_or(defaults.build_context),
            job: cfg.text("job").map(str::to_string),
            package_name: cfg
                .text("package_name")
                .map(str::to_string)
                .unwrap_or(defaults.package_name),
            source_path: cfg
                .text("source_path")
                .map(str::to_string)
                .unwrap_or(defaults.source_path),
            workdir: cfg
                .text("workdir")
                .map(str::to_string)
                .unwrap_or(defaults.workdir),
        })
    }

    /// `dev`, or `dev-<job>` when a job is configured.
    ///
    /// The image build and the agent run must agree on this tag.
    pub fn image_tag(&self) -> String {
        match &self.job {
            Some(job) => format!("dev-{job}"),
            None => "dev".to_string(),
        }
    }

    /// Full image reference: `<package>-from-source:<tag>`.
    pub fn image_name(&self) -> String {
        format!("{}-from-source:{}", self.package_name, self.image_tag())
    }
}
