use std::{
    fmt, fs,
    future::Future,
    path::{Path, PathBuf},
};

use fsrc_exec::{CommandRunner, CommandSpec};
use fsrc_model::VersionInfo;
use tracing::{error, info, warn};

use super::{
    AgentSettings, OS_RELEASE_PATH, OsRelease, acquisition_commands, archive_command,
    archive_name, bootstrap_command, copy_tree, dependency_commands, find_source_package,
    has_checkout, rebuild_command, render_descriptor, source_package_command,
};
use crate::{error::CoreError, version::VersionDeriver};

/// Stages of the build agent, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStage {
    Bootstrap,
    Dependencies,
    Source,
    Version,
    Archive,
    SourcePackage,
    Discovery,
    Packages,
}

impl AgentStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStage::Bootstrap => "bootstrap",
            AgentStage::Dependencies => "dependencies",
            AgentStage::Source => "source",
            AgentStage::Version => "version",
            AgentStage::Archive => "archive",
            AgentStage::SourcePackage => "source-package",
            AgentStage::Discovery => "discovery",
            AgentStage::Packages => "packages",
        }
    }
}

impl fmt::Display for AgentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a successful agent run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    /// `--skip-build`: stopped after dependency installation.
    Skipped,
    /// Binary packages were built from `source_package`.
    Built {
        version: VersionInfo,
        source_package: PathBuf,
    },
}

/// Linear build pipeline run inside the container.
///
/// Stages run strictly one after another; the first failure ends the run.
pub struct AgentPipeline<'a> {
    runner: &'a dyn CommandRunner,
    settings: AgentSettings,
    os_release: PathBuf,
}

impl<'a> AgentPipeline<'a> {
    pub fn new(runner: &'a dyn CommandRunner, settings: AgentSettings) -> Self {
        Self {
            runner,
            settings,
            os_release: PathBuf::from(OS_RELEASE_PATH),
        }
    }

    /// Read platform identification from `path` instead of `/etc/os-release`.
    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    /// Run every selected stage.
    ///
    /// Order: bootstrap, dependencies, then (unless skipped) source, version,
    /// archive, source package, discovery and binary packages.
    pub async fn run(&self) -> Result<AgentOutcome, CoreError> {
        let settings = &self.settings;

        if settings.bootstrap {
            self.stage(AgentStage::Bootstrap, async {
                info!("installing basic dependencies");
                self.exec(&bootstrap_command(settings)).await
            })
            .await?;
        }

        if let Some(source) = settings.install_deps_from.as_deref() {
            self.stage(AgentStage::Dependencies, self.install_dependencies(source))
                .await?;
        }

        if settings.skip_build {
            info!("skipping build phase");
            return Ok(AgentOutcome::Skipped);
        }

        info!("building packages");
        self.stage(AgentStage::Source, self.acquire_source()).await?;

        let version = self
            .stage(
                AgentStage::Version,
                VersionDeriver::new(self.runner).derive(&settings.source_path),
            )
            .await?;

        let write_dir = settings.write_dir();
        self.stage(AgentStage::Archive, self.archive(&version, &write_dir))
            .await?;
        self.stage(
            AgentStage::SourcePackage,
            self.build_source_package(&version, &write_dir),
        )
        .await?;

        let stem = version.package_stem(&settings.package_name);
        let source_package = self
            .stage(AgentStage::Discovery, async {
                info!(%stem, "selecting source package");
                find_source_package(&write_dir, &stem)
            })
            .await?;

        self.stage(AgentStage::Packages, async {
            info!(srpm = %source_package.display(), "building binary packages");
            self.exec(&rebuild_command(settings, &write_dir, &source_package))
                .await
        })
        .await?;

        Ok(AgentOutcome::Built {
            version,
            source_package,
        })
    }

    async fn stage<T, F>(&self, stage: AgentStage, body: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        info!(%stage, "stage started");
        body.await
            .inspect_err(|err| error!(%stage, error = %err, "stage failed"))
    }

    async fn exec(&self, cmd: &CommandSpec) -> Result<(), CoreError> {
        self.runner.run(cmd).await?;
        Ok(())
    }

    async fn exec_all(&self, cmds: &[CommandSpec]) -> Result<(), CoreError> {
        for cmd in cmds {
            self.exec(cmd).await?;
        }
        Ok(())
    }

    async fn install_dependencies(&self, source: &str) -> Result<(), CoreError> {
        info!(source, "installing build dependencies");
        let platform = OsRelease::load(&self.os_release);
        info!(platform = platform.id().unwrap_or("unknown"), "detected platform");
        self.exec_all(&dependency_commands(&self.settings, source, &platform))
            .await
    }

    async fn acquire_source(&self) -> Result<(), CoreError> {
        let settings = &self.settings;
        let existing = has_checkout(&settings.source_path);
        if existing {
            info!(path = %settings.source_path.display(), "found source checkout");
        } else {
            info!(
                repo = %settings.git_repo,
                git_ref = %settings.git_ref,
                "cloning sources"
            );
        }
        self.exec_all(&acquisition_commands(settings, existing)).await
    }

    async fn archive(&self, version: &VersionInfo, write_dir: &Path) -> Result<(), CoreError> {
        info!("building source tarball");
        fs::create_dir_all(write_dir).map_err(|e| CoreError::io(write_dir, e))?;
        let dest = write_dir.join(archive_name(&self.settings, version));
        self.exec(&archive_command(&self.settings, version, &dest))
            .await
    }

    async fn build_source_package(
        &self,
        version: &VersionInfo,
        write_dir: &Path,
    ) -> Result<(), CoreError> {
        info!("building source package");
        let settings = &self.settings;
        copy_tree(&settings.package_source, write_dir)?;

        let template_path = write_dir.join(settings.template_name());
        let template =
            fs::read_to_string(&template_path).map_err(|e| CoreError::io(&template_path, e))?;
        let descriptor = render_descriptor(
            &template,
            &settings.package_name,
            &version.package_version(),
        );
        if descriptor.replaced == 0 {
            warn!(
                template = %template_path.display(),
                "version placeholder not found; descriptor copied unchanged"
            );
        }

        let descriptor_path = write_dir.join(settings.descriptor_name());
        fs::write(&descriptor_path, descriptor.text)
            .map_err(|e| CoreError::io(&descriptor_path, e))?;

        self.exec(&source_package_command(settings, write_dir, version))
            .await
    }
}
