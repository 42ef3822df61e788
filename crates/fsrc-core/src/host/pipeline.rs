use std::{fmt, fs, path::Path};

use fsrc_exec::{CommandRunner, CommandSpec};
use fsrc_model::Task;
use tracing::{debug, error, info};

use super::HostSettings;
use crate::error::CoreError;

/// Host pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Idle,
    ImageBuild,
    AgentRun,
    Done,
    Failed,
}

impl fmt::Display for HostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HostState::Idle => "idle",
            HostState::ImageBuild => "image-build",
            HostState::AgentRun => "agent-run",
            HostState::Done => "done",
            HostState::Failed => "failed",
        })
    }
}

/// Builds the build-image and runs the agent container.
///
/// `Idle -> ImageBuild -> AgentRun -> Done`; either middle state is skipped
/// when its task is not selected. Any failing command moves to `Failed` and
/// ends the run with that command's error.
pub struct HostPipeline<'a> {
    runner: &'a dyn CommandRunner,
    engine: String,
    settings: HostSettings,
    agent_args: Vec<String>,
    state: HostState,
}

impl<'a> HostPipeline<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        engine: impl Into<String>,
        settings: HostSettings,
    ) -> Self {
        Self {
            runner,
            engine: engine.into(),
            settings,
            agent_args: Vec::new(),
            state: HostState::Idle,
        }
    }

    /// Arguments appended to the agent's command line (see
    /// [`forward_arguments`](crate::forward_arguments)).
    pub fn with_agent_args(mut self, args: Vec<String>) -> Self {
        self.agent_args = args;
        self
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub async fn run(&mut self) -> Result<(), CoreError> {
        info!(
            engine = %self.engine,
            tasks = %self.settings.tasks,
            image = %self.settings.image_name(),
            "starting host pipeline"
        );
        match self.run_tasks().await {
            Ok(()) => {
                self.transition(HostState::Done);
                Ok(())
            }
            Err(err) => {
                error!(state = %self.state, error = %err, "host pipeline failed");
                self.transition(HostState::Failed);
                Err(err)
            }
        }
    }

    async fn run_tasks(&mut self) -> Result<(), CoreError> {
        for task in Task::ALL {
            if !self.settings.tasks.contains(task) {
                debug!(%task, "not running task");
                continue;
            }
            debug!(%task, "running task");
            match task {
                Task::Image => {
                    self.transition(HostState::ImageBuild);
                    let cmd = self.build_image_command()?;
                    self.runner.run(&cmd).await?;
                }
                Task::Packages => {
                    self.transition(HostState::AgentRun);
                    let cmd = self.run_agent_command()?;
                    self.runner.run(&cmd).await?;
                }
            }
        }
        Ok(())
    }

    fn transition(&mut self, next: HostState) {
        debug!(from = %self.state, to = %next, "host state transition");
        self.state = next;
    }

    /// `<engine> build` of the build-image.
    pub fn build_image_command(&self) -> Result<CommandSpec, CoreError> {
        let settings = &self.settings;
        let mut cmd = CommandSpec::new(self.engine.as_str()).arg("build");
        if let Some(base) = &settings.base_image {
            cmd = cmd.arg(format!("--build-arg=BASE_IMAGE={base}"));
        }
        let cache = self.cache_volumes()?;
        if !cache.is_empty() {
            cmd = cmd.arg("--build-arg=EXTRA_OPTS=--keep-dnf");
        }
        Ok(cmd
            .args(["-t".to_string(), settings.image_name()])
            .args(cache)
            .arg("-f")
            .arg(settings.containerfile.to_string_lossy())
            .arg(settings.build_context.to_string_lossy()))
    }

    /// `<engine> run` of the agent container.
    pub fn run_agent_command(&self) -> Result<CommandSpec, CoreError> {
        let settings = &self.settings;
        let mut cmd = CommandSpec::new(self.engine.as_str())
            .args(["run", "--rm", "-it"])
            .args(self.cache_volumes()?);
        if let Some(src) = &settings.source_dir {
            cmd = cmd.args(["--volume".to_string(), volume(src, &settings.source_path)]);
        }
        if let Some(out) = &settings.artifacts_dir {
            cmd = cmd.args(["--volume".to_string(), volume(out, &settings.workdir)]);
        }
        cmd = cmd.arg("--userns=keep-id");
        if settings.shell {
            cmd = cmd.args(["--entrypoint", "bash"]);
        }
        cmd = cmd.arg(settings.image_name());
        if !settings.shell {
            cmd = cmd.args(self.agent_args.iter().cloned());
        }
        Ok(cmd)
    }

    /// Volume options for the package-manager cache; creates its directories.
    fn cache_volumes(&self) -> Result<Vec<String>, CoreError> {
        let Some(root) = &self.settings.dnf_cache else {
            return Ok(Vec::new());
        };
        let mut out = Vec::with_capacity(4);
        for (sub, target) in [("lib", "/var/lib/dnf"), ("cache", "/var/cache/dnf")] {
            let dir = root.join(sub);
            fs::create_dir_all(&dir).map_err(|e| CoreError::io(&dir, e))?;
            out.push("--volume".to_string());
            out.push(volume(&dir, target));
        }
        Ok(out)
    }
}

fn volume(host: &Path, target: &str) -> String {
    format!("{}:{target}", host.display())
}
