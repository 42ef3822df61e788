use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::{CommandOutput, CommandRunner, CommandSpec, ExecError, OutputMode};

/// Runner that spawns OS subprocesses and waits for each to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    fn build_command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(spec.program());
        cmd.args(spec.get_args());
        if let Some(cwd) = spec.cwd() {
            cmd.current_dir(cwd);
        }
        match spec.output_mode() {
            OutputMode::Inherit => {
                cmd.stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
            OutputMode::Capture => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::inherit());
            }
            OutputMode::Discard => {
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());
            }
        }
        cmd
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        spec.validate()?;
        spec.trace_state();
        info!(command = %spec, "running command");

        let child = Self::build_command(spec).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExecError::NotFound {
                    program: spec.program().to_string(),
                }
            } else {
                ExecError::Spawn {
                    program: spec.program().to_string(),
                    source: e,
                }
            }
        })?;

        let output = child.wait_with_output().await?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        };

        if result.success() {
            debug!(command = %spec, "command exited successfully");
        } else if spec.is_checked() {
            error!(command = %spec, code = ?result.code, "command failed");
            return Err(ExecError::Failed {
                command: spec.to_string(),
                code: result.code,
            });
        } else {
            debug!(command = %spec, code = ?result.code, "command exited non-zero (unchecked)");
        }
        Ok(result)
    }
}
