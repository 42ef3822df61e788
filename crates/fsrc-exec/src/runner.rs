use async_trait::async_trait;

use crate::{CommandOutput, CommandSpec, ExecError};

/// Executes external commands, one at a time.
///
/// Implementations must:
/// - log the command before running it;
/// - return [`ExecError::NotFound`] when the program does not exist;
/// - return [`ExecError::Failed`] for a non-zero exit of a checked command.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `cmd` to completion.
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ExecError>;

    /// Run `cmd` with stdout captured and return it trimmed.
    async fn output(&self, cmd: &CommandSpec) -> Result<String, ExecError> {
        let out = self.run(&cmd.clone().capture()).await?;
        Ok(out.stdout.trim().to_string())
    }
}
