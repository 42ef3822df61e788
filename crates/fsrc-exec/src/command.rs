use std::{fmt, path::PathBuf};

use tracing::trace;

use crate::ExecError;

/// What happens to a child's standard streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Share the parent's terminal (interactive container runs, builds).
    #[default]
    Inherit,
    /// Capture stdout for the caller; stderr stays on the terminal.
    Capture,
    /// Discard stdout and stderr (probes).
    Discard,
}

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    output: OutputMode,
    /// Treat a non-zero exit as [`ExecError::Failed`].
    check: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            output: OutputMode::Inherit,
            check: true,
        }
    }


    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Capture stdout.
    pub fn capture(mut self) -> Self {
        self.output = OutputMode::Capture;
        self
    }

    /// Discard all output.
    pub fn quiet(mut self) -> Self {
        self.output = OutputMode::Discard;
        self
    }

    /// Report non-zero exits in [`CommandOutput`] instead of failing.
    pub fn unchecked(mut self) -> Self {
        self.check = false;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output
    }

    pub fn is_checked(&self) -> bool {
        self.check
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Rules:
    /// - `program` is not empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidSpec("command program is empty".into()));
        }
        Ok(())
    }

    pub fn trace_state(&self) {
        trace!(
            program = %self.program,
            args = ?self.args,
            cwd = ?self.cwd,
            output = ?self.output,
            check = self.check,
            "command resolved"
        );
    }
}

/// Shell-like rendering used in logs and error messages.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in self.argv() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            if part.is_empty() || part.contains(char::is_whitespace) {
                write!(f, "'{part}'")?;
            } else {
                f.write_str(part)?;
            }
        }
        Ok(())
    }
}

/// Result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when killed by a signal.
    pub code: Option<i32>,
    /// Captured stdout (empty unless [`OutputMode::Capture`]).
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}
