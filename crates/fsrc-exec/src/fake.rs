//! In-memory [`CommandRunner`] for tests.
//!
//! Records every command and answers from a script of replies matched by
//! argument-vector prefix. Unmatched commands succeed with empty output.
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{CommandOutput, CommandRunner, CommandSpec, ExecError};

/// Scripted outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeReply {
    /// Exit 0 with the given stdout.
    Stdout(String),
    /// Exit with the given code.
    Exit(i32),
    /// The program does not exist.
    Missing,
}

#[derive(Debug, Default)]
pub struct FakeRunner {
    replies: Mutex<Vec<(Vec<String>, FakeReply)>>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to every command whose argv starts with `prefix`.
    ///
    /// Earlier registrations win over later ones.
    pub fn on<I, S>(self, prefix: I, reply: FakeReply) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = prefix.into_iter().map(Into::into).collect();
        self.replies
            .lock()
            .expect("fake runner replies poisoned")
            .push((prefix, reply));
        self
    }

    /// All commands run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().expect("fake runner calls poisoned").clone()
    }

    /// Argument vectors of all commands run so far.
    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.calls()
            .iter()
            .map(|c| c.argv().into_iter().map(str::to_string).collect())
            .collect()
    }

    fn reply_for(&self, cmd: &CommandSpec) -> Option<FakeReply> {
        let argv = cmd.argv();
        self.replies
            .lock()
            .expect("fake runner replies poisoned")
            .iter()
            .find(|(prefix, _)| {
                prefix.len() <= argv.len() && prefix.iter().zip(&argv).all(|(p, a)| p == a)
            })
            .map(|(_, reply)| reply.clone())
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, cmd: &CommandSpec) -> Result<CommandOutput, ExecError> {
        cmd.validate()?;
        self.calls
            .lock()
            .expect("fake runner calls poisoned")
            .push(cmd.clone());

        let output = match self.reply_for(cmd) {
            None => CommandOutput {
                code: Some(0),
                stdout: String::new(),
            },
            Some(FakeReply::Stdout(stdout)) => CommandOutput {
                code: Some(0),
                stdout,
            },
            Some(FakeReply::Exit(code)) => CommandOutput {
                code: Some(code),
                stdout: String::new(),
            },
            Some(FakeReply::Missing) => {
                return Err(ExecError::NotFound {
                    program: cmd.program().to_string(),
                });
            }
        };

        if !output.success() && cmd.is_checked() {
            return Err(ExecError::Failed {
                command: cmd.to_string(),
                code: output.code,
            });
        }
        Ok(output)
    }
}
