//! External command execution.
//!
//! Every container-engine, git, dnf and rpmbuild call goes through a
//! [`CommandRunner`]. Production code uses [`SubprocessRunner`]; tests use
//! `FakeRunner` (feature `fake`).
mod error;
pub use error::ExecError;

mod command;
pub use command::{CommandOutput, CommandSpec, OutputMode};

mod runner;
pub use runner::CommandRunner;

pub mod subprocess;
pub use subprocess::SubprocessRunner;

#[cfg(any(test, feature = "fake"))]
mod fake;
#[cfg(any(test, feature = "fake"))]
pub use fake::{FakeReply, FakeRunner};
