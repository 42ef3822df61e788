//! `tokio::process` implementation of [`CommandRunner`](crate::CommandRunner).
mod runner;

pub use runner::SubprocessRunner;
