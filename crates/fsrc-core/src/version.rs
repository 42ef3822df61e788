//! Version derivation from the source checkout's latest commit.
use std::path::Path;

use fsrc_exec::{CommandRunner, CommandSpec};
use fsrc_model::VersionInfo;
use tracing::{info, instrument};

use crate::error::CoreError;

/// Reads commit date and abbreviated hash with `git log`.
pub struct VersionDeriver<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> VersionDeriver<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    #[instrument(level = "debug", skip(self, checkout), fields(checkout = %checkout.display()))]
    pub async fn derive(&self, checkout: &Path) -> Result<VersionInfo, CoreError> {
        info!("getting build version info");
        let date = self
            .runner
            .output(
                &CommandSpec::new("git")
                    .args(["log", "-1", "--format=format:%cd", "--date=iso"])
                    .current_dir(checkout),
            )
            .await?;
        let hash = self
            .runner
            .output(
                &CommandSpec::new("git")
                    .args(["log", "-1", "--format=%h"])
                    .current_dir(checkout),
            )
            .await?;

        let version = VersionInfo::new(date, hash)?;
        info!(%version, "determined version information");
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use fsrc_exec::{FakeReply, FakeRunner, OutputMode};

    use super::*;

    #[tokio::test]
    async fn reads_date_and_hash_from_git() {
        let runner = FakeRunner::new()
            .on(
                ["git", "log", "-1", "--format=format:%cd"],
                FakeReply::Stdout("2024-01-05 10:20:30 +0000".into()),
            )
            .on(
                ["git", "log", "-1", "--format=%h"],
                FakeReply::Stdout("abc1234\n".into()),
            );

        let version = VersionDeriver::new(&runner)
            .derive(Path::new("/srv/build/source"))
            .await
            .unwrap();
        assert_eq!(version.package_version(), "20240105.102030.abc1234");

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert_eq!(call.cwd().unwrap(), Path::new("/srv/build/source"));
            assert_eq!(call.output_mode(), OutputMode::Capture);
        }
    }

    #[tokio::test]
    async fn git_failure_propagates() {
        let runner = FakeRunner::new().on(["git"], FakeReply::Exit(128));
        let err = VersionDeriver::new(&runner)
            .derive(Path::new("/nowhere"))
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 128);
    }

    #[tokio::test]
    async fn empty_history_is_invalid() {
        let runner = FakeRunner::new();
        let err = VersionDeriver::new(&runner)
            .derive(Path::new("/srv/build/source"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Model(_)));
    }
}
