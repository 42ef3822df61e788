//! Container engine detection.
use fsrc_exec::{CommandRunner, CommandSpec};
use tracing::{debug, info, instrument};

use crate::error::CoreError;

/// Engines probed when none is configured, in order.
pub const ENGINE_CANDIDATES: [&str; 2] = ["podman", "docker"];

/// Picks the container engine for the host pipeline.
pub struct EngineSelector<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> EngineSelector<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Return the engine to use.
    ///
    /// An explicit choice is returned as is. Otherwise each candidate is
    /// probed with `--help` (output discarded); the first one that exits
    /// successfully wins. Missing binaries and failing probes fall through
    /// to the next candidate.
    #[instrument(level = "debug", skip(self))]
    pub async fn select(&self, explicit: Option<&str>) -> Result<String, CoreError> {
        if let Some(engine) = explicit.filter(|e| !e.is_empty()) {
            info!(engine, "using configured container engine");
            return Ok(engine.to_string());
        }

        for candidate in ENGINE_CANDIDATES {
            let probe = CommandSpec::new(candidate)
                .arg("--help")
                .quiet()
                .unchecked();
            match self.runner.run(&probe).await {
                Ok(out) if out.success() => {
                    info!(engine = %candidate, "detected container engine");
                    return Ok(candidate.to_string());
                }
                Ok(out) => debug!(engine = %candidate, code = ?out.code, "engine probe failed"),
                Err(err) => debug!(engine = %candidate, error = %err, "engine not usable"),
            }
        }
        Err(CoreError::EngineNotFound {
            tried: ENGINE_CANDIDATES.iter().map(ToString::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use fsrc_exec::{FakeReply, FakeRunner, OutputMode};

    use super::*;

    #[tokio::test]
    async fn explicit_choice_is_not_probed() {
        let runner = FakeRunner::new();
        let engine = EngineSelector::new(&runner)
            .select(Some("nerdctl"))
            .await
            .unwrap();
        assert_eq!(engine, "nerdctl");
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn first_working_candidate_wins() {
        let runner = FakeRunner::new();
        let engine = EngineSelector::new(&runner).select(None).await.unwrap();
        assert_eq!(engine, "podman");

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].argv(), ["podman", "--help"]);
        assert_eq!(calls[0].output_mode(), OutputMode::Discard);
    }

    #[tokio::test]
    async fn missing_first_candidate_falls_through() {
        let runner = FakeRunner::new().on(["podman"], FakeReply::Missing);
        let engine = EngineSelector::new(&runner).select(None).await.unwrap();
        assert_eq!(engine, "docker");
        assert_eq!(runner.argvs(), [["podman", "--help"], ["docker", "--help"]]);
    }

    #[tokio::test]
    async fn failing_probe_falls_through() {
        let runner = FakeRunner::new().on(["podman"], FakeReply::Exit(125));
        let engine = EngineSelector::new(&runner).select(None).await.unwrap();
        assert_eq!(engine, "docker");
    }

    #[tokio::test]
    async fn no_candidate_is_fatal() {
        let runner = FakeRunner::new()
            .on(["podman"], FakeReply::Missing)
            .on(["docker"], FakeReply::Missing);
        let err = EngineSelector::new(&runner).select(None).await.unwrap_err();
        assert!(matches!(err, CoreError::EngineNotFound { ref tried } if tried.len() == 2));
        assert_eq!(err.exit_code(), 1);
    }
}
