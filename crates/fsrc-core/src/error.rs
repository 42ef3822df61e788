use std::{path::PathBuf, process::ExitCode};

use fsrc_exec::ExecError;
use fsrc_model::ModelError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("unable to detect a container engine (tried: {})", tried.join(", "))]
    EngineNotFound { tried: Vec<String> },

    #[error(transparent)]
    Command(#[from] ExecError),

    #[error("no source package matching {stem}*.src.rpm under {}", dir.display())]
    SourcePackageNotFound { stem: String, dir: PathBuf },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    /// Process exit status for this error.
    ///
    /// A failed external command surfaces its own exit code; every other
    /// error is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CoreError::Command(err) => err.exit_code(),
            _ => 1,
        }
    }

    /// [`CoreError::exit_code`] as a process exit status; codes outside
    /// `1..=255` become `1`.
    pub fn exit_status(&self) -> ExitCode {
        match u8::try_from(self.exit_code()) {
            Ok(code) if code != 0 => ExitCode::from(code),
            _ => ExitCode::FAILURE,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_surfaces_its_exit_code() {
        let err = CoreError::from(ExecError::Failed {
            command: "podman build".into(),
            code: Some(125),
        });
        assert_eq!(err.exit_code(), 125);
        assert_eq!(err.to_string(), "command failed with exit code 125: podman build");
    }

    #[test]
    fn other_errors_exit_with_one() {
        let err = CoreError::EngineNotFound {
            tried: vec!["podman".into(), "docker".into()],
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("podman, docker"));

        let err = CoreError::SourcePackageNotFound {
            stem: "samba-20240105.102030.abc1234".into(),
            dir: PathBuf::from("/srv/build/work"),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("samba-20240105.102030.abc1234"));
    }
}
