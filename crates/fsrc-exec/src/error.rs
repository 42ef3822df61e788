use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid command: {0}")]
    InvalidSpec(String),

    #[error("executable not found: {program}")]
    NotFound { program: String },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command failed with {}: {command}", describe_code(*.code))]
    Failed { command: String, code: Option<i32> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// Exit status to surface to the caller.
    ///
    /// A failed command's own exit code is passed through unchanged; anything
    /// else (signal, spawn error) maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::Failed {
                code: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}
