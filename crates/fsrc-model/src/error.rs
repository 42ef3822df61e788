use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown task: {0} (expected: image|packages)")]
    UnknownTask(String),

    #[error("invalid version info: {0}")]
    InvalidVersion(String),

    #[error("invalid model: {0}")]
    Invalid(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
