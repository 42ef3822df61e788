use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("configuration file {} must be a mapping of option names to values", path.display())]
    NotAMapping { path: PathBuf },

    #[error("missing required option: {0}")]
    Missing(String),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}
