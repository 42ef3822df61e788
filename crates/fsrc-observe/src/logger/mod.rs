mod config;
mod error;
mod logger;
mod object;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use object::{LoggerFormat, LoggerLevel, LoggerTimeZone, init_local_offset};

/// Installs the global tracing subscriber described by `cfg`.
///
/// Call once per process, before the first external command runs, so that
/// every `running command` line is captured.
///
/// # Examples
/// ```rust
/// use fsrc_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).unwrap();
/// tracing::info!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    logger::install(cfg)
}
