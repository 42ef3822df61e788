//! Logger options shared by both binaries.
//!
//! These options configure the process they are given to and are never part
//! of an [`ArgumentSpec`](fsrc_model::ArgumentSpec): `#[command(flatten)]`
//! them next to the pipeline options, not inside them.
use clap::Args;
use fsrc_observe::{LoggerConfig, LoggerFormat, LoggerLevel, LoggerTimeZone};

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Log filter expression (`info`, `debug`, `fsrc_core=trace,info`).
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<LoggerLevel>,

    /// Log output format: text, json or journald.
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    /// Timestamp timezone: utc or local.
    #[arg(long = "log-tz", value_name = "TZ", default_value = "utc")]
    pub log_tz: LoggerTimeZone,
}

impl LogArgs {
    /// Logger configuration, using `fallback_level` when no level was given.
    pub fn to_logger_config(&self, fallback_level: &str) -> LoggerConfig {
        let level = self
            .log_level
            .clone()
            .or_else(|| LoggerLevel::new(fallback_level).ok())
            .unwrap_or_default();
        LoggerConfig {
            tz: self.log_tz,
            ..LoggerConfig::new(self.log_format, level)
        }
    }
}
