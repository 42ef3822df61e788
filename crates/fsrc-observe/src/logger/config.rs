use std::io::IsTerminal;

use crate::logger::object::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"fsrc_core=debug,info"`).
    pub level: LoggerLevel,
    /// Timezone for timestamps.
    pub tz: LoggerTimeZone,
}

impl LoggerConfig {
    pub fn new(format: LoggerFormat, level: LoggerLevel) -> Self {
        Self {
            format,
            level,
            ..Default::default()
        }
    }

    /// Colors only on a terminal: the agent usually runs under `-it`, CI
    /// logs piped to a file stay plain.
    pub(crate) fn use_color(&self) -> bool {
        self.format == LoggerFormat::Text && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_overrides_format_and_level_only() {
        let config = LoggerConfig::new(LoggerFormat::Json, "debug".parse().unwrap());

        assert_eq!(config.format, LoggerFormat::Json);
        assert_eq!(config.level.as_str(), "debug");
        assert_eq!(config.tz, LoggerTimeZone::Utc);
        assert!(!config.use_color());
    }
}
