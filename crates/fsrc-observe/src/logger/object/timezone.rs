use std::{str::FromStr, sync::OnceLock};

use time::UtcOffset;

use crate::logger::error::LoggerError;

/// Local offset captured once at startup.
static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Timezone for log timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggerTimeZone {
    #[default]
    Utc,
    Local,
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

/// Capture the local UTC offset.
///
/// Must run before any thread is spawned: offset detection refuses to work
/// in multi-threaded processes on most Unix platforms. Falls back to UTC.
pub fn init_local_offset() {
    let _ = local_offset();
}

pub(crate) fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}
