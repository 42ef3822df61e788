use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `EnvFilter` expression.
///
/// Checked with `EnvFilter::try_new` on construction, so a bad `--log-level`
/// is rejected by the argument parser rather than at subscriber install time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerLevel(String);

impl LoggerLevel {
    /// # Examples
    /// ```
    /// use fsrc_observe::LoggerLevel;
    ///
    /// let lvl = LoggerLevel::new("fsrc_exec=trace,info").unwrap();
    /// assert_eq!(lvl.as_str(), "fsrc_exec=trace,info");
    /// ```
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        let s = s.into();
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(Self(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
