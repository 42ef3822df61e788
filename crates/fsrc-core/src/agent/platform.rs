//! Platform identification from `/etc/os-release`.
use std::{collections::BTreeMap, fs, path::Path};

use tracing::debug;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Parsed `os-release` key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    fields: BTreeMap<String, String>,
}

impl OsRelease {
    /// Read `path`. An unreadable file yields an empty (unknown) platform.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "os-release not readable");
                Self::default()
            }
        }
    }

    pub fn parse(text: &str) -> Self {
        let fields = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim()).to_string()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Distribution identifier (`ID=`).
    pub fn id(&self) -> Option<&str> {
        self.get("ID")
    }

    /// CentOS (including Stream) is recognized by its `ID`.
    pub fn is_centos(&self) -> bool {
        self.id().is_some_and(|id| id.contains("centos"))
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
