use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use fsrc_model::ConfigValue;
use serde_yaml::Value;
use tracing::debug;

use super::ConfigError;

/// Parsed YAML configuration file.
///
/// The document is a top-level mapping from option name to value. Keys may be
/// written with dashes or underscores (`dnf-cache` and `dnf_cache` are the
/// same key). `null` values count as absent, unknown keys are kept but never
/// read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    values: BTreeMap<String, ConfigValue>,
}

impl ConfigFile {
    /// Read and parse `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = Self::parse(&text, path)?;
        file.path = Some(path.to_path_buf());
        debug!(path = %path.display(), keys = file.values.len(), "read configuration file");
        Ok(file)
    }

    /// Parse YAML text; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let origin = origin.as_ref();
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let doc: Value = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        let mapping = match doc {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::default()),
            _ => {
                return Err(ConfigError::NotAMapping {
                    path: origin.to_path_buf(),
                });
            }
        };

        let values = mapping
            .iter()
            .filter_map(|(key, value)| {
                let key = key.as_str()?.trim().replace('-', "_");
                Some((key, convert(value)?))
            })
            .collect();
        Ok(Self { path: None, values })
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Path the file was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn convert(value: &Value) -> Option<ConfigValue> {
    match value {
        Value::Bool(b) => Some(ConfigValue::Toggle(*b)),
        Value::Sequence(items) => Some(ConfigValue::List(
            items.iter().filter_map(scalar_text).collect(),
        )),
        other => scalar_text(other).map(ConfigValue::Text),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
