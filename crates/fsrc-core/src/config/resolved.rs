use std::{collections::BTreeMap, fmt};

use fsrc_model::ConfigValue;

/// Read-only lookup of option values by name.
///
/// Implemented by [`ResolvedConfig`] and by plain maps, so forwarding can be
/// exercised without a full resolution.
pub trait OptionValues {
    fn value(&self, name: &str) -> Option<&ConfigValue>;
}

impl OptionValues for BTreeMap<String, ConfigValue> {
    fn value(&self, name: &str) -> Option<&ConfigValue> {
        self.get(name)
    }
}

/// Merged configuration.
///
/// Built once by [`ConfigResolver`](super::ConfigResolver); afterwards nothing
/// reads the command line or the configuration file again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    values: BTreeMap<String, ConfigValue>,
}

impl ResolvedConfig {
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.get(name)
    }

    /// Non-empty text value of `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(ConfigValue::as_text)
            .filter(|s| !s.is_empty())
    }

    /// Toggle state of `name`; absent and unparsable values are `false`.
    pub fn toggle(&self, name: &str) -> bool {
        self.get(name)
            .and_then(ConfigValue::as_toggle)
            .unwrap_or(false)
    }

    /// Values of `name` as a list; absent is empty.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name).map(ConfigValue::to_list).unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OptionValues for ResolvedConfig {
    fn value(&self, name: &str) -> Option<&ConfigValue> {
        self.get(name)
    }
}

impl FromIterator<(String, ConfigValue)> for ResolvedConfig {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// `name=value` pairs, sorted by name.
impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}
