use std::fmt;

use serde::{Deserialize, Serialize};

/// A single resolved option value.
///
/// Values come from three places (command line, configuration file, declared
/// default) and are merged into one view. Only the shape matters here; the
/// meaning of a value is decided by the typed settings built on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Boolean presence option (`--bootstrap`, `keep_dnf: false`).
    Toggle(bool),
    /// Single textual value.
    Text(String),
    /// Repeated value (`--task image --task packages`, YAML sequence).
    List(Vec<String>),
}

impl ConfigValue {
    /// Truthiness used by both precedence and forwarding.
    ///
    /// `false`, the empty string and the empty list are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Toggle(b) => *b,
            ConfigValue::Text(s) => !s.is_empty(),
            ConfigValue::List(v) => !v.is_empty(),
        }
    }

    /// Returns the text of a single value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the toggle state.
    ///
    /// Text values are accepted when they spell a boolean, since a value read
    /// from a command line or a quoted YAML scalar arrives as text.
    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            ConfigValue::Toggle(b) => Some(*b),
            ConfigValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" | "" => Some(false),
                _ => None,
            },
            ConfigValue::List(_) => None,
        }
    }

    /// Returns the value as a list. A single text value is a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            ConfigValue::Toggle(b) => vec![b.to_string()],
            ConfigValue::Text(s) => vec![s.clone()],
            ConfigValue::List(v) => v.clone(),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Toggle(b) => write!(f, "{b}"),
            ConfigValue::Text(s) => write!(f, "{s:?}"),
            ConfigValue::List(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Toggle(b)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(v: Vec<String>) -> Self {
        ConfigValue::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigValue;

    #[test]
    fn truthiness_follows_value_shape() {
        assert!(ConfigValue::from(true).is_truthy());
        assert!(!ConfigValue::from(false).is_truthy());
        assert!(ConfigValue::from("podman").is_truthy());
        assert!(!ConfigValue::from("").is_truthy());
        assert!(ConfigValue::from(vec!["image".to_string()]).is_truthy());
        assert!(!ConfigValue::List(Vec::new()).is_truthy());
    }

    #[test]
    fn text_spelling_a_boolean_reads_as_toggle() {
        assert_eq!(ConfigValue::from("true").as_toggle(), Some(true));
        assert_eq!(ConfigValue::from("No").as_toggle(), Some(false));
        assert_eq!(ConfigValue::from("maybe").as_toggle(), None);
        assert_eq!(ConfigValue::List(vec![]).as_toggle(), None);
    }

    #[test]
    fn single_text_is_one_element_list() {
        assert_eq!(
            ConfigValue::from("packages").to_list(),
            vec!["packages".to_string()]
        );
    }

    #[test]
    fn serde_is_untagged() {
        let v: ConfigValue = serde_json::from_str("false").unwrap();
        assert_eq!(v, ConfigValue::Toggle(false));

        let v: ConfigValue = serde_json::from_str(r#"["image","packages"]"#).unwrap();
        assert_eq!(v.to_list().len(), 2);

        let json = serde_json::to_string(&ConfigValue::from("docker")).unwrap();
        assert_eq!(json, r#""docker""#);
    }
}
