//! Declarative description of the options a process accepts.
//!
//! The build agent owns its option declarations. The host never keeps a copy:
//! it receives the agent's [`ArgumentSpec`] and uses it to decide which of its
//! own resolved values must be forwarded, and how.
use std::fmt;

use serde::{Deserialize, Serialize};

/// How an option is written on a command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKind {
    /// Boolean presence flag: forwarded as the bare flag when enabled.
    Toggle,
    /// Value-bearing option: forwarded as `flag value`.
    Value {
        /// Secondary configuration-file key (e.g. `tasks` for `task`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alternate_key: Option<String>,
    },
}

impl OptionKind {
    /// Value option without an alternate key.
    pub const fn value() -> Self {
        OptionKind::Value {
            alternate_key: None,
        }
    }

    /// Returns `true` for [`OptionKind::Toggle`].
    pub fn is_toggle(&self) -> bool {
        matches!(self, OptionKind::Toggle)
    }

    /// Alternate configuration-file key, if declared.
    pub fn alternate_key(&self) -> Option<&str> {
        match self {
            OptionKind::Toggle => None,
            OptionKind::Value { alternate_key } => alternate_key.as_deref(),
        }
    }
}

/// One declared option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    /// Option name as used in the merged configuration (`keep_dnf`).
    name: String,
    /// Command-line flag (`--keep-dnf`).
    flag: String,
    /// Forwarding rule.
    kind: OptionKind,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, flag: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            flag: flag.into(),
            kind,
        }
    }

    /// Shorthand for a toggle option.
    pub fn toggle(name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self::new(name, flag, OptionKind::Toggle)
    }

    /// Shorthand for a value option without alternate key.
    pub fn value(name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self::new(name, flag, OptionKind::value())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }
}

/// Ordered set of declared options.
///
/// Order is declaration order and is preserved everywhere the argument spec is walked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentSpec(Vec<OptionSpec>);

impl ArgumentSpec {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an option. A later declaration with the same name replaces the
    /// earlier one in place, keeping its position.
    pub fn push(&mut self, option: OptionSpec) {
        match self.0.iter_mut().find(|o| o.name == option.name) {
            Some(existing) => *existing = option,
            None => self.0.push(option),
        }
    }

    /// Builder-style [`ArgumentSpec::push`].
    pub fn with(mut self, option: OptionSpec) -> Self {
        self.push(option);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.0.iter().find(|o| o.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<&str> = self.0.iter().map(|o| o.flag.as_str()).collect();
        write!(f, "ArgumentSpec({})", flags.join(" "))
    }
}

impl FromIterator<OptionSpec> for ArgumentSpec {
    fn from_iter<I: IntoIterator<Item = OptionSpec>>(iter: I) -> Self {
        let mut spec = ArgumentSpec::new();
        for option in iter {
            spec.push(option);
        }
        spec
    }
}
