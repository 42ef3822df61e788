use std::collections::BTreeMap;

use clap::{ArgAction, ArgMatches, Command, parser::ValueSource};
use fsrc_model::{ArgumentSpec, ConfigValue, OptionKind, OptionSpec};
use tracing::trace;

/// Derive an [`ArgumentSpec`] from a clap command.
///
/// Walks the command's long options in declaration order:
/// - `SetTrue` options become [`OptionKind::Toggle`];
/// - `Set`/`Append` options become [`OptionKind::Value`], with the first long
///   alias (dashes mapped to underscores) as alternate configuration key;
/// - positionals, `--help`, `--version` and other actions are skipped.
pub fn argument_spec(cmd: &Command) -> ArgumentSpec {
    cmd.get_arguments()
        .filter_map(|arg| {
            let long = arg.get_long()?;
            let kind = match arg.get_action() {
                ArgAction::SetTrue => OptionKind::Toggle,
                ArgAction::Set | ArgAction::Append => OptionKind::Value {
                    alternate_key: arg
                        .get_all_aliases()
                        .and_then(|aliases| aliases.first().map(|a| a.replace('-', "_"))),
                },
                _ => return None,
            };
            Some(OptionSpec::new(
                arg.get_id().as_str(),
                format!("--{long}"),
                kind,
            ))
        })
        .collect()
}

/// Command-line values, split by where clap got them from.
///
/// Values typed by the operator are *explicit*; `default_value`s are
/// *defaults* and only apply when neither the command line nor the
/// configuration file supplies the option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliValues {
    explicit: BTreeMap<String, ConfigValue>,
    defaults: BTreeMap<String, ConfigValue>,
}

impl CliValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect values of every option in `spec` from parsed matches.
    ///
    /// Toggles never contribute a default: an unspecified `--keep-dnf` is
    /// absent, not `false`.
    pub fn from_matches(spec: &ArgumentSpec, matches: &ArgMatches) -> Self {
        let mut out = Self::new();
        for option in spec.iter() {
            let name = option.name();
            let Some(source) = matches.value_source(name) else {
                continue;
            };
            let is_default = source == ValueSource::DefaultValue;

            let value = if option.kind().is_toggle() {
                if is_default {
                    continue;
                }
                ConfigValue::Toggle(matches.get_flag(name))
            } else {
                let Some(raw) = matches.try_get_raw(name).ok().flatten() else {
                    continue;
                };
                let mut values: Vec<String> =
                    raw.map(|v| v.to_string_lossy().into_owned()).collect();
                match values.len() {
                    0 => continue,
                    1 => ConfigValue::Text(values.remove(0)),
                    _ => ConfigValue::List(values),
                }
            };

            trace!(option = name, ?source, %value, "command-line value");
            if is_default {
                out.defaults.insert(name.to_string(), value);
            } else {
                out.explicit.insert(name.to_string(), value);
            }
        }
        out
    }

    /// Builder-style explicit value.
    pub fn with_explicit(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.explicit.insert(name.into(), value.into());
        self
    }

    /// Builder-style default value.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    pub fn explicit(&self, name: &str) -> Option<&ConfigValue> {
        self.explicit.get(name)
    }

    pub fn default_value(&self, name: &str) -> Option<&ConfigValue> {
        self.defaults.get(name)
    }
}

#[cfg(test)]
mod tests {
    use clap::{Arg, ArgAction, Command};

    use super::*;

    fn agent_like() -> Command {
        Command::new("agent")
            .arg(
                Arg::new("source_path")
                    .long("source-path")
                    .alias("samba-source")
                    .default_value("/srv/build/source"),
            )
            .arg(Arg::new("job").long("job").short('j'))
            .arg(
                Arg::new("task")
                    .long("task")
                    .alias("tasks")
                    .action(ArgAction::Append),
            )
            .arg(
                Arg::new("keep_dnf")
                    .long("keep-dnf")
                    .action(ArgAction::SetTrue),
            )
            .arg(Arg::new("input"))
    }

    #[test]
    fn spec_follows_declaration_order_and_kinds() {
        let spec = argument_spec(&agent_like());
        let names: Vec<&str> = spec.iter().map(|o| o.name()).collect();
        assert_eq!(names, ["source_path", "job", "task", "keep_dnf"]);

        let source = spec.get("source_path").unwrap();
        assert_eq!(source.flag(), "--source-path");
        assert_eq!(source.kind().alternate_key(), Some("samba_source"));

        assert_eq!(spec.get("task").unwrap().kind().alternate_key(), Some("tasks"));
        assert_eq!(spec.get("job").unwrap().kind().alternate_key(), None);
        assert!(spec.get("keep_dnf").unwrap().kind().is_toggle());
        assert!(!spec.contains("input"));
    }

    #[test]
    fn matches_split_explicit_from_defaults() {
        let cmd = agent_like();
        let spec = argument_spec(&cmd);
        let matches = cmd
            .try_get_matches_from(["agent", "-j", "c9", "--task", "image", "--task", "packages"])
            .unwrap();
        let cli = CliValues::from_matches(&spec, &matches);

        assert_eq!(cli.explicit("job"), Some(&ConfigValue::from("c9")));
        assert_eq!(
            cli.explicit("task"),
            Some(&ConfigValue::List(vec!["image".into(), "packages".into()]))
        );
        assert_eq!(cli.explicit("source_path"), None);
        assert_eq!(
            cli.default_value("source_path"),
            Some(&ConfigValue::from("/srv/build/source"))
        );
    }

    #[test]
    fn unset_toggle_is_absent_and_set_toggle_is_explicit() {
        let cmd = agent_like();
        let spec = argument_spec(&cmd);

        let matches = cmd.clone().try_get_matches_from(["agent"]).unwrap();
        let cli = CliValues::from_matches(&spec, &matches);
        assert_eq!(cli.explicit("keep_dnf"), None);
        assert_eq!(cli.default_value("keep_dnf"), None);

        let matches = cmd.try_get_matches_from(["agent", "--keep-dnf"]).unwrap();
        let cli = CliValues::from_matches(&spec, &matches);
        assert_eq!(cli.explicit("keep_dnf"), Some(&ConfigValue::Toggle(true)));
    }
}
