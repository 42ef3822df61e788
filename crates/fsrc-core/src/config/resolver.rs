use fsrc_model::{ArgumentSpec, ConfigValue, OptionSpec};
use tracing::{debug, info};

use super::{CliValues, ConfigFile, ResolvedConfig};

/// Merges command-line values, a configuration file and defaults.
///
/// Precedence for each option, highest first:
/// 1. truthy command-line value;
/// 2. file value under the option's name;
/// 3. file value under the option's alternate key;
/// 4. declared default;
/// 5. absent.
///
/// A present-but-false value (`keep_dnf: false`) stops the search: it is
/// never replaced by a lower tier. An explicit falsy command-line value
/// (`--workdir ""`) yields to the file but still beats the default.
#[derive(Debug)]
pub struct ConfigResolver<'a> {
    spec: &'a ArgumentSpec,
    cli: CliValues,
    file: Option<ConfigFile>,
    summary_at_info: bool,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(spec: &'a ArgumentSpec) -> Self {
        Self {
            spec,
            cli: CliValues::default(),
            file: None,
            summary_at_info: false,
        }
    }

    pub fn with_cli(mut self, cli: CliValues) -> Self {
        self.cli = cli;
        self
    }

    pub fn with_file(mut self, file: Option<ConfigFile>) -> Self {
        self.file = file;
        self
    }

    /// Log the merged view at INFO rather than DEBUG.
    pub fn with_summary_at_info(mut self) -> Self {
        self.summary_at_info = true;
        self
    }

    /// Resolve a single option.
    pub fn resolve_option(&self, option: &OptionSpec) -> Option<&ConfigValue> {
        let name = option.name();

        if let Some(value) = self.cli.explicit(name).filter(|v| v.is_truthy()) {
            return Some(value);
        }
        if let Some(file) = &self.file {
            if let Some(value) = file.get(name) {
                return Some(value);
            }
            if let Some(value) = option.kind().alternate_key().and_then(|key| file.get(key)) {
                return Some(value);
            }
        }
        // A falsy explicit value still beats a default.
        self.cli
            .explicit(name)
            .or_else(|| self.cli.default_value(name))
    }

    /// Resolve every declared option and log the merged view once.
    pub fn resolve(&self) -> ResolvedConfig {
        let resolved: ResolvedConfig = self
            .spec
            .iter()
            .filter_map(|option| {
                self.resolve_option(option)
                    .map(|value| (option.name().to_string(), value.clone()))
            })
            .collect();

        let file = self.file.as_ref().and_then(ConfigFile::path);
        if self.summary_at_info {
            info!(?file, config = %resolved, "resolved configuration");
        } else {
            debug!(?file, config = %resolved, "resolved configuration");
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use fsrc_model::OptionKind;
    use tracing::Level;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Everything `resolver.resolve()` logs at INFO and above.
    fn info_output(resolver: &ConfigResolver<'_>) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            resolver.resolve();
        });
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn spec() -> ArgumentSpec {
        ArgumentSpec::new()
            .with(OptionSpec::value("job", "--job"))
            .with(OptionSpec::value("workdir", "--workdir"))
            .with(OptionSpec::new(
                "task",
                "--task",
                OptionKind::Value {
                    alternate_key: Some("tasks".into()),
                },
            ))
            .with(OptionSpec::toggle("keep_dnf", "--keep-dnf"))
            .with(OptionSpec::toggle("with_ceph", "--with-ceph"))
    }

    fn file(text: &str) -> Option<ConfigFile> {
        Some(ConfigFile::parse(text, "test.yaml").unwrap())
    }

    #[test]
    fn truthy_cli_beats_file_beats_default() {
        let spec = spec();
        let cli = CliValues::new()
            .with_explicit("job", "from-cli")
            .with_default("workdir", "/srv/build/work")
            .with_default("job", "from-default");

        let resolved = ConfigResolver::new(&spec)
            .with_cli(cli)
            .with_file(file("job: from-file\nworkdir: /out\n"))
            .resolve();

        assert_eq!(resolved.text("job"), Some("from-cli"));
        assert_eq!(resolved.text("workdir"), Some("/out"));
    }

    #[test]
    fn defaults_apply_only_when_nothing_else_does() {
        let spec = spec();
        let cli = CliValues::new().with_default("workdir", "/srv/build/work");

        let resolved = ConfigResolver::new(&spec).with_cli(cli).resolve();
        assert_eq!(resolved.text("workdir"), Some("/srv/build/work"));
        assert!(!resolved.contains("job"));
    }

    #[test]
    fn primary_key_beats_alternate_key() {
        let spec = spec();
        let resolver = ConfigResolver::new(&spec).with_file(file("tasks: [packages]\n"));
        assert_eq!(resolver.resolve().list("task"), ["packages"]);

        let resolver = ConfigResolver::new(&spec)
            .with_file(file("task: [image]\ntasks: [packages]\n"));
        assert_eq!(resolver.resolve().list("task"), ["image"]);
    }

    #[test]
    fn present_but_false_toggle_is_kept() {
        let spec = spec();
        let resolved = ConfigResolver::new(&spec)
            .with_cli(CliValues::new().with_explicit("with_ceph", false))
            .with_file(file("keep_dnf: false\n"))
            .resolve();

        assert_eq!(resolved.get("keep_dnf"), Some(&ConfigValue::Toggle(false)));
        assert_eq!(resolved.get("with_ceph"), Some(&ConfigValue::Toggle(false)));
    }

    #[test]
    fn falsy_cli_value_yields_to_file() {
        let spec = spec();
        let resolved = ConfigResolver::new(&spec)
            .with_cli(CliValues::new().with_explicit("keep_dnf", false))
            .with_file(file("keep_dnf: true\n"))
            .resolve();
        assert!(resolved.toggle("keep_dnf"));
    }

    #[test]
    fn falsy_cli_value_beats_default() {
        let spec = spec();
        let cli = CliValues::new()
            .with_explicit("workdir", "")
            .with_default("workdir", "/srv/build/work");

        let resolved = ConfigResolver::new(&spec).with_cli(cli).resolve();
        assert_eq!(resolved.get("workdir"), Some(&ConfigValue::from("")));
        assert_eq!(resolved.text("workdir"), None);
    }

    #[test]
    fn merged_view_is_logged_at_debug_by_default() {
        let spec = spec();
        let cli = CliValues::new().with_explicit("job", "c9s");

        let quiet = ConfigResolver::new(&spec).with_cli(cli.clone());
        assert!(!info_output(&quiet).contains("resolved configuration"));

        let loud = ConfigResolver::new(&spec)
            .with_cli(cli)
            .with_summary_at_info();
        let out = info_output(&loud);
        assert!(out.contains("resolved configuration"), "{out}");
        assert!(out.contains(r#"job="c9s""#), "{out}");
    }

    #[test]
    fn keys_outside_the_spec_are_ignored() {
        let spec = spec();
        let resolved = ConfigResolver::new(&spec)
            .with_file(file("unknown_key: 1\njob: c9\n"))
            .resolve();
        assert_eq!(resolved.len(), 1);
        assert!(!resolved.contains("unknown_key"));
    }
}
