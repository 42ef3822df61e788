//! Translation of a resolved configuration into the agent's command line.
use fsrc_model::{ArgumentSpec, ConfigValue, OptionKind};
use tracing::trace;

use crate::config::OptionValues;

/// Build the argument vector understood by the owner of `spec`.
///
/// Walks `spec` in declaration order:
/// - a toggle emits its flag iff the value is truthy;
/// - a value option emits `flag value` iff the value is truthy; a list emits
///   one `flag value` pair per element.
///
/// Options missing from `values` and falsy values emit nothing. The result
/// depends only on the two inputs.
pub fn forward_arguments<V>(spec: &ArgumentSpec, values: &V) -> Vec<String>
where
    V: OptionValues + ?Sized,
{
    let mut out = Vec::new();
    for option in spec.iter() {
        let Some(value) = values.value(option.name()).filter(|v| v.is_truthy()) else {
            continue;
        };
        match (option.kind(), value) {
            (OptionKind::Toggle, value) => {
                if value.as_toggle().unwrap_or(true) {
                    out.push(option.flag().to_string());
                }
            }
            (OptionKind::Value { .. }, ConfigValue::List(items)) => {
                for item in items.iter().filter(|i| !i.is_empty()) {
                    out.push(option.flag().to_string());
                    out.push(item.clone());
                }
            }
            (OptionKind::Value { .. }, value) => {
                out.push(option.flag().to_string());
                out.push(match value {
                    ConfigValue::Text(s) => s.clone(),
                    other => other.to_list().join(","),
                });
            }
        }
    }
    trace!(args = ?out, "forwarded arguments");
    out
}
