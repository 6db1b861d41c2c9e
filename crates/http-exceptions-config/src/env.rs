use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::ConfigError;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `${NAME}` or `${NAME:-fallback}`
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("must be valid regex"))
}

/// Substitute `${VAR}` placeholders with values from the environment
///
/// `${VAR:-fallback}` uses `fallback` when `VAR` is unset. TOML comment
/// lines are copied verbatim so commented-out settings never need their
/// variables defined.
pub fn expand_env(input: &str) -> Result<String, ConfigError> {
    let mut lines = Vec::new();

    for line in input.split('\n') {
        if line.trim_start().starts_with('#') || !line.contains("${") {
            lines.push(line.to_owned());
            continue;
        }

        let mut missing = None;
        let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
            let name = &caps[1];
            match (std::env::var(name), caps.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(fallback)) => fallback.as_str().to_owned(),
                (Err(_), None) => {
                    missing.get_or_insert_with(|| name.to_owned());
                    String::new()
                }
            }
        });

        if let Some(name) = missing {
            return Err(ConfigError::MissingVariable(name));
        }

        lines.push(expanded.into_owned());
    }

    Ok(lines.join("\n"))
}
