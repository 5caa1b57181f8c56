//! Environment variable interpolation for stack config files.
//!
//! Lets one config file serve several environments, e.g.
//! `environment: ${STACK_ENV:-dev}`.
//!
//! Supported syntax:
//! - `$VAR` or `${VAR}` - substitute with env var value, error if missing
//! - `${VAR:-default}` - use default if VAR is unset OR empty
//! - `${VAR-default}` - use default only if VAR is unset (empty is OK)
//! - `$$` - escape sequence for literal `$`

use regex::{Captures, Regex};
use std::env;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \$\$                           # escaped dollar
        |
        \$\{
            ([A-Za-z_][A-Za-z0-9_]*)   # 1: braced name
            (?:
                (:?-)                  # 2: default operator
                ([^}]*)                # 3: default value
            )?
        \}
        |
        \$([A-Za-z_][A-Za-z0-9_]*)     # 4: bare name
        ",
    )
    .expect("interpolation pattern is valid")
});

/// Result of environment variable interpolation.
#[derive(Debug)]
pub struct InterpolationResult {
    /// The interpolated text.
    pub text: String,
    /// Every problem found, so all missing variables are reported at once.
    pub errors: Vec<String>,
}

impl InterpolationResult {
    /// Returns true if there were no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Interpolate environment variables in the given text.
pub fn interpolate(input: &str) -> InterpolationResult {
    let mut errors = Vec::new();

    let text = ENV_VAR_PATTERN
        .replace_all(input, |caps: &Captures| substitute(caps, &mut errors))
        .into_owned();

    InterpolationResult { text, errors }
}

fn substitute(caps: &Captures, errors: &mut Vec<String>) -> String {
    let matched = caps.get(0).map_or("", |m| m.as_str());
    if matched == "$$" {
        return "$".to_string();
    }

    let Some(name) = caps.get(1).or_else(|| caps.get(4)).map(|m| m.as_str()) else {
        return matched.to_string();
    };
    let operator = caps.get(2).map(|m| m.as_str());
    let default = caps.get(3).map(|m| m.as_str());

    match env::var(name) {
        Ok(value) if value.contains('\n') || value.contains('\r') => {
            errors.push(format!(
                "environment variable '{name}' contains newlines, which is not allowed"
            ));
            matched.to_string()
        }
        Ok(value) if value.is_empty() && operator == Some(":-") => {
            default.unwrap_or_default().to_string()
        }
        Ok(value) => value,
        Err(_) => match default {
            Some(default) => default.to_string(),
            None => {
                errors.push(format!("environment variable '{name}' is not set"));
                matched.to_string()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let originals: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var(k).ok())).collect();

        // SAFETY: each test uses its own variable names and restores them afterwards
        for (key, value) in vars {
            match value {
                Some(v) => unsafe { env::set_var(key, v) },
                None => unsafe { env::remove_var(key) },
            }
        }

        let result = f();

        // SAFETY: restoring original environment state
        for (key, original) in originals {
            match original {
                Some(v) => unsafe { env::set_var(key, v) },
                None => unsafe { env::remove_var(key) },
            }
        }

        result
    }

    #[test]
    fn test_bare_and_braced_substitution() {
        with_env_vars(&[("TELEMETRY_TEST_PROJECT", Some("acme"))], || {
            let result =
                interpolate("project_name: $TELEMETRY_TEST_PROJECT\nalias: ${TELEMETRY_TEST_PROJECT}");
            assert!(result.is_ok());
            assert_eq!(result.text, "project_name: acme\nalias: acme");
        });
    }

    #[test]
    fn test_missing_variables_are_all_reported() {
        with_env_vars(
            &[("TELEMETRY_TEST_MISSING_A", None), ("TELEMETRY_TEST_MISSING_B", None)],
            || {
                let result = interpolate("a: $TELEMETRY_TEST_MISSING_A\nb: ${TELEMETRY_TEST_MISSING_B}");
                assert_eq!(result.errors.len(), 2);
                assert!(result.errors[0].contains("TELEMETRY_TEST_MISSING_A"));
                assert!(result.errors[1].contains("not set"));
            },
        );
    }

    #[test]
    fn test_colon_default_applies_to_empty_value() {
        with_env_vars(&[("TELEMETRY_TEST_EMPTY_ENV", Some(""))], || {
            let result = interpolate("environment: ${TELEMETRY_TEST_EMPTY_ENV:-dev}");
            assert!(result.is_ok());
            assert_eq!(result.text, "environment: dev");
        });
    }

    #[test]
    fn test_dash_default_keeps_empty_value() {
        with_env_vars(&[("TELEMETRY_TEST_EMPTY_KEEP", Some(""))], || {
            let result = interpolate("environment: '${TELEMETRY_TEST_EMPTY_KEEP-dev}'");
            assert!(result.is_ok());
            assert_eq!(result.text, "environment: ''");
        });
    }

    #[test]
    fn test_default_used_when_unset() {
        with_env_vars(&[("TELEMETRY_TEST_UNSET_REGION", None)], || {
            let result = interpolate("region: ${TELEMETRY_TEST_UNSET_REGION-eu-west-1}");
            assert!(result.is_ok());
            assert_eq!(result.text, "region: eu-west-1");
        });
    }

    #[test]
    fn test_newline_in_value_is_rejected() {
        with_env_vars(&[("TELEMETRY_TEST_NEWLINE", Some("a\nb"))], || {
            let result = interpolate("project_name: $TELEMETRY_TEST_NEWLINE");
            assert!(!result.is_ok());
            assert!(result.errors[0].contains("newlines"));
        });
    }

    #[test]
    fn test_escaped_dollar() {
        let result = interpolate("note: costs $$5");
        assert!(result.is_ok());
        assert_eq!(result.text, "note: costs $5");
    }
}
