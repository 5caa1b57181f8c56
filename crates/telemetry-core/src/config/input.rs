//! Raw stack input as written in YAML files.

use serde::{Deserialize, Serialize};

use crate::config::{
    Configuration, DEFAULT_BUFFER_INTERVAL_SECONDS, DEFAULT_BUFFER_SIZE_MB,
    DEFAULT_CRAWLER_SCHEDULE, DEFAULT_ENVIRONMENT, DEFAULT_EXPIRATION_DAYS, DEFAULT_IA_DAYS,
    DEFAULT_REGION,
};
use crate::error::ConfigError;

/// Stack input before defaults are applied.
///
/// Every key is optional here so that several files can be layered; only
/// [`StackInput::resolve`] decides what is required.
///
/// ```
/// use telemetry_core::config::StackInput;
///
/// let input = StackInput::parse_yaml("project_name: acme\nenvironment: prod\n").unwrap();
/// let config = input.resolve().unwrap();
/// assert_eq!(config.name_prefix, "acme-prod");
/// assert_eq!(config.region, "us-east-1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackInput {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub firehose_buffer_size_mb: Option<u32>,
    #[serde(default)]
    pub firehose_buffer_interval_seconds: Option<u32>,
    #[serde(default)]
    pub s3_lifecycle_ia_days: Option<u32>,
    #[serde(default)]
    pub s3_lifecycle_expiration_days: Option<u32>,
    #[serde(default)]
    pub glue_crawler_schedule: Option<String>,
}

impl StackInput {
    /// Parse a single YAML document. An empty document is an empty input.
    pub fn parse_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents).map_err(|source| ConfigError::YamlParse { source })
    }

    /// Merge values from a later source (last-write-wins per key).
    pub fn merge_from(&mut self, other: Self) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.project_name, other.project_name);
        take(&mut self.environment, other.environment);
        take(&mut self.region, other.region);
        take(&mut self.firehose_buffer_size_mb, other.firehose_buffer_size_mb);
        take(
            &mut self.firehose_buffer_interval_seconds,
            other.firehose_buffer_interval_seconds,
        );
        take(&mut self.s3_lifecycle_ia_days, other.s3_lifecycle_ia_days);
        take(
            &mut self.s3_lifecycle_expiration_days,
            other.s3_lifecycle_expiration_days,
        );
        take(&mut self.glue_crawler_schedule, other.glue_crawler_schedule);
    }

    /// Apply defaults and check the input.
    ///
    /// Blank strings and zero integers count as unset.
    pub fn resolve(&self) -> Result<Configuration, ConfigError> {
        let project_name = non_blank(&self.project_name).ok_or(ConfigError::MissingProjectName)?;
        let environment = non_blank(&self.environment).unwrap_or(DEFAULT_ENVIRONMENT);
        let region = non_blank(&self.region).unwrap_or(DEFAULT_REGION);

        let ia_days = non_zero(self.s3_lifecycle_ia_days).unwrap_or(DEFAULT_IA_DAYS);
        let expiration_days =
            non_zero(self.s3_lifecycle_expiration_days).unwrap_or(DEFAULT_EXPIRATION_DAYS);
        if ia_days >= expiration_days {
            return Err(ConfigError::LifecycleOrder {
                ia_days,
                expiration_days,
            });
        }

        Ok(Configuration::new(
            project_name,
            environment,
            region,
            non_zero(self.firehose_buffer_size_mb).unwrap_or(DEFAULT_BUFFER_SIZE_MB),
            non_zero(self.firehose_buffer_interval_seconds)
                .unwrap_or(DEFAULT_BUFFER_INTERVAL_SECONDS),
            ia_days,
            expiration_days,
            non_blank(&self.glue_crawler_schedule).unwrap_or(DEFAULT_CRAWLER_SCHEDULE),
        ))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(project: &str) -> StackInput {
        StackInput {
            project_name: Some(project.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = input("acme").resolve().unwrap();

        assert_eq!(config.environment, "dev");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.name_prefix, "acme-dev");
        assert_eq!(config.firehose_buffer_size_mb, 5);
        assert_eq!(config.firehose_buffer_interval_seconds, 300);
        assert_eq!(config.s3_lifecycle_ia_days, 30);
        assert_eq!(config.s3_lifecycle_expiration_days, 90);
        assert_eq!(config.glue_crawler_schedule, "cron(0 */6 * * ? *)");
    }

    #[test]
    fn test_missing_project_name() {
        let err = StackInput::default().resolve().unwrap_err();
        assert!(matches!(err, ConfigError::MissingProjectName));
    }

    #[test]
    fn test_blank_project_name_is_missing() {
        let err = input("   ").resolve().unwrap_err();
        assert!(matches!(err, ConfigError::MissingProjectName));
    }

    #[test]
    fn test_zero_overrides_fall_back_to_defaults() {
        let mut raw = input("acme");
        raw.firehose_buffer_size_mb = Some(0);
        raw.s3_lifecycle_ia_days = Some(0);

        let config = raw.resolve().unwrap();
        assert_eq!(config.firehose_buffer_size_mb, 5);
        assert_eq!(config.s3_lifecycle_ia_days, 30);
    }

    #[test]
    fn test_lifecycle_order_rejected() {
        let mut raw = input("acme");
        raw.s3_lifecycle_ia_days = Some(90);
        raw.s3_lifecycle_expiration_days = Some(90);

        let err = raw.resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::LifecycleOrder {
                ia_days: 90,
                expiration_days: 90
            }
        ));
    }

    #[test]
    fn test_lifecycle_order_checked_against_default_expiration() {
        let mut raw = input("acme");
        raw.s3_lifecycle_ia_days = Some(120);
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn test_merge_last_write_wins() {
        let mut base = StackInput::parse_yaml(
            "project_name: acme\nenvironment: dev\nfirehose_buffer_size_mb: 10\n",
        )
        .unwrap();
        let overlay = StackInput::parse_yaml("environment: prod\nregion: eu-west-1\n").unwrap();

        base.merge_from(overlay);

        assert_eq!(base.project_name.as_deref(), Some("acme"));
        assert_eq!(base.environment.as_deref(), Some("prod"));
        assert_eq!(base.region.as_deref(), Some("eu-west-1"));
        assert_eq!(base.firehose_buffer_size_mb, Some(10));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = StackInput::parse_yaml("project_name: acme\nbucket_count: 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::YamlParse { .. }));
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(StackInput::parse_yaml("").unwrap(), StackInput::default());
    }
}
