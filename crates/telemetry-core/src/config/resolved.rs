//! The resolved deployment parameters every component reads.

use indexmap::IndexMap;
use serde::Serialize;

/// Value of the `ManagedBy` tag on every taggable resource.
pub const MANAGED_BY: &str = "terraform";

/// Fully resolved stack configuration.
///
/// Built once by [`StackInput::resolve`](crate::config::StackInput::resolve)
/// and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub project_name: String,
    pub environment: String,
    pub region: String,
    /// `{project_name}-{environment}`, the namespace of every resource name.
    pub name_prefix: String,
    pub firehose_buffer_size_mb: u32,
    pub firehose_buffer_interval_seconds: u32,
    pub s3_lifecycle_ia_days: u32,
    pub s3_lifecycle_expiration_days: u32,
    pub glue_crawler_schedule: String,
    pub common_tags: IndexMap<String, String>,
}

impl Configuration {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        project_name: &str,
        environment: &str,
        region: &str,
        firehose_buffer_size_mb: u32,
        firehose_buffer_interval_seconds: u32,
        s3_lifecycle_ia_days: u32,
        s3_lifecycle_expiration_days: u32,
        glue_crawler_schedule: &str,
    ) -> Self {
        let common_tags = IndexMap::from([
            ("Project".to_string(), project_name.to_string()),
            ("Environment".to_string(), environment.to_string()),
            ("ManagedBy".to_string(), MANAGED_BY.to_string()),
        ]);

        Self {
            project_name: project_name.to_string(),
            environment: environment.to_string(),
            region: region.to_string(),
            name_prefix: format!("{project_name}-{environment}"),
            firehose_buffer_size_mb,
            firehose_buffer_interval_seconds,
            s3_lifecycle_ia_days,
            s3_lifecycle_expiration_days,
            glue_crawler_schedule: glue_crawler_schedule.to_string(),
            common_tags,
        }
    }

    /// Prefix a resource name: `prefixed("telemetry")` is `{prefix}-telemetry`.
    pub fn prefixed(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.name_prefix)
    }

    /// Catalog database name. Catalog identifiers do not allow `-`.
    pub fn catalog_database_name(&self) -> String {
        format!("{}_telemetry", self.name_prefix.replace('-', "_"))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StackInput;

    fn resolve(yaml: &str) -> super::Configuration {
        StackInput::parse_yaml(yaml).unwrap().resolve().unwrap()
    }

    #[test]
    fn test_name_prefix() {
        let config = resolve("project_name: acme\nenvironment: prod");
        assert_eq!(config.name_prefix, "acme-prod");
        assert_eq!(config.prefixed("telemetry"), "acme-prod-telemetry");
    }

    #[test]
    fn test_catalog_database_name_normalizes_separators() {
        let config = resolve("project_name: ios-app\nenvironment: stage-2");
        assert_eq!(config.catalog_database_name(), "ios_app_stage_2_telemetry");
    }

    #[test]
    fn test_common_tags_order() {
        let config = resolve("project_name: acme");
        let keys: Vec<_> = config.common_tags.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Project", "Environment", "ManagedBy"]);
        assert_eq!(config.common_tags["Environment"], "dev");
    }
}
