//! Catalog database and schema-discovery crawler.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::expr::{escaped, escaped_tags};
use crate::model::{AttrRef, Declaration, Expr, ResourceKind, Tags};

/// Combine partitions with compatible schemas into one table.
pub const CRAWLER_GROUPING_CONFIGURATION: &str =
    r#"{"Version":1.0,"Grouping":{"TableGroupingPolicy":"CombineCompatibleSchemas"}}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDatabase {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for CatalogDatabase {
    const KIND: ResourceKind = ResourceKind::GlueCatalogDatabase;

    fn references(&self) -> Vec<&AttrRef> {
        Vec::new()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("glue_database", &self.name)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaChangeBehavior {
    Log,
    UpdateInDatabase,
    DeleteFromDatabase,
    DeprecateInDatabase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaChangePolicy {
    pub delete_behavior: SchemaChangeBehavior,
    pub update_behavior: SchemaChangeBehavior,
}

impl SchemaChangePolicy {
    /// Record divergence in the crawler log; never drop columns.
    pub fn log_only() -> Self {
        Self {
            delete_behavior: SchemaChangeBehavior::Log,
            update_behavior: SchemaChangeBehavior::Log,
        }
    }

    pub fn is_log_only(&self) -> bool {
        *self == Self::log_only()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecrawlBehavior {
    CrawlEverything,
    CrawlNewFoldersOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecrawlPolicy {
    pub recrawl_behavior: RecrawlBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct S3Target {
    pub path: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crawler {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub database_name: Expr,
    pub role: Expr,
    #[serde(serialize_with = "escaped")]
    pub schedule: String,
    pub s3_target: Vec<S3Target>,
    pub schema_change_policy: SchemaChangePolicy,
    pub recrawl_policy: RecrawlPolicy,
    pub configuration: String,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Crawler {
    /// Incremental crawls cannot apply schema changes to the catalog.
    pub fn has_consistent_policies(&self) -> bool {
        self.recrawl_policy.recrawl_behavior != RecrawlBehavior::CrawlNewFoldersOnly
            || self.schema_change_policy.is_log_only()
    }
}

impl Declaration for Crawler {
    const KIND: ResourceKind = ResourceKind::GlueCrawler;

    fn references(&self) -> Vec<&AttrRef> {
        [&self.database_name, &self.role]
            .into_iter()
            .chain(self.s3_target.iter().map(|t| &t.path))
            .flat_map(Expr::refs)
            .collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("glue_crawler", &self.name)]
    }
}
