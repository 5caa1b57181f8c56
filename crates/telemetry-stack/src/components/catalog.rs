//! Catalog database and the crawler that keeps its tables current.

use telemetry_core::Configuration;

use crate::components::storage::DATA_ROOT;
use crate::error::StackError;
use crate::model::glue::{
    CRAWLER_GROUPING_CONFIGURATION, CatalogDatabase, Crawler, RecrawlBehavior, RecrawlPolicy,
    S3Target, SchemaChangePolicy,
};
use crate::model::{Expr, ResourceAddress};
use crate::stack::Stack;

#[derive(Debug, Clone)]
pub struct Catalog {
    pub database: ResourceAddress,
    pub crawler: ResourceAddress,
}

pub fn declare(
    config: &Configuration,
    stack: &mut Stack,
    bucket: &ResourceAddress,
    role: &ResourceAddress,
) -> Result<Catalog, StackError> {
    let database = stack.declare(
        "telemetry",
        CatalogDatabase {
            name: config.catalog_database_name(),
            tags: config.common_tags.clone(),
        },
    )?;

    let crawler = stack.declare(
        "telemetry",
        Crawler {
            name: config.prefixed("telemetry"),
            database_name: database.attr("name").into(),
            role: role.attr("arn").into(),
            schedule: config.glue_crawler_schedule.clone(),
            s3_target: vec![S3Target {
                path: Expr::literal("s3://")
                    .attr(&bucket.attr("id"))
                    .text(format!("/{DATA_ROOT}/")),
            }],
            schema_change_policy: SchemaChangePolicy::log_only(),
            recrawl_policy: RecrawlPolicy {
                recrawl_behavior: RecrawlBehavior::CrawlNewFoldersOnly,
            },
            configuration: CRAWLER_GROUPING_CONFIGURATION.to_string(),
            tags: config.common_tags.clone(),
        },
    )?;

    Ok(Catalog { database, crawler })
}
