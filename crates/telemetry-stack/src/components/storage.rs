//! Data and query-result buckets.

use telemetry_core::Configuration;

use crate::error::StackError;
use crate::model::s3::{
    Bucket, BucketEncryption, BucketLifecycle, BucketVersioning, Expiration, LifecycleFilter,
    LifecycleRule, PublicAccessBlock, Status, StorageClass, Transition, VersioningConfiguration,
};
use crate::model::{AttrRef, ResourceAddress};
use crate::stack::Stack;

/// Leading key segment of delivered records.
pub const DATA_ROOT: &str = "data";
/// Key prefix query results are written under.
pub const RESULTS_PREFIX: &str = "results/";
pub const RESULTS_RETENTION_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct Buckets {
    pub telemetry: ResourceAddress,
    pub results: ResourceAddress,
}

impl Buckets {
    pub fn telemetry_arn(&self) -> AttrRef {
        self.telemetry.attr("arn")
    }

    pub fn telemetry_id(&self) -> AttrRef {
        self.telemetry.attr("id")
    }

    pub fn results_id(&self) -> AttrRef {
        self.results.attr("id")
    }
}

pub fn declare(config: &Configuration, stack: &mut Stack) -> Result<Buckets, StackError> {
    let telemetry = declare_bucket(config, stack, "telemetry", "telemetry")?;
    let id = telemetry.attr("id");
    stack.declare(
        "telemetry",
        BucketVersioning {
            bucket: (&id).into(),
            versioning_configuration: VersioningConfiguration {
                status: Status::Enabled,
            },
        },
    )?;
    stack.declare("telemetry", BucketEncryption::kms(&id))?;
    stack.declare("telemetry", PublicAccessBlock::locked(&id))?;
    stack.declare(
        "telemetry",
        BucketLifecycle {
            bucket: (&id).into(),
            rule: vec![LifecycleRule {
                id: "telemetry-lifecycle".to_string(),
                status: Status::Enabled,
                filter: LifecycleFilter {
                    prefix: format!("{DATA_ROOT}/"),
                },
                transition: vec![Transition {
                    days: config.s3_lifecycle_ia_days,
                    storage_class: StorageClass::StandardIa,
                }],
                expiration: Some(Expiration {
                    days: config.s3_lifecycle_expiration_days,
                }),
            }],
        },
    )?;

    let results = declare_bucket(config, stack, "athena_results", "athena-results")?;
    let id = results.attr("id");
    stack.declare("athena_results", BucketEncryption::kms(&id))?;
    stack.declare("athena_results", PublicAccessBlock::locked(&id))?;
    stack.declare(
        "athena_results",
        BucketLifecycle {
            bucket: (&id).into(),
            rule: vec![LifecycleRule {
                id: "expire-query-results".to_string(),
                status: Status::Enabled,
                filter: LifecycleFilter {
                    prefix: String::new(),
                },
                transition: Vec::new(),
                expiration: Some(Expiration {
                    days: RESULTS_RETENTION_DAYS,
                }),
            }],
        },
    )?;

    Ok(Buckets { telemetry, results })
}

fn declare_bucket(
    config: &Configuration,
    stack: &mut Stack,
    logical: &str,
    suffix: &str,
) -> Result<ResourceAddress, StackError> {
    stack.declare(
        logical,
        Bucket {
            bucket: config.prefixed(suffix),
            tags: config.common_tags.clone(),
        },
    )
}
