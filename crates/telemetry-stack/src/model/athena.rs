//! Query workgroup and saved queries.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::expr::{escaped, escaped_tags};
use crate::model::{AttrRef, Declaration, Expr, ResourceKind, Tags};

/// 1 GiB.
pub const BYTES_SCANNED_CUTOFF: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultEncryption {
    SseS3,
    SseKms,
    CseKms,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionConfiguration {
    pub encryption_option: ResultEncryption,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultConfiguration {
    pub output_location: Expr,
    pub encryption_configuration: EncryptionConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkgroupConfiguration {
    /// Clients cannot override these settings per query.
    pub enforce_workgroup_configuration: bool,
    pub publish_cloudwatch_metrics_enabled: bool,
    pub bytes_scanned_cutoff_per_query: u64,
    pub result_configuration: ResultConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workgroup {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub configuration: WorkgroupConfiguration,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for Workgroup {
    const KIND: ResourceKind = ResourceKind::AthenaWorkgroup;

    fn references(&self) -> Vec<&AttrRef> {
        self.configuration
            .result_configuration
            .output_location
            .refs()
            .collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("athena_workgroup", &self.name)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedQuery {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub workgroup: Expr,
    pub database: Expr,
    #[serde(serialize_with = "escaped")]
    pub query: String,
}

impl Declaration for NamedQuery {
    const KIND: ResourceKind = ResourceKind::AthenaNamedQuery;

    fn references(&self) -> Vec<&AttrRef> {
        [&self.workgroup, &self.database]
            .into_iter()
            .flat_map(Expr::refs)
            .collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("athena_named_query", &self.name)]
    }
}
