//! Delivery stream descriptor.

use serde::Serialize;
use telemetry_core::{Claim, PrefixTemplate};

use crate::model::expr::{escaped, escaped_tags};
use crate::model::{AttrRef, Declaration, Expr, ResourceKind, Tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    ExtendedS3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompressionFormat {
    Uncompressed,
    Gzip,
    Snappy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingOptions {
    pub enabled: bool,
    pub log_group_name: Expr,
    pub log_stream_name: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedS3Configuration {
    pub role_arn: Expr,
    pub bucket_arn: Expr,
    /// Delivery-service expression of `partitioning`.
    pub prefix: String,
    pub error_output_prefix: String,
    /// Megabytes.
    pub buffering_size: u32,
    /// Seconds.
    pub buffering_interval: u32,
    pub compression_format: CompressionFormat,
    pub cloudwatch_logging_options: LoggingOptions,
    /// Template `prefix` was generated from; not part of the document.
    #[serde(skip)]
    pub partitioning: PrefixTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryStream {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub destination: Destination,
    pub extended_s3_configuration: ExtendedS3Configuration,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for DeliveryStream {
    const KIND: ResourceKind = ResourceKind::FirehoseDeliveryStream;

    fn references(&self) -> Vec<&AttrRef> {
        let s3 = &self.extended_s3_configuration;
        [
            &s3.role_arn,
            &s3.bucket_arn,
            &s3.cloudwatch_logging_options.log_group_name,
            &s3.cloudwatch_logging_options.log_stream_name,
        ]
        .into_iter()
        .flat_map(Expr::refs)
        .collect()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("firehose_delivery_stream", &self.name)]
    }
}
