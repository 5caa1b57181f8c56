//! Delivery stream from producers to the data bucket.

use telemetry_core::{Configuration, PrefixTemplate};
use tracing::debug;

use crate::components::storage::DATA_ROOT;
use crate::error::StackError;
use crate::model::firehose::{
    CompressionFormat, DeliveryStream, Destination, ExtendedS3Configuration, LoggingOptions,
};
use crate::model::logs::{LogGroup, LogStream};
use crate::model::ResourceAddress;
use crate::stack::Stack;

pub const LOG_RETENTION_DAYS: u32 = 14;
pub const LOG_STREAM_NAME: &str = "S3Delivery";

pub fn declare(
    config: &Configuration,
    stack: &mut Stack,
    bucket: &ResourceAddress,
    role: &ResourceAddress,
) -> Result<ResourceAddress, StackError> {
    let log_group = stack.declare(
        "firehose",
        LogGroup {
            name: format!("/aws/kinesisfirehose/{}", config.prefixed("telemetry")),
            retention_in_days: LOG_RETENTION_DAYS,
            tags: config.common_tags.clone(),
        },
    )?;
    let log_stream = stack.declare(
        "firehose",
        LogStream {
            name: LOG_STREAM_NAME.to_string(),
            log_group_name: log_group.attr("name").into(),
        },
    )?;

    let partitioning = PrefixTemplate::daily(DATA_ROOT);
    debug!(template = partitioning.as_str(), "Delivery prefix");

    stack.declare(
        "telemetry",
        DeliveryStream {
            name: config.prefixed("telemetry"),
            destination: Destination::ExtendedS3,
            extended_s3_configuration: ExtendedS3Configuration {
                role_arn: role.attr("arn").into(),
                bucket_arn: bucket.attr("arn").into(),
                prefix: partitioning.to_firehose_expression(),
                error_output_prefix: partitioning.to_error_firehose_expression(),
                buffering_size: config.firehose_buffer_size_mb,
                buffering_interval: config.firehose_buffer_interval_seconds,
                compression_format: CompressionFormat::Gzip,
                cloudwatch_logging_options: LoggingOptions {
                    enabled: true,
                    log_group_name: log_group.attr("name").into(),
                    log_stream_name: log_stream.attr("name").into(),
                },
                partitioning,
            },
            tags: config.common_tags.clone(),
        },
    )
}
