//! Stack synthesis: every component, in dependency order.

use telemetry_core::Configuration;
use tracing::info;

use crate::components::{catalog, delivery, event_source, iam, query, storage};
use crate::error::StackError;
use crate::model::ResourceKind;
use crate::stack::Stack;

/// Declare the whole pipeline for one configuration.
///
/// Roles are declared right after the resource their policy grants on, so
/// every permission statement names a resource declared before it.
pub fn synthesize(config: &Configuration) -> Result<Stack, StackError> {
    let mut stack = Stack::new();
    let account = stack.data_source(ResourceKind::CallerIdentity, "current")?;
    let account_id = account.attr("account_id");

    let buckets = storage::declare(config, &mut stack)?;

    let firehose_role = iam::firehose_s3_role(config, &mut stack, &account_id, &buckets.telemetry)?;
    let stream = delivery::declare(config, &mut stack, &buckets.telemetry, &firehose_role)?;

    let pinpoint_role = iam::pinpoint_firehose_role(config, &mut stack, &account_id, &stream)?;
    let app = event_source::declare(config, &mut stack, &stream, &pinpoint_role)?;

    let crawler_role = iam::glue_crawler_role(config, &mut stack, &buckets.telemetry)?;
    let catalog = catalog::declare(config, &mut stack, &buckets.telemetry, &crawler_role)?;

    let workgroup = query::declare(config, &mut stack, &buckets.results, &catalog.database)?;

    stack.export("pinpoint_application_id", app.attr("application_id"))?;
    stack.export("telemetry_bucket_name", buckets.telemetry_id())?;
    stack.export("telemetry_bucket_arn", buckets.telemetry_arn())?;
    stack.export("athena_results_bucket_name", buckets.results_id())?;
    stack.export("firehose_delivery_stream_arn", stream.attr("arn"))?;
    stack.export("glue_database_name", catalog.database.attr("name"))?;
    stack.export("athena_workgroup_name", workgroup.attr("name"))?;

    info!("Declared {} resource(s) for {}", stack.len(), config.name_prefix);

    Ok(stack)
}
