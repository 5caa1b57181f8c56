//! Analytics application and the subscription forwarding its events.

use telemetry_core::Configuration;

use crate::error::StackError;
use crate::model::ResourceAddress;
use crate::model::pinpoint::{AnalyticsApp, EventStream};
use crate::stack::Stack;

pub fn declare(
    config: &Configuration,
    stack: &mut Stack,
    stream: &ResourceAddress,
    role: &ResourceAddress,
) -> Result<ResourceAddress, StackError> {
    let app = stack.declare(
        "telemetry",
        AnalyticsApp {
            name: config.prefixed("telemetry"),
            tags: config.common_tags.clone(),
        },
    )?;

    stack.declare(
        "telemetry",
        EventStream {
            application_id: app.attr("application_id").into(),
            destination_stream_arn: stream.attr("arn").into(),
            role_arn: role.attr("arn").into(),
        },
    )?;

    Ok(app)
}
