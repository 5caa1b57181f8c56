//! Analytics application and its event stream subscription.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::expr::{escaped, escaped_tags};
use crate::model::{AttrRef, Declaration, Expr, ResourceKind, Tags, owner_of};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsApp {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for AnalyticsApp {
    const KIND: ResourceKind = ResourceKind::PinpointApp;

    fn references(&self) -> Vec<&AttrRef> {
        Vec::new()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("pinpoint_app", &self.name)]
    }
}

/// Forwards every captured event, unfiltered, to one delivery stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventStream {
    pub application_id: Expr,
    pub destination_stream_arn: Expr,
    pub role_arn: Expr,
}

impl Declaration for EventStream {
    const KIND: ResourceKind = ResourceKind::PinpointEventStream;

    fn references(&self) -> Vec<&AttrRef> {
        [&self.application_id, &self.destination_stream_arn, &self.role_arn]
            .into_iter()
            .flat_map(Expr::refs)
            .collect()
    }

    /// An application has exactly one event stream.
    fn claims(&self) -> Vec<Claim> {
        vec![Claim::attached("event stream", &owner_of(&self.application_id))]
    }
}
