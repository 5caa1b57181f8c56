//! Log group and stream for delivery diagnostics.

use serde::Serialize;
use telemetry_core::Claim;

use crate::model::expr::{escaped, escaped_tags};
use crate::model::{AttrRef, Declaration, Expr, ResourceKind, Tags, owner_of};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogGroup {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub retention_in_days: u32,
    #[serde(serialize_with = "escaped_tags")]
    pub tags: Tags,
}

impl Declaration for LogGroup {
    const KIND: ResourceKind = ResourceKind::LogGroup;

    fn references(&self) -> Vec<&AttrRef> {
        Vec::new()
    }

    fn claims(&self) -> Vec<Claim> {
        vec![Claim::named("log_group", &self.name)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogStream {
    #[serde(serialize_with = "escaped")]
    pub name: String,
    pub log_group_name: Expr,
}

impl Declaration for LogStream {
    const KIND: ResourceKind = ResourceKind::LogStream;

    fn references(&self) -> Vec<&AttrRef> {
        self.log_group_name.refs().collect()
    }

    fn claims(&self) -> Vec<Claim> {
        let group = owner_of(&self.log_group_name);
        vec![Claim::named("log_stream", format!("{group}/{}", self.name))]
    }
}
