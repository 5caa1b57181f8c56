//! Typed resource descriptors and the lazy references that wire them.

mod address;
pub mod athena;
mod expr;
pub mod firehose;
pub mod glue;
pub mod iam;
pub mod logs;
pub mod pinpoint;
pub mod policy;
mod resource;
pub mod s3;

use indexmap::IndexMap;
use serde::Serialize;
use telemetry_core::Claim;

pub use address::{AttrRef, ResourceAddress, ResourceKind};
pub use expr::{Expr, escape_template};
pub use policy::{Effect, PolicyDocument, Principal, Statement};
pub use resource::Resource;

/// Tag key -> value, in insertion order.
pub type Tags = IndexMap<String, String>;

/// A single resource body the stack can declare.
pub trait Declaration: Serialize + Into<Resource> {
    const KIND: ResourceKind;

    /// Attributes of other declarations this one reads.
    fn references(&self) -> Vec<&AttrRef>;

    /// Physical cloud objects this declaration writes.
    fn claims(&self) -> Vec<Claim>;
}

/// Identity of the object an attribute points at: the referenced address
/// when there is one, the literal value otherwise.
pub(crate) fn owner_of(expr: &Expr) -> String {
    expr.refs()
        .next()
        .map(|r| r.target().to_string())
        .unwrap_or_else(|| expr.render())
}
