//! Terraform JSON rendering.
//!
//! The document is built with `serde_json`'s order-preserving map so that
//! resources appear in declaration order and diffs between renders stay
//! small.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use snafu::prelude::*;
use telemetry_core::Configuration;

use crate::error::{RenderSnafu, StackError};
use crate::model::escape_template;
use crate::stack::Stack;

pub const PROVIDER_SOURCE: &str = "hashicorp/aws";
pub const PROVIDER_VERSION: &str = ">= 5.0";

/// Render the deployment document for a synthesized stack.
pub fn document(stack: &Stack, config: &Configuration) -> Result<Value, StackError> {
    let mut data: IndexMap<&str, Map<String, Value>> = IndexMap::new();
    for address in stack.data_sources() {
        data.entry(address.kind().type_name())
            .or_default()
            .insert(address.name().to_string(), Value::Object(Map::new()));
    }

    let mut resources: IndexMap<&str, Map<String, Value>> = IndexMap::new();
    for (address, resource) in stack.resources() {
        let body = resource.body().context(RenderSnafu)?;
        resources
            .entry(address.kind().type_name())
            .or_default()
            .insert(address.name().to_string(), body);
    }

    let outputs: Map<String, Value> = stack
        .outputs()
        .map(|(name, value)| (name.to_string(), json!({ "value": value.render() })))
        .collect();

    Ok(json!({
        "terraform": {
            "required_providers": {
                "aws": {
                    "source": PROVIDER_SOURCE,
                    "version": PROVIDER_VERSION,
                }
            }
        },
        "provider": {
            "aws": {
                "region": escape_template(&config.region),
            }
        },
        "data": data,
        "resource": resources,
        "output": outputs,
    }))
}

/// The document as pretty-printed JSON with a trailing newline.
pub fn to_text(document: &Value) -> Result<String, StackError> {
    let mut text = serde_json::to_string_pretty(document).context(RenderSnafu)?;
    text.push('\n');
    Ok(text)
}

/// One `from -> to` line per dependency edge.
pub fn graph(stack: &Stack) -> String {
    stack
        .dependencies()
        .into_iter()
        .map(|(from, to)| format!("{from} -> {to}\n"))
        .collect()
}
