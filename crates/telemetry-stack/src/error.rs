//! Error types for the stack generator.

use snafu::prelude::*;

pub use telemetry_core::ConfigError;

use crate::model::{ResourceAddress, ResourceKind};

/// Errors that can occur while declaring, validating and rendering a stack.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StackError {
    /// Logical names must be usable as document keys.
    #[snafu(display("Invalid logical name '{name}'"))]
    InvalidName { name: String },

    /// Only data source kinds can be registered as data sources.
    #[snafu(display("{kind} is a managed resource, not a data source"))]
    NotDataSource { kind: ResourceKind },

    /// Two declarations share one address.
    #[snafu(display("Resource {address} is declared more than once"))]
    DuplicateAddress { address: ResourceAddress },

    /// Two outputs share one name.
    #[snafu(display("Output '{name}' is exported more than once"))]
    DuplicateOutput { name: String },

    /// The declared set breaks one or more invariants.
    #[snafu(display(
        "Stack failed validation with {} violation(s):\n  {}",
        violations.len(),
        violations.join("\n  ")
    ))]
    InvalidStack { violations: Vec<String> },

    /// Failed to serialize the deployment document.
    #[snafu(display("Failed to render deployment document: {source}"))]
    Render { source: serde_json::Error },

    /// Failed to write the deployment document.
    #[snafu(display("Failed to write {}: {source}", path.display()))]
    WriteOutput {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Configuration error.
    #[snafu(display("Configuration error: {source}"))]
    Config { source: ConfigError },
}

impl From<ConfigError> for StackError {
    fn from(source: ConfigError) -> Self {
        StackError::Config { source }
    }
}
