//! Error types shared by the stack generator.
//!
//! Configuration problems are the only failures the generator owns. Everything
//! that can go wrong at apply time belongs to the provisioning engine.

use snafu::prelude::*;

// ============ Config Errors ============

/// Errors that can occur while loading and resolving stack configuration.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// The required project name was not supplied.
    #[snafu(display("Missing required configuration key 'project_name'"))]
    MissingProjectName,

    /// Tiering must happen before the objects expire.
    #[snafu(display(
        "s3_lifecycle_ia_days ({ia_days}) must be less than s3_lifecycle_expiration_days ({expiration_days})"
    ))]
    LifecycleOrder { ia_days: u32, expiration_days: u32 },

    /// Environment variable interpolation failed.
    #[snafu(display("Environment variable interpolation failed:\n{message}"))]
    EnvInterpolation { message: String },

    /// Failed to parse YAML configuration.
    #[snafu(display("Failed to parse YAML: {source}"))]
    YamlParse { source: serde_yaml::Error },

    /// Failed to read configuration file.
    #[snafu(display("Failed to read configuration file: {source}"))]
    ReadFile { source: std::io::Error },

    /// Unsupported config file format.
    #[snafu(display("Unsupported config format for {}: only .yaml/.yml supported", path.display()))]
    UnsupportedFormat { path: std::path::PathBuf },

    /// Failed to read configuration directory.
    #[snafu(display("Failed to read directory {}", path.display()))]
    ReadDir {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// Multiple configuration errors occurred.
    #[snafu(display("Multiple config errors:\n{}", errors.join("\n")))]
    MultipleErrors { errors: Vec<String> },
}
