//! telemetry-core: shared plumbing for the telemetry stack generator.
//!
//! - `config/` - stack input loading (YAML files and directories, env
//!   interpolation) and resolution into a [`Configuration`]
//! - `prefix` - time-partitioned prefix templates
//! - `partition` - partition value extraction from object keys
//! - `claims` - ownership claims on physical cloud objects
//! - `error` - configuration errors
//! - `logging` - tracing subscriber setup for the CLI

pub mod claims;
pub mod config;
pub mod error;
pub mod logging;
pub mod partition;
pub mod prefix;

pub use claims::Claim;
pub use config::{CliArgs, ConfigPath, Configuration, StackInput, load_from_paths};
pub use error::ConfigError;
pub use logging::init_tracing;
pub use partition::PartitionExtractor;
pub use prefix::{ERROR_OUTPUT_TYPE, PrefixTemplate};
