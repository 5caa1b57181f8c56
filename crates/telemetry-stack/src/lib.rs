//! telemetry-stack: declares the telemetry pipeline as typed resources and
//! renders it for the provisioning engine.
//!
//! Producers emit events to an analytics application, which forwards them
//! through a delivery stream into object storage. A crawler registers the
//! delivered data in a catalog that a query workgroup reads.
//!
//! - `model/` - resource descriptors, addresses and lazy references
//! - `components/` - the six resource groups of the pipeline
//! - `stack` - the declared set and its invariants
//! - `synth` - wiring the components together
//! - `render` - Terraform JSON output

pub mod app;
pub mod components;
pub mod error;
pub mod model;
pub mod render;
pub mod stack;
pub mod synth;

pub use app::execute;
pub use error::StackError;
pub use stack::Stack;
pub use synth::synthesize;

pub use telemetry_core::{CliArgs, Configuration, StackInput, init_tracing, load_from_paths};
