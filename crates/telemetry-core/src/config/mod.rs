//! Stack configuration: loading, layering and resolution.

mod input;
mod loader;
mod path;
mod resolved;
mod vars;

pub use input::StackInput;
pub use loader::load_from_paths;
pub use path::{CliArgs, ConfigPath, is_yaml_file};
pub use resolved::{Configuration, MANAGED_BY};
pub use vars::{InterpolationResult, interpolate};

pub const DEFAULT_ENVIRONMENT: &str = "dev";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUFFER_SIZE_MB: u32 = 5;
pub const DEFAULT_BUFFER_INTERVAL_SECONDS: u32 = 300;
pub const DEFAULT_IA_DAYS: u32 = 30;
pub const DEFAULT_EXPIRATION_DAYS: u32 = 90;
/// Every 6 hours.
pub const DEFAULT_CRAWLER_SCHEDULE: &str = "cron(0 */6 * * ? *)";
