//! telemetry-stack CLI: render the telemetry pipeline as a Terraform JSON document.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use telemetry_stack::{CliArgs, execute, init_tracing, load_from_paths};

fn main() -> ExitCode {
    init_tracing();

    let args = CliArgs::parse();

    let paths = args.config_paths();
    if paths.is_empty() {
        eprintln!("Error: no config files or directories specified");
        return ExitCode::FAILURE;
    }

    info!("Loading config from {} source(s)", paths.len());

    let config = match load_from_paths(&paths).and_then(|input| input.resolve()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Resolved stack {} in {}", config.name_prefix, config.region);

    match execute(&args, &config, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Stack generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}
