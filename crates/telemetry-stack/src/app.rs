//! What the binary does once configuration is resolved.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use snafu::prelude::*;
use telemetry_core::{CliArgs, Configuration};
use tracing::info;

use crate::error::{StackError, WriteOutputSnafu};
use crate::render;
use crate::synth::synthesize;

/// Synthesize and validate the stack, then write what `args` asks for.
///
/// Nothing is written unless the stack validates.
pub fn execute(
    args: &CliArgs,
    config: &Configuration,
    stdout: &mut impl Write,
) -> Result<(), StackError> {
    let stack = synthesize(config)?;
    stack.validate()?;

    if args.check {
        info!("Stack {} is valid ({} resources)", config.name_prefix, stack.len());
        return Ok(());
    }

    let text = if args.graph {
        render::graph(&stack)
    } else {
        render::to_text(&render::document(&stack, config)?)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &text).context(WriteOutputSnafu { path })?;
            info!("Wrote {}", path.display());
        }
        None => stdout
            .write_all(text.as_bytes())
            .and_then(|()| stdout.flush())
            .context(WriteOutputSnafu {
                path: PathBuf::from("<stdout>"),
            })?,
    }

    Ok(())
}
