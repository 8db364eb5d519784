//! pirebind: render Pire binding sources from a Tera template.
//!
//! # Usage
//!
//! ```text
//! pirebind [-i <template>] [-o <output>]
//! pirebind < scanners.pyx.tera > scanners.pyx
//! ```
//!
//! The template sees five top-level names: `FSM_BINARIES`,
//! `FSM_INPLACE_UNARIES`, `OPTIONS`, `SCANNERS`, `SPECIAL_CHARS`.

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use commands::render::RenderArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "pirebind",
    version,
    about = "Render source files for the Pire bindings",
    long_about = "Reads a Tera template, renders it against the fixed description of \
                  Pire scanners, FSM operators, options and special chars, and writes \
                  the result to the output file.",
)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    cli.render.run()
}

/// Logs go to stderr so the default stdout destination stays clean.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
