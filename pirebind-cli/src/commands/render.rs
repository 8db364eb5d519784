//! `pirebind [-i <template>] [-o <output>]`: the single render command.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use pirebind_core::Registry;
use pirebind_renderer::{
    pipeline::{self, DEFAULT_INPUT, DEFAULT_OUTPUT},
    PipelineError, RenderJob,
};

/// Template and destination paths.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Tera template to render.
    #[arg(long, short = 'i', default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Path to place the rendered source at.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

impl RenderArgs {
    pub fn run(self) -> Result<ExitCode> {
        let registry = Registry::build().context("built-in binding spec is invalid")?;
        let job = RenderJob {
            input: self.input,
            output: self.output,
        };

        match pipeline::run(&job, &registry) {
            Ok(()) => Ok(ExitCode::SUCCESS),
            Err(PipelineError::Template(diag)) => {
                tracing::debug!("template failed with {} frame(s)", diag.frames.len());
                let mut stderr = std::io::stderr().lock();
                diag.write_report(&mut stderr)
                    .and_then(|()| stderr.flush())
                    .context("failed to print template diagnostic")?;
                Ok(diag.exit_code())
            }
            Err(err) => Err(err).with_context(|| {
                format!(
                    "failed to render '{}' into '{}'",
                    job.input.display(),
                    job.output.display()
                )
            }),
        }
    }
}
