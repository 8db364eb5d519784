//! File-level render pipeline used by the `pirebind` binary.
//!
//! 1. Resolve the input path to an absolute path.
//! 2. Read the template text.
//! 3. Compile + bind + render via [`TemplateEngine`].
//! 4. Only after a successful render: truncate-open the destination and write
//!    the text in one call.
//!
//! A failed render never touches the destination.

use std::io::Write;
use std::path::{Path, PathBuf};

use pirebind_core::Registry;

use crate::engine::TemplateEngine;
use crate::error::{io_err, PipelineError};

/// Default template source.
pub const DEFAULT_INPUT: &str = "/dev/stdin";
/// Default render destination.
pub const DEFAULT_OUTPUT: &str = "/dev/stdout";

/// One template in, one rendered file out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for RenderJob {
    fn default() -> Self {
        RenderJob {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Run `job` against `registry`.
///
/// Template failures return [`PipelineError::Template`] with the destination
/// untouched; I/O failures return [`PipelineError::Io`].
pub fn run(job: &RenderJob, registry: &Registry) -> Result<(), PipelineError> {
    let input = std::path::absolute(&job.input).map_err(|e| io_err(&job.input, e))?;
    tracing::debug!("reading template from {}", input.display());
    let text = std::fs::read_to_string(&input).map_err(|e| io_err(&input, e))?;

    let name = input.to_string_lossy();
    let rendered = TemplateEngine::new(registry).render_str(&name, &text)?;

    write_output(&job.output, &rendered)?;
    tracing::info!("wrote {} bytes to {}", rendered.len(), job.output.display());
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<(), PipelineError> {
    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    file.write_all(content.as_bytes()).map_err(|e| io_err(path, e))?;
    file.flush().map_err(|e| io_err(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
