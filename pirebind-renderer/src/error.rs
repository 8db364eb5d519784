//! Error types for pirebind-renderer.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Errors raised while binding the registry or evaluating a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template failed to parse or evaluate; the report is ready to print.
    #[error("template rendering failed\n{0}")]
    Template(Diagnostic),

    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The bound names do not match the fixed top-level schema.
    #[error("binding schema mismatch (missing: {missing:?}, unexpected: {unexpected:?})")]
    Schema {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

/// Errors surfaced by [`crate::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The template failed to parse or evaluate; the report is ready to print.
    #[error("template rendering failed\n{0}")]
    Template(Diagnostic),

    /// Binding the registry failed before the template ran.
    #[error(transparent)]
    Render(RenderError),

    /// The template could not be read or the destination could not be written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RenderError> for PipelineError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Template(diag) => PipelineError::Template(diag),
            other => PipelineError::Render(other),
        }
    }
}

/// Convenience constructor for [`PipelineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        source,
    }
}
