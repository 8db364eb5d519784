//! # pirebind-renderer
//!
//! Tera-based rendering of Pire binding templates against the
//! [`pirebind_core::Registry`], with frame-based diagnostics on failure.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pirebind_core::Registry;
//! use pirebind_renderer::{pipeline, PipelineError, RenderJob};
//!
//! fn generate(job: &RenderJob) -> std::process::ExitCode {
//!     let Ok(registry) = Registry::build() else { return std::process::ExitCode::FAILURE };
//!     match pipeline::run(job, &registry) {
//!         Ok(()) => std::process::ExitCode::SUCCESS,
//!         Err(PipelineError::Template(diag)) => {
//!             eprint!("{diag}");
//!             diag.exit_code()
//!         }
//!         Err(_) => std::process::ExitCode::FAILURE,
//!     }
//! }
//! ```

pub mod context;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod pipeline;

pub use context::{BindingName, Bindings};
pub use diagnostic::{Diagnostic, FaultKind, Frame, Stage};
pub use engine::TemplateEngine;
pub use error::{PipelineError, RenderError};
pub use pipeline::RenderJob;
