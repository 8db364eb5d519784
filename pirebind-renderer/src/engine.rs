//! Tera rendering engine: one template, one registry, one output string.

use tera::Tera;

use pirebind_core::Registry;

use crate::context::Bindings;
use crate::diagnostic::{Diagnostic, Stage};
use crate::error::RenderError;

/// Tera-based engine rendering a single template against a [`Registry`].
///
/// Autoescaping is disabled: the output is source code, not HTML.
pub struct TemplateEngine<'r> {
    registry: &'r Registry,
}

impl<'r> TemplateEngine<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        TemplateEngine { registry }
    }

    /// Parse `text` under `name` and render it with the five registry bindings.
    ///
    /// `name` is also used as the source file in diagnostic frames. Parse and
    /// evaluation failures come back as [`RenderError::Template`].
    pub fn render_str(&self, name: &str, text: &str) -> Result<String, RenderError> {
        let ctx = Bindings::from_registry(self.registry).to_tera_context()?;

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(name, text)
            .map_err(|e| RenderError::Template(Diagnostic::from_tera(&e, Stage::Parse, name, text)))?;
        tracing::debug!("compiled template {name}");

        let rendered = tera
            .render(name, &ctx)
            .map_err(|e| RenderError::Template(Diagnostic::from_tera(&e, Stage::Render, name, text)))?;
        tracing::debug!("rendered {name}: {} bytes", rendered.len());
        Ok(rendered)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
