//! HTML fragment rendering.
//!
//! [`HtmlEngine`] wraps a minijinja environment preloaded with the crate's
//! built-in fragment templates. Handlers hand it the merged token context
//! and get back an HTML string.

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::RenderError;
use crate::templates::FRAGMENT_TEMPLATES;

/// Template engine for HTML fragments.
///
/// # Example
///
/// ```rust
/// use toksub::HtmlEngine;
/// use serde_json::json;
///
/// let engine = HtmlEngine::new().unwrap();
/// let html = engine
///     .render_named("img.html", &json!({
///         "object_images": [{"id": 1, "url": "/media/a.jpg"}],
///     }))
///     .unwrap();
/// assert_eq!(html, r#"<img src="/media/a.jpg">"#);
/// ```
pub struct HtmlEngine {
    env: Environment<'static>,
}

impl HtmlEngine {
    /// Creates an engine with the built-in fragment templates registered.
    pub fn new() -> Result<Self, RenderError> {
        let mut env = Environment::new();
        for (name, source) in FRAGMENT_TEMPLATES.iter().copied() {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Registers a caller-supplied fragment template.
    ///
    /// Give the name an `.html` extension to get auto-escaping.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    /// Renders a registered template with the given data.
    pub fn render_named<S: Serialize>(&self, name: &str, data: &S) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(Value::from_serialize(data))?)
    }

    /// Checks if a template with the given name is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Returns a mutable reference to the underlying minijinja environment,
    /// for registering custom filters or functions.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}
