//! Error type for HTML fragment rendering.
//!
//! [`RenderError`] abstracts over the underlying template engine's errors so
//! the public API stays stable if the backend changes. Token substitution
//! itself never returns an error; handlers fail soft to the original token
//! text, so only the rendering layer is fallible.

use thiserror::Error;

/// Error type for fragment rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax error or render failure.
    #[error("template error: {0}")]
    Template(String),

    /// Template not registered with the engine.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Context data could not be serialized for the template.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            _ => RenderError::Template(err.to_string()),
        }
    }
}
