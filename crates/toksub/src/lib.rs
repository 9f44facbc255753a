//! # toksub - placeholder tokens to HTML fragments
//!
//! `toksub` replaces bracketed placeholder tokens embedded in free-form
//! text with rendered HTML fragments. Editors write tokens like
//! `[[img ids="1,2" width="200"]]` inside plain text fields; the site
//! supplies the entities those tokens refer to; `toksub` swaps each token
//! for markup.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use toksub::{render_tokens, TokenContext};
//!
//! let mut context = TokenContext::new();
//! context.insert(
//!     "object_images".to_string(),
//!     json!([{"id": 1, "url": "/media/a.jpg"}]),
//! );
//!
//! let html = render_tokens(r#"Intro [[img ids="1"]] outro"#, &mut context);
//! assert_eq!(html, r#"Intro <img src="/media/a.jpg"> outro"#);
//! ```
//!
//! Tokens with no registered handler, and anything that only looks like a
//! token, stay in the output untouched:
//!
//! ```rust
//! use toksub::{render_tokens, TokenContext};
//!
//! let mut context = TokenContext::new();
//! let text = r#"[[video ids="3"]] and array[0]"#;
//! assert_eq!(render_tokens(text, &mut context), text);
//! ```
//!
//! ## Custom Handlers
//!
//! Build your own [`TokenParser`] to register additional tags; handlers
//! are plain closures or [`TokenHandler`] implementations:
//!
//! ```rust
//! use toksub::{TokenContext, TokenParser};
//!
//! let mut parser = TokenParser::new();
//! parser.register("hr", |_: &TokenContext| "<hr>".to_string());
//!
//! let mut context = TokenContext::new();
//! assert_eq!(parser.replace_tokens("a [[hr]] b", &mut context), "a <hr> b");
//! ```

mod engine;
mod error;
mod handlers;
mod templates;

pub use engine::HtmlEngine;
pub use error::RenderError;
pub use handlers::ImgHandler;
pub use templates::{FRAGMENT_TEMPLATES, IMG_TEMPLATE_NAME};

// Re-export the parser crate's public surface.
pub use toksub_parser::{
    Scanner, Segment, TagToken, TokenContext, TokenHandler, TokenParser,
    DEFAULT_ALLOWED_OVERRIDE, ORIGINAL_TOKEN_KEY,
};

use once_cell::sync::Lazy;

/// Process-wide parser with the built-in handlers registered.
///
/// If the embedded templates fail to compile the `img` handler is left
/// unregistered and its tokens pass through verbatim, consistent with the
/// fail-soft contract.
static DEFAULT_PARSER: Lazy<TokenParser> = Lazy::new(|| {
    let mut parser = TokenParser::new();
    if let Ok(handler) = ImgHandler::new() {
        parser.register("img", handler);
    }
    parser
});

/// Returns the process-wide default parser.
pub fn default_parser() -> &'static TokenParser {
    &DEFAULT_PARSER
}

/// Replaces tokens in `text` using the default parser.
///
/// Allow-listed token attributes are merged into `context` in place before
/// each handler runs; see [`TokenParser::replace_tokens`].
pub fn render_tokens(text: &str, context: &mut TokenContext) -> String {
    DEFAULT_PARSER.replace_tokens(text, context)
}
