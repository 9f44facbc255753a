//! Built-in token handlers.
//!
//! Handlers follow a fail-soft contract: any missing or malformed input
//! produces the original token text, never an error. Editors see the
//! untouched `[[...]]` placeholder in the page and can fix it.

use std::collections::HashMap;

use serde_json::Value;
use toksub_parser::{TokenContext, TokenHandler, ORIGINAL_TOKEN_KEY};

use crate::engine::HtmlEngine;
use crate::error::RenderError;
use crate::templates::IMG_TEMPLATE_NAME;

/// Handler for `[[img ids="1,2" ...]]` tokens.
///
/// Expects two context entries:
///
/// - `ids` (merged from the token): comma-separated numeric entity ids
/// - `object_images` (supplied by the caller): array of entities, each an
///   object with a numeric `id` and an image `url`
///
/// The entities named by `ids` are selected in the order written and
/// rendered with the `img.html` fragment. Ids with no matching entity are
/// skipped silently; everything else that goes wrong falls back to the
/// original token text.
pub struct ImgHandler {
    engine: HtmlEngine,
}

impl ImgHandler {
    /// Creates the handler with its own engine instance.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            engine: HtmlEngine::new()?,
        })
    }

    /// Creates the handler around an existing engine, e.g. one with a
    /// replacement `img.html` template.
    pub fn with_engine(engine: HtmlEngine) -> Self {
        Self { engine }
    }

    fn try_render(&self, context: &TokenContext) -> Option<String> {
        let ids = context.get("ids")?.as_str()?;
        let images = context.get("object_images")?.as_array()?;
        if images.is_empty() {
            return None;
        }

        // Best-effort numeric parsing; one bad id fails the whole token.
        let ids = ids
            .split(',')
            .map(|raw| raw.trim().parse::<i64>().ok())
            .collect::<Option<Vec<i64>>>()?;

        let by_id: HashMap<i64, &Value> = images
            .iter()
            .filter_map(|image| Some((image.get("id")?.as_i64()?, image)))
            .collect();
        let selected: Vec<Value> = ids
            .iter()
            .filter_map(|id| by_id.get(id).copied().cloned())
            .collect();

        let mut data = serde_json::Map::new();
        for (key, value) in context {
            data.insert(key.clone(), value.clone());
        }
        data.insert("object_images".to_string(), Value::Array(selected));

        self.engine
            .render_named(IMG_TEMPLATE_NAME, &Value::Object(data))
            .ok()
    }
}

impl TokenHandler for ImgHandler {
    fn render(&self, context: &TokenContext) -> String {
        self.try_render(context)
            .unwrap_or_else(|| original_token(context))
    }
}

/// The raw token text stored by the parser, for fail-soft returns.
fn original_token(context: &TokenContext) -> String {
    context
        .get(ORIGINAL_TOKEN_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
