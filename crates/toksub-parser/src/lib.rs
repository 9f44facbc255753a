//! Bracket-token scanner and substitution engine.
//!
//! This crate parses `[[name attr="value" ...]]` placeholder tokens embedded
//! in free-form text and replaces each one with the output of a handler
//! registered for that tag name. Tokens with no registered handler, and
//! bracket sequences that do not parse as tokens, pass through verbatim.
//!
//! # Example
//!
//! ```rust
//! use toksub_parser::{TokenContext, TokenParser};
//!
//! let mut parser = TokenParser::new();
//! parser.register("upper", |context: &TokenContext| {
//!     context
//!         .get("ids")
//!         .and_then(|v| v.as_str())
//!         .unwrap_or("")
//!         .to_uppercase()
//! });
//!
//! let mut context = TokenContext::new();
//! let out = parser.replace_tokens(r#"x [[upper ids="abc"]] y"#, &mut context);
//! assert_eq!(out, "x ABC y");
//!
//! // Unregistered tags are left alone.
//! let out = parser.replace_tokens(r#"see [[video ids="3"]]"#, &mut context);
//! assert_eq!(out, r#"see [[video ids="3"]]"#);
//! ```
//!
//! # Token Syntax
//!
//! - Tag names are one or more ASCII word characters: `[A-Za-z0-9_]+`
//! - Attribute keys are lowercase letters and hyphens: `[a-z-]+`
//! - Attribute values are double-quoted and may be empty; any character
//!   except `"` is allowed inside a value
//! - Whitespace between the name and attributes, and between attributes,
//!   is optional
//!
//! Anything that does not parse as a complete token is treated as plain
//! text. The replacement pass is strictly single-pass: handler output is
//! never re-scanned for further tokens.

use std::collections::{HashMap, HashSet};

/// A mutable context mapping handed to handlers.
///
/// The caller seeds it with whatever the handlers need (entity lookups,
/// site settings); the parser merges allow-listed token attributes into it
/// before each dispatch. Values use `serde_json::Value` so handlers can
/// pass the context straight to a template engine.
pub type TokenContext = HashMap<String, serde_json::Value>;

/// Context key under which the raw token text is stored before dispatch.
///
/// Handlers return this value to fail soft, leaving the token visible in
/// the output instead of erroring.
pub const ORIGINAL_TOKEN_KEY: &str = "_original_token";

/// Attribute keys merged into the context by default.
///
/// Keys outside the allow-list are dropped before the handler runs, so a
/// token cannot clobber arbitrary context entries.
pub const DEFAULT_ALLOWED_OVERRIDE: &[&str] = &[
    "ids", "class", "style", "wrapper", "alt", "width", "height", "sizes",
];

/// A token replacement handler.
///
/// Handlers receive the caller's context with the token's allow-listed
/// attributes and [`ORIGINAL_TOKEN_KEY`] merged in, and return the
/// replacement string. Dispatch is infallible by contract: a handler that
/// cannot produce a fragment returns the original token text.
///
/// A blanket implementation is provided for closures:
///
/// ```rust
/// use toksub_parser::{TokenContext, TokenParser};
///
/// let mut parser = TokenParser::new();
/// parser.register("hr", |_: &TokenContext| "<hr>".to_string());
/// ```
pub trait TokenHandler: Send + Sync {
    /// Produce the replacement string for one token.
    fn render(&self, context: &TokenContext) -> String;
}

impl<F> TokenHandler for F
where
    F: Fn(&TokenContext) -> String + Send + Sync,
{
    fn render(&self, context: &TokenContext) -> String {
        (self)(context)
    }
}

/// A single parsed token: `[[name key="value" ...]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken<'a> {
    raw: &'a str,
    name: &'a str,
    attrs: Vec<(&'a str, &'a str)>,
}

impl<'a> TagToken<'a> {
    /// The full token text, brackets included.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The tag name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Attribute pairs in source order, duplicates included.
    pub fn attrs(&self) -> &[(&'a str, &'a str)] {
        &self.attrs
    }

    /// Attributes as a map. Duplicate keys resolve to the last occurrence.
    pub fn attributes(&self) -> HashMap<&'a str, &'a str> {
        self.attrs.iter().copied().collect()
    }
}

/// A segment of scanned input: plain text or a parsed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A run of text containing no well-formed token.
    Text(&'a str),
    /// A well-formed `[[...]]` token.
    Token(TagToken<'a>),
}

/// Iterator splitting input into [`Segment`]s.
///
/// Scanning is zero-copy; segments borrow from the input. Malformed
/// bracket sequences are folded into the surrounding text segments.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    // Token already parsed but not yet emitted because text preceded it.
    pending: Option<(TagToken<'a>, usize)>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
        }
    }

    /// Finds and parses the next well-formed token at or after `from`.
    ///
    /// Returns the token's start offset, the token, and its length.
    fn next_token(&self, from: usize) -> Option<(usize, TagToken<'a>, usize)> {
        let mut search = from;
        while let Some(off) = self.input[search..].find("[[") {
            let start = search + off;
            if let Some((token, len)) = parse_token(&self.input[start..]) {
                return Some((start, token, len));
            }
            // Not a token here; `[[[img ...]]` still finds the token one
            // byte later.
            search = start + 1;
        }
        None
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((token, len)) = self.pending.take() {
            self.pos += len;
            return Some(Segment::Token(token));
        }
        if self.pos >= self.input.len() {
            return None;
        }

        match self.next_token(self.pos) {
            Some((start, token, len)) if start == self.pos => {
                self.pos = start + len;
                Some(Segment::Token(token))
            }
            Some((start, token, len)) => {
                let text = &self.input[self.pos..start];
                self.pos = start;
                self.pending = Some((token, len));
                Some(Segment::Text(text))
            }
            None => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Segment::Text(text))
            }
        }
    }
}

/// Tries to parse a token at the start of `input`.
///
/// Returns the token and the number of bytes consumed, or `None` if the
/// input does not begin with a well-formed token.
fn parse_token(input: &str) -> Option<(TagToken<'_>, usize)> {
    let bytes = input.as_bytes();
    if !input.starts_with("[[") {
        return None;
    }

    // Tag name: [A-Za-z0-9_]+, matched maximally.
    let name_start = 2;
    let mut pos = name_start;
    while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
        pos += 1;
    }
    if pos == name_start {
        return None;
    }
    let name = &input[name_start..pos];

    let mut attrs = Vec::new();
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if input[pos..].starts_with("]]") {
            return Some((
                TagToken {
                    raw: &input[..pos + 2],
                    name,
                    attrs,
                },
                pos + 2,
            ));
        }

        // Attribute key: [a-z-]+
        let key_start = pos;
        while pos < bytes.len() && (bytes[pos].is_ascii_lowercase() || bytes[pos] == b'-') {
            pos += 1;
        }
        if pos == key_start {
            return None;
        }
        let key = &input[key_start..pos];

        if pos >= bytes.len() || bytes[pos] != b'=' {
            return None;
        }
        pos += 1;
        if pos >= bytes.len() || bytes[pos] != b'"' {
            return None;
        }
        pos += 1;

        // Value: anything up to the closing quote, `]]` included.
        let value_start = pos;
        while pos < bytes.len() && bytes[pos] != b'"' {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }
        attrs.push((key, &input[value_start..pos]));
        pos += 1;
    }
}

/// Registry of tag handlers plus the substitution pass.
///
/// Handlers are registered once at startup and never removed. The parser
/// itself is immutable during replacement, so it can live in a `static`.
pub struct TokenParser {
    handlers: HashMap<String, Box<dyn TokenHandler>>,
    allowed_override: HashSet<String>,
}

impl Default for TokenParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenParser {
    /// Creates a parser with no handlers and the default attribute
    /// allow-list ([`DEFAULT_ALLOWED_OVERRIDE`]).
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            allowed_override: DEFAULT_ALLOWED_OVERRIDE
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
        }
    }

    /// Replaces the attribute allow-list.
    pub fn allowed_override<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_override = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Registers a handler for a tag name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: impl TokenHandler + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Returns true if a handler is registered for `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Replaces every token with a registered handler in `text`.
    ///
    /// For each matched token the allow-listed attributes are merged into
    /// `context` in place (so they remain visible to later tokens, as do
    /// any handler-visible mutations the caller makes between calls), the
    /// raw token text is stored under [`ORIGINAL_TOKEN_KEY`], and the
    /// handler's output is substituted for the token. Tokens without a
    /// handler are emitted verbatim. Handler output is not re-scanned.
    pub fn replace_tokens(&self, text: &str, context: &mut TokenContext) -> String {
        let mut output = String::with_capacity(text.len());

        for segment in Scanner::new(text) {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Token(token) => {
                    let Some(handler) = self.handlers.get(token.name()) else {
                        output.push_str(token.raw());
                        continue;
                    };

                    for (key, value) in token.attrs() {
                        if self.allowed_override.contains(*key) {
                            context.insert(
                                (*key).to_string(),
                                serde_json::Value::String((*value).to_string()),
                            );
                        }
                    }
                    context.insert(
                        ORIGINAL_TOKEN_KEY.to_string(),
                        serde_json::Value::String(token.raw().to_string()),
                    );

                    output.push_str(&handler.render(context));
                }
            }
        }

        output
    }
}

impl std::fmt::Debug for TokenParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenParser")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("allowed_override", &self.allowed_override)
            .finish()
    }
}
