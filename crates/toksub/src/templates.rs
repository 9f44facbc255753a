//! Built-in fragment templates.
//!
//! Templates are stored as `(name, content)` pairs and registered with the
//! engine at construction. Names carry the `.html` extension so minijinja's
//! auto-escaping applies to every interpolated value.

/// Name of the image fragment template.
pub const IMG_TEMPLATE_NAME: &str = "img.html";

/// Crate-supplied fragment templates.
///
/// Each entry is `(name_with_extension, content)`.
pub const FRAGMENT_TEMPLATES: &[(&str, &str)] = &[(IMG_TEMPLATE_NAME, IMG_TEMPLATE)];

/// Image fragment.
///
/// Template variables:
/// - `object_images`: entities selected by the handler, each with `url`
///   and optionally `alt`
/// - `alt`, `width`, `height`, `sizes`: per-image attribute overrides
/// - `wrapper`: optional element name wrapped around the images
/// - `class`, `style`: attributes for the wrapper element
const IMG_TEMPLATE: &str = r#"{% if wrapper %}<{{ wrapper }}{% if class %} class="{{ class }}"{% endif %}{% if style %} style="{{ style }}"{% endif %}>{% endif %}{% for image in object_images %}<img src="{{ image.url }}"{% if alt %} alt="{{ alt }}"{% elif image.alt %} alt="{{ image.alt }}"{% endif %}{% if width %} width="{{ width }}"{% endif %}{% if height %} height="{{ height }}"{% endif %}{% if sizes %} sizes="{{ sizes }}"{% endif %}>{% endfor %}{% if wrapper %}</{{ wrapper }}>{% endif %}"#;
