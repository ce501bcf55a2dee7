//! Markdown to sanitized HTML
//!
//! Markdown is rendered with comrak and the result is passed through ammonia.
//! Theme markup relies on `<section>` wrappers and on `class`, `style` and
//! `data-*` attributes, so those survive sanitization untouched.

use comrak::{markdown_to_html, Options};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dom::{parse_fragment, Element};

/// Tag of the element wrapping a rendered document.
pub const DOCUMENT_ROOT_TAG: &str = "section";

// ─────────────────────────────────────────────────────────────────────────────
// Render Options
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Pass raw HTML in the source through (still sanitized afterwards)
    pub html: bool,
    /// Treat single newlines as line breaks
    pub breaks: bool,
    /// Turn bare URLs into links
    pub linkify: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            html: true,
            breaks: true,
            linkify: true,
        }
    }
}

impl RenderOptions {
    fn to_comrak(self) -> Options {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = self.linkify;

        options.render.unsafe_ = self.html;
        options.render.hardbreaks = self.breaks;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// Render markdown to sanitized HTML.
pub fn render_markdown(markdown: &str, options: &RenderOptions) -> String {
    let html = markdown_to_html(markdown, &options.to_comrak());
    sanitize_html(&html)
}

/// Render markdown into an element tree under a `<section>` root.
pub fn render_document(markdown: &str, options: &RenderOptions) -> Element {
    let html = render_markdown(markdown, options);
    let root = Element::wrap(DOCUMENT_ROOT_TAG, parse_fragment(html.trim()));
    debug!("Rendered markdown into {} elements", root.element_count());
    root
}

/// Sanitize HTML, keeping the markup theme styling depends on.
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(&["section"])
        .add_generic_attributes(&["class", "style"])
        .add_generic_attribute_prefixes(&["data-"])
        .clean(html)
        .to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
