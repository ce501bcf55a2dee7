//! Markdown rendering module
//!
//! Renders markdown to sanitized HTML with comrak (CommonMark + GFM) and
//! ammonia, and parses the result into an element tree for export.
//!
//! # Example
//! ```ignore
//! use md2wechat::markdown::{render_document, RenderOptions};
//!
//! let root = render_document("# Hello\n\nThis is **bold** text.", &RenderOptions::default());
//! assert_eq!(root.tag, "section");
//! ```

mod renderer;

pub use renderer::{
    render_document, render_markdown, sanitize_html, RenderOptions, DOCUMENT_ROOT_TAG,
};
