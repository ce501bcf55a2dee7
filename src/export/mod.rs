//! WeChat Export Module
//!
//! Turns a rendered element tree into HTML that survives being pasted into
//! the WeChat article editor, which drops stylesheets, classes and ids. Every
//! element's computed style is written inline instead.
//!
//! # Pipeline
//!
//! 1. **Resolve**: compute each element's style and keep the allow-listed,
//!    non-default declarations (`resolver.rs`)
//! 2. **Inline**: clone the tree, write each style as a `style` attribute and
//!    strip `class` / `id` (`inliner.rs`)
//! 3. **Publish**: serialize to HTML + plain text and write both to the
//!    clipboard, with a selection-copy fallback (`clipboard.rs`)
//!
//! # Architecture
//!
//! - `options.rs` - Export configuration
//! - `resolver.rs` - Style allow-list and resolution
//! - `inliner.rs` - Tree cloning and style inlining
//! - `clipboard.rs` - Clipboard writer and host capabilities
//! - `html.rs` - Standalone preview documents

pub mod clipboard;
pub mod html;
pub mod inliner;
pub mod options;
pub mod resolver;

pub use clipboard::{
    ClipboardPayload, ClipboardWriter, ScratchDocument, SelectionHost, StructuredClipboard,
    SystemClipboard,
};
pub use html::generate_html_document;
pub use inliner::{apply_styles, inline_tree};
pub use options::{ExportOptions, MarkupScope};
pub use resolver::{resolve_styles, ResolvedStyle, STYLE_ALLOW_LIST};

use log::info;

use crate::dom::Element;
use crate::style::StyleOracle;

/// Build the clipboard payload for a rendered tree.
///
/// The tree itself is not modified.
pub fn prepare_export(
    root: &Element,
    oracle: &dyn StyleOracle,
    options: &ExportOptions,
) -> ClipboardPayload {
    let inlined = inline_tree(root, oracle);
    let html = match options.markup {
        MarkupScope::Outer => inlined.outer_html(),
        MarkupScope::Inner => inlined.inner_html(),
    };
    ClipboardPayload {
        html,
        plain_text: inlined.text_content(),
    }
}

/// Inline `root` and copy it to the clipboard.
///
/// Returns `false` if the clipboard was not written; the reason is logged.
pub fn copy_wechat_html(
    root: &Element,
    oracle: &dyn StyleOracle,
    options: &ExportOptions,
    writer: &mut ClipboardWriter<'_>,
) -> bool {
    let payload = prepare_export(root, oracle, options);
    let copied = writer.write(&payload);
    if copied {
        info!(
            "Copied {} bytes of HTML ({} characters of text)",
            payload.html.len(),
            payload.plain_text.chars().count()
        );
    }
    copied
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
