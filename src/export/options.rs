//! Export Options and Configuration
//!
//! This module defines which part of the inlined tree is exported.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Markup Scope
// ─────────────────────────────────────────────────────────────────────────────

/// How much of the inlined tree ends up in the `text/html` representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkupScope {
    /// The root element itself and everything inside it. Pasting keeps the
    /// root's own inline style (background, base font).
    #[default]
    Outer,
    /// Only the root's children. The root's style is lost on paste.
    Inner,
}

// ─────────────────────────────────────────────────────────────────────────────
// Export Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for clipboard export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Which markup extent is exported
    pub markup: MarkupScope,
}

impl ExportOptions {
    /// Builder-style setter for the markup scope.
    pub fn with_markup(mut self, markup: MarkupScope) -> Self {
        self.markup = markup;
        self
    }
}
