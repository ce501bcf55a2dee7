//! Theme System for md2wechat
//!
//! A theme describes how each kind of rendered markdown element looks in the
//! exported article: a global base style plus one rule per element kind.
//! Rules are either CSS strings or property maps (see [`StyleValue`]).
//!
//! # Architecture
//!
//! - `mod.rs` - `Theme`, `ThemeStyles`, `GlobalStyle` and validation
//! - `builtin.rs` - Themes that ship with the application
//! - `manager.rs` - Theme selection, custom themes and persistence
//!
//! # Theme JSON
//!
//! ```json
//! {
//!   "id": "my-theme",
//!   "name": "My Theme",
//!   "isCustom": true,
//!   "styles": {
//!     "global": { "fontSize": "16px", "lineHeight": "1.75", "color": "#333",
//!                 "backgroundColor": "#fff", "fontFamily": "sans-serif" },
//!     "h1": "font-size: 24px; font-weight: bold",
//!     "p": { "margin": "16px 0" }
//!   }
//! }
//! ```

pub mod builtin;
pub mod manager;

pub use manager::{import_theme_json, ThemeManager};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::style::StyleValue;

// ─────────────────────────────────────────────────────────────────────────────
// Global Style
// ─────────────────────────────────────────────────────────────────────────────

/// Base style applied to the article root and inherited by every element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyle {
    pub font_size: String,
    pub line_height: String,
    pub color: String,
    pub background_color: String,
    pub font_family: String,
}

impl Default for GlobalStyle {
    fn default() -> Self {
        Self {
            font_size: "16px".to_string(),
            line_height: "1.75".to_string(),
            color: "#333333".to_string(),
            background_color: "#ffffff".to_string(),
            font_family: "-apple-system, BlinkMacSystemFont, \"Helvetica Neue\", \"PingFang SC\", \"Microsoft YaHei\", sans-serif".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme Elements
// ─────────────────────────────────────────────────────────────────────────────

/// The element kinds a theme can style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeElement {
    H1,
    H2,
    H3,
    P,
    Quote,
    Code,
    Pre,
    Ul,
    Ol,
    Li,
    A,
    Img,
    Hr,
    Table,
    Th,
    Td,
}

impl ThemeElement {
    /// Map an HTML tag to the theme rule that styles it.
    pub fn for_tag(tag: &str) -> Option<Self> {
        let element = match tag {
            "h1" => ThemeElement::H1,
            "h2" => ThemeElement::H2,
            "h3" => ThemeElement::H3,
            "p" => ThemeElement::P,
            "blockquote" => ThemeElement::Quote,
            "code" => ThemeElement::Code,
            "pre" => ThemeElement::Pre,
            "ul" => ThemeElement::Ul,
            "ol" => ThemeElement::Ol,
            "li" => ThemeElement::Li,
            "a" => ThemeElement::A,
            "img" => ThemeElement::Img,
            "hr" => ThemeElement::Hr,
            "table" => ThemeElement::Table,
            "th" => ThemeElement::Th,
            "td" => ThemeElement::Td,
            _ => return None,
        };
        Some(element)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

/// Per-element rules of a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeStyles {
    pub global: GlobalStyle,
    pub h1: StyleValue,
    pub h2: StyleValue,
    pub h3: StyleValue,
    pub p: StyleValue,
    pub quote: StyleValue,
    pub code: StyleValue,
    pub pre: StyleValue,
    pub ul: StyleValue,
    pub ol: StyleValue,
    pub li: StyleValue,
    pub a: StyleValue,
    pub img: StyleValue,
    pub hr: StyleValue,
    pub table: StyleValue,
    pub th: StyleValue,
    pub td: StyleValue,
}

impl ThemeStyles {
    /// Get the rule for an element kind.
    pub fn rule(&self, element: ThemeElement) -> &StyleValue {
        match element {
            ThemeElement::H1 => &self.h1,
            ThemeElement::H2 => &self.h2,
            ThemeElement::H3 => &self.h3,
            ThemeElement::P => &self.p,
            ThemeElement::Quote => &self.quote,
            ThemeElement::Code => &self.code,
            ThemeElement::Pre => &self.pre,
            ThemeElement::Ul => &self.ul,
            ThemeElement::Ol => &self.ol,
            ThemeElement::Li => &self.li,
            ThemeElement::A => &self.a,
            ThemeElement::Img => &self.img,
            ThemeElement::Hr => &self.hr,
            ThemeElement::Table => &self.table,
            ThemeElement::Th => &self.th,
            ThemeElement::Td => &self.td,
        }
    }
}

/// A named, selectable theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
    pub styles: ThemeStyles,
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Check that a JSON value has the shape of a theme.
///
/// Only the envelope is checked: string `id`, string `name` and an object
/// `styles`. Individual rules are validated when deserialized.
pub fn is_theme(value: &Value) -> bool {
    let Some(theme) = value.as_object() else {
        return false;
    };
    theme.get("id").is_some_and(Value::is_string)
        && theme.get("name").is_some_and(Value::is_string)
        && theme.get("styles").is_some_and(Value::is_object)
}

/// Check that a JSON value is an array of themes.
pub fn is_theme_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|themes| themes.iter().all(is_theme))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
