//! Style property maps and CSS string conversion
//!
//! Theme rules may be written either as raw CSS strings
//! (`"color: red; font-size: 16px"`) or as property maps keyed by camelCase
//! names (`{"color": "red", "fontSize": "16px"}`). This module converts
//! between the two forms.

use regex::{Captures, Regex};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Style Properties
// ─────────────────────────────────────────────────────────────────────────────

/// Well-known property keys. Any other key is carried through unchanged.
pub const WELL_KNOWN_PROPERTIES: &[&str] = &[
    "color",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "margin",
    "padding",
    "backgroundColor",
    "border",
    "borderRadius",
    "fontFamily",
    "textDecoration",
    "letterSpacing",
    "textAlign",
    "borderLeft",
    "borderBottom",
    "overflowX",
    "display",
    "maxWidth",
    "height",
    "boxShadow",
    "borderCollapse",
];

/// An ordered mapping from property name to string value.
///
/// Insertion order is preserved so that converting back to CSS is stable.
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProperties {
    entries: Vec<(String, String)>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether the key is one of [`WELL_KNOWN_PROPERTIES`].
    pub fn is_well_known(key: &str) -> bool {
        WELL_KNOWN_PROPERTIES.contains(&key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = StyleProperties::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}

impl Serialize for StyleProperties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StyleProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = StyleProperties;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of CSS property names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut props = StyleProperties::new();
                // Optional properties may be serialized as null
                while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
                    if let Some(value) = value {
                        props.set(key, value);
                    }
                }
                Ok(props)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style Value
// ─────────────────────────────────────────────────────────────────────────────

/// A theme rule: either a raw CSS string or a property map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Css(String),
    Properties(StyleProperties),
}

impl Default for StyleValue {
    fn default() -> Self {
        StyleValue::Css(String::new())
    }
}

impl From<&str> for StyleValue {
    fn from(css: &str) -> Self {
        StyleValue::Css(css.to_string())
    }
}

impl From<StyleProperties> for StyleValue {
    fn from(props: StyleProperties) -> Self {
        StyleValue::Properties(props)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

fn kebab_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-([a-z])").expect("valid regex"))
}

fn camel_capital() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z])").expect("valid regex"))
}

/// `font-size` -> `fontSize`
pub fn to_camel_case(key: &str) -> String {
    kebab_segment()
        .replace_all(key, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// `fontSize` -> `font-size`
pub fn to_kebab_case(key: &str) -> String {
    camel_capital()
        .replace_all(key, "-$1")
        .to_lowercase()
}

/// Split a CSS declaration block into trimmed `(name, value)` pairs.
///
/// Names are kept as written. Each declaration is split at its first `:` so
/// values such as `url(https://...)` survive intact. Declarations with an
/// empty name or value are dropped.
pub fn declarations(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter(|decl| !decl.trim().is_empty())
        .filter_map(|decl| {
            let (key, value) = decl.split_once(':')?;
            let (key, value) = (key.trim(), value.trim());
            (!key.is_empty() && !value.is_empty()).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}

/// Parse a CSS declaration string into camelCase-keyed properties.
pub fn parse_css_string(css: &str) -> StyleProperties {
    declarations(css)
        .into_iter()
        .map(|(key, value)| (to_camel_case(&key), value))
        .collect()
}

/// Render properties as a CSS declaration string (`key: value; key: value`).
///
/// Properties with empty values are skipped.
pub fn to_css_string(styles: &StyleProperties) -> String {
    styles
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}: {}", to_kebab_case(key), value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Normalize a theme rule to a CSS string.
pub fn ensure_css_string(style: &StyleValue) -> String {
    match style {
        StyleValue::Css(css) => css.clone(),
        StyleValue::Properties(props) => to_css_string(props),
    }
}

/// Normalize a theme rule to a property map.
pub fn ensure_style_properties(style: &StyleValue) -> StyleProperties {
    match style {
        StyleValue::Css(css) => parse_css_string(css),
        StyleValue::Properties(props) => props.clone(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
