//! Computed-style oracle
//!
//! Reading an element's effective style needs a style engine: something that
//! applies the cascade, inheritance and defaults. In a browser that is
//! `getComputedStyle`. Here it is the [`StyleOracle`] trait, which the export
//! pipeline takes as an explicit dependency.

use crate::dom::Element;

// ─────────────────────────────────────────────────────────────────────────────
// Computed Style
// ─────────────────────────────────────────────────────────────────────────────

/// The computed values of one element, keyed by kebab-case property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    values: Vec<(String, String)>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the computed value of a property. Unknown properties are `None`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a computed value, replacing any earlier one.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((property.to_string(), value)),
        }
    }

    /// Drop a property, if present.
    pub fn remove(&mut self, property: &str) {
        self.values.retain(|(name, _)| name != property);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ComputedStyle {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut style = ComputedStyle::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Oracle
// ─────────────────────────────────────────────────────────────────────────────

/// Where an element sits in the tree being resolved.
#[derive(Debug, Clone, Copy)]
pub struct StyleScope<'a> {
    /// Ancestors from the resolution root down to the direct parent
    pub ancestors: &'a [&'a Element],
    /// The parent's computed style; `None` for the resolution root
    pub parent: Option<&'a ComputedStyle>,
}

impl<'a> StyleScope<'a> {
    /// Scope of the resolution root.
    pub fn root() -> Self {
        Self {
            ancestors: &[],
            parent: None,
        }
    }

    /// Whether any ancestor has the given tag.
    pub fn within(&self, tag: &str) -> bool {
        self.ancestors.iter().any(|a| a.tag == tag)
    }
}

/// Computes the effective style of an element.
///
/// Implementations must be deterministic: resolving the same element in the
/// same scope twice yields the same values.
pub trait StyleOracle {
    fn computed_style(&self, element: &Element, scope: &StyleScope<'_>) -> ComputedStyle;
}

impl<T: StyleOracle + ?Sized> StyleOracle for &T {
    fn computed_style(&self, element: &Element, scope: &StyleScope<'_>) -> ComputedStyle {
        (**self).computed_style(element, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_style_set_replaces() {
        let mut style = ComputedStyle::new();
        style.set("color", "red");
        style.set("font-size", "16px");
        style.set("color", "blue");
        assert_eq!(style.get("color"), Some("blue"));
        assert_eq!(style.iter().count(), 2);
        assert!(style.get("margin").is_none());
    }

    #[test]
    fn test_scope_within() {
        let pre = Element::new("pre");
        let ancestors = [&pre];
        let scope = StyleScope {
            ancestors: &ancestors,
            parent: None,
        };
        assert!(scope.within("pre"));
        assert!(!scope.within("blockquote"));
        assert!(!StyleScope::root().within("pre"));
    }
}
