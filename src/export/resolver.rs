//! Style Resolver
//!
//! Reduces each element's computed style to the declarations worth inlining:
//! only allow-listed properties, and only when the value is not a no-op
//! default.

use crate::dom::Element;
use crate::style::{ComputedStyle, StyleOracle, StyleScope};

// ─────────────────────────────────────────────────────────────────────────────
// Allow-List and Exclusions
// ─────────────────────────────────────────────────────────────────────────────

/// Properties considered for inlining, in output order.
pub const STYLE_ALLOW_LIST: &[&str] = &[
    "color",
    "font-size",
    "line-height",
    "font-weight",
    "background-color",
    "text-align",
    "margin",
    "margin-top",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "padding",
    "padding-top",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "border",
    "border-left",
    "border-right",
    "border-top",
    "border-bottom",
    "border-radius",
    "box-shadow",
    "max-width",
    "display",
    "text-decoration",
    "font-style",
    "letter-spacing",
    "overflow-x",
    "font-family",
    "list-style",
    "list-style-type",
    "text-indent",
    "white-space",
    "word-wrap",
    "word-break",
];

/// Values that change nothing when reapplied inline.
const EXCLUDED_VALUES: &[&str] = &["", "none", "normal", "auto", "0px"];

/// Whether a computed value is dropped from the inline style.
pub fn is_excluded_value(value: &str) -> bool {
    EXCLUDED_VALUES.contains(&value.trim())
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolved Style
// ─────────────────────────────────────────────────────────────────────────────

/// The inlinable declarations of one element, in allow-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    declarations: Vec<(&'static str, String)>,
}

impl ResolvedStyle {
    /// Filter a computed style down to allow-listed, non-default values.
    pub fn from_computed(computed: &ComputedStyle) -> Self {
        let declarations = STYLE_ALLOW_LIST
            .iter()
            .filter_map(|&property| {
                let value = computed.get(property)?.trim();
                (!is_excluded_value(value)).then(|| (property, value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.declarations.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Render as `name:value;` pairs with no separators.
    pub fn to_style_string(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{}:{};", name, value))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve the root and every descendant element, in document order.
///
/// The returned list lines up index-for-index with [`Element::elements`].
pub fn resolve_styles(root: &Element, oracle: &dyn StyleOracle) -> Vec<ResolvedStyle> {
    let mut records = Vec::with_capacity(root.element_count());
    let mut ancestors = Vec::new();
    resolve_into(root, oracle, &mut ancestors, None, &mut records);
    records
}

fn resolve_into<'t>(
    element: &'t Element,
    oracle: &dyn StyleOracle,
    ancestors: &mut Vec<&'t Element>,
    parent: Option<&ComputedStyle>,
    records: &mut Vec<ResolvedStyle>,
) {
    let computed = oracle.computed_style(
        element,
        &StyleScope {
            ancestors: ancestors.as_slice(),
            parent,
        },
    );
    records.push(ResolvedStyle::from_computed(&computed));

    ancestors.push(element);
    for child in element.child_elements() {
        resolve_into(child, oracle, ancestors, Some(&computed), records);
    }
    ancestors.pop();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;

    /// Oracle that returns a fixed style per tag.
    struct TagOracle(Vec<(&'static str, Vec<(&'static str, &'static str)>)>);

    impl StyleOracle for TagOracle {
        fn computed_style(&self, element: &Element, _scope: &StyleScope<'_>) -> ComputedStyle {
            self.0
                .iter()
                .find(|(tag, _)| *tag == element.tag)
                .map(|(_, values)| values.iter().copied().collect())
                .unwrap_or_default()
        }
    }

    #[test]
    fn test_excluded_values_never_appear() {
        let computed: ComputedStyle = [
            ("color", "rgb(0, 0, 0)"),
            ("margin", "0px"),
            ("display", "none"),
            ("letter-spacing", "normal"),
            ("max-width", "auto"),
            ("padding", ""),
            ("border", " none "),
        ]
        .into_iter()
        .collect();

        let resolved = ResolvedStyle::from_computed(&computed);
        assert_eq!(resolved.to_style_string(), "color:rgb(0, 0, 0);");
    }

    #[test]
    fn test_output_follows_allow_list_order() {
        let computed: ComputedStyle = [
            ("word-break", "break-all"),
            ("font-size", "16px"),
            ("color", "red"),
            ("z-index", "3"),
        ]
        .into_iter()
        .collect();

        let resolved = ResolvedStyle::from_computed(&computed);
        assert_eq!(
            resolved.to_style_string(),
            "color:red;font-size:16px;word-break:break-all;"
        );
        assert!(resolved.get("z-index").is_none());
    }

    #[test]
    fn test_resolve_styles_document_order() {
        let root = Element::new("p")
            .with_child(Node::text("Hi "))
            .with_child(Element::new("b").with_child(Node::text("there")))
            .with_child(Element::new("i"));
        let oracle = TagOracle(vec![
            ("p", vec![("color", "rgb(0,0,0)")]),
            ("b", vec![("font-weight", "700")]),
        ]);

        let records = resolve_styles(&root, &oracle);
        assert_eq!(records.len(), root.element_count());
        assert_eq!(records[0].to_style_string(), "color:rgb(0,0,0);");
        assert_eq!(records[1].to_style_string(), "font-weight:700;");
        assert!(records[2].is_empty());
    }

    #[test]
    fn test_resolve_passes_parent_style() {
        struct DepthOracle;

        impl StyleOracle for DepthOracle {
            fn computed_style(&self, _element: &Element, scope: &StyleScope<'_>) -> ComputedStyle {
                let depth = scope.ancestors.len().to_string();
                let mut style = ComputedStyle::new();
                style.set("text-indent", format!("{}em", depth));
                if let Some(color) = scope.parent.and_then(|p| p.get("color")) {
                    style.set("color", color);
                } else {
                    style.set("color", "blue");
                }
                style
            }
        }

        let root = Element::new("div").with_child(Element::new("p").with_child(Element::new("span")));
        let records = resolve_styles(&root, &DepthOracle);
        assert_eq!(records[2].get("text-indent"), Some("2em"));
        assert_eq!(records[2].get("color"), Some("blue"));
    }
}
