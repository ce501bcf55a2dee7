//! Theme-driven style cascade
//!
//! [`ThemeCascade`] is the native [`StyleOracle`]: it computes an element's
//! style from the active theme the way a browser would from a stylesheet
//! holding the theme's rules. Precedence, lowest first:
//!
//! 1. values inherited from the parent (or the theme's global style at the root)
//! 2. user-agent defaults for the tag
//! 3. the theme rule for the tag
//! 4. the element's own `style` attribute
//!
//! Keyword font weights are normalized to numbers and relative font sizes
//! are resolved to pixels, matching what `getComputedStyle` reports.

use log::trace;

use super::oracle::{ComputedStyle, StyleOracle, StyleScope};
use super::properties::{declarations, ensure_css_string};
use crate::dom::Element;
use crate::theme::{Theme, ThemeElement};

/// Properties whose computed value passes from parent to child.
const INHERITED_PROPERTIES: &[&str] = &[
    "color",
    "font-size",
    "font-family",
    "font-weight",
    "font-style",
    "line-height",
    "letter-spacing",
    "text-align",
    "text-indent",
    "white-space",
    "word-wrap",
    "word-break",
    "list-style",
    "list-style-type",
];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "dd", "dt", "figure", "figcaption",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "ul",
];

/// Fallback root font size when the theme's global size is not in pixels.
const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Cascade
// ─────────────────────────────────────────────────────────────────────────────

/// Computes element styles from a [`Theme`].
#[derive(Debug, Clone, Copy)]
pub struct ThemeCascade<'t> {
    theme: &'t Theme,
}

impl<'t> ThemeCascade<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        self.theme
    }

    fn root_font_size(&self) -> f64 {
        parse_px(&self.theme.styles.global.font_size).unwrap_or(DEFAULT_FONT_SIZE_PX)
    }

    fn inherit(&self, style: &mut ComputedStyle, parent: Option<&ComputedStyle>) {
        match parent {
            Some(parent) => {
                for property in INHERITED_PROPERTIES {
                    if let Some(value) = parent.get(property) {
                        style.set(property, value);
                    }
                }
            }
            None => {
                let global = &self.theme.styles.global;
                style.set("color", global.color.as_str());
                style.set("font-size", global.font_size.as_str());
                style.set("line-height", global.line_height.as_str());
                style.set("font-family", global.font_family.as_str());
                style.set("font-weight", "400");
                style.set("background-color", global.background_color.as_str());
            }
        }
    }

    fn theme_rule(&self, element: &Element, scope: &StyleScope<'_>) -> Option<String> {
        let kind = ThemeElement::for_tag(&element.tag)?;
        // Code blocks style their inner <code> through the pre rule
        if kind == ThemeElement::Code && scope.within("pre") {
            return None;
        }
        Some(ensure_css_string(self.theme.styles.rule(kind)))
    }
}

impl StyleOracle for ThemeCascade<'_> {
    fn computed_style(&self, element: &Element, scope: &StyleScope<'_>) -> ComputedStyle {
        let mut style = ComputedStyle::new();
        self.inherit(&mut style, scope.parent);

        for (property, value) in user_agent_defaults(&element.tag) {
            style.set(property, *value);
        }

        if let Some(css) = self.theme_rule(element, scope) {
            apply_declarations(&mut style, &css);
        }

        if let Some(css) = element.attr("style") {
            apply_declarations(&mut style, css);
        }

        let parent_font_size = scope
            .parent
            .and_then(|p| p.get("font-size"))
            .and_then(parse_px)
            .unwrap_or_else(|| self.root_font_size());
        normalize(&mut style, parent_font_size, self.root_font_size());

        trace!("Computed {} properties for <{}>", style.iter().count(), element.tag);
        style
    }
}

fn apply_declarations(style: &mut ComputedStyle, css: &str) {
    for (property, value) in declarations(css) {
        let property = property.to_ascii_lowercase();
        let value = value.trim_end_matches("!important").trim_end();
        for longhand in covered_longhands(&property) {
            style.remove(longhand);
        }
        style.set(&property, value);
    }
}

/// Longhands a shorthand declaration resets.
fn covered_longhands(shorthand: &str) -> &'static [&'static str] {
    match shorthand {
        "margin" => &["margin-top", "margin-right", "margin-bottom", "margin-left"],
        "padding" => &["padding-top", "padding-right", "padding-bottom", "padding-left"],
        "border" => &["border-top", "border-right", "border-bottom", "border-left"],
        "list-style" => &["list-style-type"],
        _ => &[],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User-Agent Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn user_agent_defaults(tag: &str) -> &'static [(&'static str, &'static str)] {
    match tag {
        "h1" => &[("display", "block"), ("font-size", "2em"), ("font-weight", "700")],
        "h2" => &[("display", "block"), ("font-size", "1.5em"), ("font-weight", "700")],
        "h3" => &[("display", "block"), ("font-size", "1.17em"), ("font-weight", "700")],
        "h4" => &[("display", "block"), ("font-weight", "700")],
        "h5" => &[("display", "block"), ("font-size", "0.83em"), ("font-weight", "700")],
        "h6" => &[("display", "block"), ("font-size", "0.67em"), ("font-weight", "700")],
        "b" | "strong" => &[("display", "inline"), ("font-weight", "700")],
        "em" | "i" | "cite" => &[("display", "inline"), ("font-style", "italic")],
        "a" | "u" | "ins" => &[("display", "inline"), ("text-decoration", "underline")],
        "del" | "s" | "strike" => &[("display", "inline"), ("text-decoration", "line-through")],
        "code" | "kbd" | "samp" => &[("display", "inline"), ("font-family", "monospace")],
        "pre" => &[
            ("display", "block"),
            ("font-family", "monospace"),
            ("white-space", "pre"),
        ],
        "ul" => &[
            ("display", "block"),
            ("list-style-type", "disc"),
            ("padding-left", "40px"),
        ],
        "ol" => &[
            ("display", "block"),
            ("list-style-type", "decimal"),
            ("padding-left", "40px"),
        ],
        "li" => &[("display", "list-item")],
        "table" => &[("display", "table")],
        "thead" => &[("display", "table-header-group")],
        "tbody" => &[("display", "table-row-group")],
        "tr" => &[("display", "table-row")],
        "td" => &[("display", "table-cell")],
        "th" => &[("display", "table-cell"), ("font-weight", "700")],
        tag if BLOCK_TAGS.contains(&tag) => &[("display", "block")],
        _ => &[("display", "inline")],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Value Normalization
// ─────────────────────────────────────────────────────────────────────────────

fn normalize(style: &mut ComputedStyle, parent_font_size: f64, root_font_size: f64) {
    if let Some(weight) = style.get("font-weight") {
        let weight = match weight {
            "normal" => Some("400"),
            "bold" => Some("700"),
            _ => None,
        };
        if let Some(weight) = weight {
            style.set("font-weight", weight);
        }
    }

    if let Some(size) = style.get("font-size") {
        if let Some(px) = resolve_font_size(size, parent_font_size, root_font_size) {
            style.set("font-size", format_px(px));
        }
    }
}

/// Resolve a relative font size to pixels. Returns `None` when the value is
/// already absolute or not understood.
fn resolve_font_size(value: &str, parent_px: f64, root_px: f64) -> Option<f64> {
    let value = value.trim();
    if let Some(rem) = value.strip_suffix("rem") {
        return rem.trim().parse::<f64>().ok().map(|n| n * root_px);
    }
    if let Some(em) = value.strip_suffix("em") {
        return em.trim().parse::<f64>().ok().map(|n| n * parent_px);
    }
    if let Some(percent) = value.strip_suffix('%') {
        return percent.trim().parse::<f64>().ok().map(|n| n * parent_px / 100.0);
    }
    None
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// Format a pixel length the way browsers report it (`24px`, `18.72px`).
fn format_px(px: f64) -> String {
    let rounded = (px * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{}px", rounded)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;
    use crate::theme::builtin::default_theme;
    use crate::theme::{GlobalStyle, ThemeStyles};

    fn theme() -> Theme {
        Theme {
            id: "test".to_string(),
            name: "Test".to_string(),
            is_custom: true,
            styles: ThemeStyles {
                global: GlobalStyle {
                    font_size: "16px".to_string(),
                    color: "#333".to_string(),
                    ..GlobalStyle::default()
                },
                h1: "font-size: 1.5em; color: #111".into(),
                p: StyleValue::from("margin: 10px 0; font-weight: bold"),
                code: "background-color: #eee".into(),
                pre: "padding: 12px".into(),
                ..ThemeStyles::default()
            },
        }
    }

    #[test]
    fn test_root_takes_global_style() {
        let theme = theme();
        let cascade = ThemeCascade::new(&theme);
        let style = cascade.computed_style(&Element::new("section"), &StyleScope::root());

        assert_eq!(style.get("color"), Some("#333"));
        assert_eq!(style.get("font-size"), Some("16px"));
        assert_eq!(style.get("background-color"), Some("#ffffff"));
        assert_eq!(style.get("display"), Some("block"));
    }

    #[test]
    fn test_theme_rule_and_normalization() {
        let theme = theme();
        let cascade = ThemeCascade::new(&theme);
        let root = cascade.computed_style(&Element::new("section"), &StyleScope::root());
        let section = Element::new("section");
        let ancestors = [&section];
        let scope = StyleScope {
            ancestors: &ancestors,
            parent: Some(&root),
        };

        let h1 = cascade.computed_style(&Element::new("h1"), &scope);
        assert_eq!(h1.get("font-size"), Some("24px"));
        assert_eq!(h1.get("color"), Some("#111"));
        assert_eq!(h1.get("font-weight"), Some("700"));

        let p = cascade.computed_style(&Element::new("p"), &scope);
        assert_eq!(p.get("margin"), Some("10px 0"));
        assert_eq!(p.get("font-weight"), Some("700"));
        assert!(p.get("background-color").is_none());
    }

    #[test]
    fn test_inline_style_wins_over_theme() {
        let theme = theme();
        let cascade = ThemeCascade::new(&theme);
        let root = cascade.computed_style(&Element::new("section"), &StyleScope::root());
        let section = Element::new("section");
        let ancestors = [&section];
        let scope = StyleScope {
            ancestors: &ancestors,
            parent: Some(&root),
        };

        let p = Element::new("p").with_attr("style", "color: red !important; font-size: 50%");
        let style = cascade.computed_style(&p, &scope);
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("font-size"), Some("8px"));
    }

    #[test]
    fn test_code_inside_pre_skips_inline_code_rule() {
        let theme = theme();
        let cascade = ThemeCascade::new(&theme);
        let pre = Element::new("pre");
        let ancestors = [&pre];
        let scope = StyleScope {
            ancestors: &ancestors,
            parent: None,
        };
        let code = cascade.computed_style(&Element::new("code"), &scope);
        assert!(code.get("background-color").map_or(true, |v| v != "#eee"));

        let inline = cascade.computed_style(&Element::new("code"), &StyleScope::root());
        assert_eq!(inline.get("background-color"), Some("#eee"));
    }

    #[test]
    fn test_resolve_font_size_units() {
        assert_eq!(resolve_font_size("2em", 16.0, 16.0), Some(32.0));
        assert_eq!(resolve_font_size("1.5rem", 10.0, 16.0), Some(24.0));
        assert_eq!(resolve_font_size("150%", 12.0, 16.0), Some(18.0));
        assert_eq!(resolve_font_size("14px", 12.0, 16.0), None);
        assert_eq!(resolve_font_size("large", 12.0, 16.0), None);
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(24.0), "24px");
        assert_eq!(format_px(18.72), "18.72px");
        assert_eq!(format_px(18.7200001), "18.72px");
    }

    #[test]
    fn test_inline_shorthand_resets_longhands() {
        let theme = default_theme();
        let cascade = ThemeCascade::new(&theme);

        let ul = Element::new("ul").with_attr("style", "padding: 0");
        let style = cascade.computed_style(&ul, &StyleScope::root());
        assert_eq!(style.get("padding"), Some("0"));
        assert!(style.get("padding-left").is_none());

        let a = Element::new("a").with_attr("style", "border: 1px solid red");
        let style = cascade.computed_style(&a, &StyleScope::root());
        assert_eq!(style.get("border"), Some("1px solid red"));
        assert!(style.get("border-bottom").is_none());
    }

    #[test]
    fn test_longhand_after_shorthand_is_kept() {
        let theme = default_theme();
        let cascade = ThemeCascade::new(&theme);
        let hr = cascade.computed_style(&Element::new("hr"), &StyleScope::root());
        assert_eq!(hr.get("border"), Some("none"));
        assert_eq!(hr.get("border-top"), Some("1px solid #e5e5e5"));

        let ol = Element::new("ol").with_attr("style", "list-style: none");
        let style = cascade.computed_style(&ol, &StyleScope::root());
        assert!(style.get("list-style-type").is_none());
    }

    #[test]
    fn test_phrasing_elements_are_inline() {
        let theme = theme();
        let cascade = ThemeCascade::new(&theme);
        for tag in ["a", "b", "strong", "em", "i", "code", "del", "span"] {
            let style = cascade.computed_style(&Element::new(tag), &StyleScope::root());
            assert_eq!(style.get("display"), Some("inline"), "<{}>", tag);
        }
        let th = cascade.computed_style(&Element::new("th"), &StyleScope::root());
        assert_eq!(th.get("display"), Some("table-cell"));
        assert_eq!(th.get("font-weight"), Some("700"));
    }

    #[test]
    fn test_builtin_theme_resolves() {
        let theme = default_theme();
        let cascade = ThemeCascade::new(&theme);
        let style = cascade.computed_style(&Element::new("h2"), &StyleScope::root());
        assert_eq!(style.get("font-size"), Some("20px"));
        assert_eq!(style.get("border-left"), Some("4px solid #07c160"));
    }
}
