//! Tree Cloner + Style Inliner
//!
//! Produces the export-ready copy of a rendered tree: same shape and content,
//! each element carrying its resolved style inline, with every `class` and
//! `id` attribute removed.

use log::debug;

use super::resolver::ResolvedStyle;
use crate::dom::{Element, Node};
use crate::error::{Error, Result};
use crate::style::{ComputedStyle, StyleOracle, StyleScope};

/// Apply one record to one cloned element.
fn inline_element(clone: &mut Element, record: &ResolvedStyle) {
    if !record.is_empty() {
        clone.set_attr("style", &record.to_style_string());
    }
    clone.remove_attr("class");
    clone.remove_attr("id");
}

// ─────────────────────────────────────────────────────────────────────────────
// Two-Pass Inlining
// ─────────────────────────────────────────────────────────────────────────────

/// Clone `root` and apply previously resolved records by document order.
///
/// `records` must come from [`resolve_styles`](super::resolve_styles) on the
/// same, unmodified tree. If the counts disagree nothing is produced.
pub fn apply_styles(root: &Element, records: &[ResolvedStyle]) -> Result<Element> {
    let cloned = root.element_count();
    if cloned != records.len() {
        return Err(Error::NodeCountMismatch {
            resolved: records.len(),
            cloned,
        });
    }

    let mut clone = root.clone();
    let mut index = 0;
    apply_in_order(&mut clone, records, &mut index);
    debug_assert_eq!(index, records.len());
    Ok(clone)
}

fn apply_in_order(element: &mut Element, records: &[ResolvedStyle], index: &mut usize) {
    inline_element(element, &records[*index]);
    *index += 1;
    for child in &mut element.children {
        if let Node::Element(child) = child {
            apply_in_order(child, records, index);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Synchronized Inlining
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve and clone in a single traversal of the original tree.
///
/// Each clone node is built from the original node it was resolved from, so
/// the pairing cannot drift the way index-based pairing can.
pub fn inline_tree(root: &Element, oracle: &dyn StyleOracle) -> Element {
    let mut ancestors = Vec::new();
    let clone = inline_subtree(root, oracle, &mut ancestors, None);
    debug!("Inlined styles on {} elements", clone.element_count());
    clone
}

fn inline_subtree<'t>(
    original: &'t Element,
    oracle: &dyn StyleOracle,
    ancestors: &mut Vec<&'t Element>,
    parent: Option<&ComputedStyle>,
) -> Element {
    let computed = oracle.computed_style(
        original,
        &StyleScope {
            ancestors: ancestors.as_slice(),
            parent,
        },
    );

    let mut clone = Element {
        tag: original.tag.clone(),
        attrs: original.attrs.clone(),
        children: Vec::with_capacity(original.children.len()),
    };
    inline_element(&mut clone, &ResolvedStyle::from_computed(&computed));

    ancestors.push(original);
    for child in &original.children {
        let child = match child {
            Node::Element(element) => {
                Node::Element(inline_subtree(element, oracle, ancestors, Some(&computed)))
            }
            other => other.clone(),
        };
        clone.children.push(child);
    }
    ancestors.pop();

    clone
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;
    use crate::export::resolver::resolve_styles;
    use crate::style::ThemeCascade;
    use crate::theme::builtin::default_theme;

    struct TagOracle;

    impl StyleOracle for TagOracle {
        fn computed_style(&self, element: &Element, _scope: &StyleScope<'_>) -> ComputedStyle {
            match element.tag.as_str() {
                "p" => [("color", "rgb(0,0,0)"), ("margin", "0px")].into_iter().collect(),
                "b" => [("font-weight", "700")].into_iter().collect(),
                _ => ComputedStyle::new(),
            }
        }
    }

    /// Oracle that reports only `display`, so it is unaffected by inline styles.
    struct DisplayOracle;

    impl StyleOracle for DisplayOracle {
        fn computed_style(&self, element: &Element, _scope: &StyleScope<'_>) -> ComputedStyle {
            let display = if element.tag == "p" { "block" } else { "inline" };
            [("display", display)].into_iter().collect()
        }
    }

    fn parse_root(html: &str) -> Element {
        Element::wrap("section", parse_fragment(html))
    }

    fn has_class_or_id(element: &Element) -> bool {
        element
            .elements()
            .any(|e| e.has_attr("class") || e.has_attr("id"))
    }

    #[test]
    fn test_scenario_paragraph_with_bold() {
        let nodes = parse_fragment(r#"<p class="x">Hi <b>there</b></p>"#);
        let p = nodes[0].as_element().unwrap();

        let clone = inline_tree(p, &TagOracle);
        assert_eq!(
            clone.outer_html(),
            r#"<p style="color:rgb(0,0,0);">Hi <b style="font-weight:700;">there</b></p>"#
        );
        assert_eq!(clone.text_content(), "Hi there");
    }

    #[test]
    fn test_two_pass_matches_synchronized() {
        let root = parse_root(r#"<p id="a" class="c">x <b class="k">y</b></p><p>z</p>"#);
        let records = resolve_styles(&root, &TagOracle);

        let two_pass = apply_styles(&root, &records).unwrap();
        let synchronized = inline_tree(&root, &TagOracle);
        assert_eq!(two_pass, synchronized);
    }

    #[test]
    fn test_count_mismatch_is_rejected() {
        let root = parse_root("<p>a</p>");
        let mut records = resolve_styles(&root, &TagOracle);
        records.pop();

        let err = apply_styles(&root, &records).unwrap_err();
        assert!(matches!(err, Error::NodeCountMismatch { resolved: 1, cloned: 2 }));
    }

    #[test]
    fn test_clone_has_no_class_or_id_and_same_shape() {
        let root = parse_root(
            r#"<h1 id="t" class="title">T</h1><ul class="l"><li id="i1">a</li><li>b <code class="c">c</code></li></ul><table><tr><td class="x">1</td></tr></table>"#,
        );
        let theme = default_theme();
        let clone = inline_tree(&root, &ThemeCascade::new(&theme));

        assert!(!has_class_or_id(&clone));
        assert_eq!(clone.element_count(), root.element_count());
        let original_tags: Vec<&str> = root.elements().map(|e| e.tag.as_str()).collect();
        let clone_tags: Vec<&str> = clone.elements().map(|e| e.tag.as_str()).collect();
        assert_eq!(original_tags, clone_tags);
        assert_eq!(clone.text_content(), root.text_content());
    }

    #[test]
    fn test_existing_inline_style_is_overwritten() {
        let root = parse_root(r#"<p style="color: blue">a</p>"#);
        let clone = inline_tree(&root, &TagOracle);
        let p = clone.child_elements().next().unwrap();
        assert_eq!(p.attr("style"), Some("color:rgb(0,0,0);"));
    }

    #[test]
    fn test_empty_record_keeps_structural_style() {
        let root = parse_root(r#"<span style="color: blue" class="c">a</span>"#);
        let clone = inline_tree(&root, &TagOracle);
        let span = clone.child_elements().next().unwrap();
        assert_eq!(span.attr("style"), Some("color: blue"));
        assert!(!span.has_attr("class"));
    }

    #[test]
    fn test_reinlining_does_not_accumulate() {
        let theme = default_theme();
        let cascade = ThemeCascade::new(&theme);
        let root = parse_root("<h2>T</h2><p>a <strong>b</strong> <a href=\"#\">c</a></p><blockquote><p>q</p></blockquote>");

        let first = inline_tree(&root, &cascade);
        let second = inline_tree(&first, &cascade);

        for (a, b) in first.elements().zip(second.elements()) {
            let first_decls: Vec<&str> = a.attr("style").unwrap_or("").split(';').collect();
            let second_style = b.attr("style").unwrap_or("");
            for decl in second_style.split(';').filter(|d| !d.is_empty()) {
                assert!(first_decls.contains(&decl), "{} not in {:?}", decl, first_decls);
            }
            let mut names: Vec<&str> = second_style
                .split(';')
                .filter_map(|d| d.split_once(':').map(|(k, _)| k))
                .collect();
            let total = names.len();
            names.dedup();
            assert_eq!(names.len(), total);
        }
    }

    fn declaration_names(style: &str) -> Vec<&str> {
        style
            .split(';')
            .filter_map(|d| d.split_once(':').map(|(k, _)| k))
            .collect()
    }

    #[test]
    fn test_reinlining_restores_theme_values_behind_noop_overrides() {
        // A no-op override is dropped on the first pass, so nothing remains to
        // hide the theme value from the second pass.
        let theme = default_theme();
        let cascade = ThemeCascade::new(&theme);
        let root = parse_root(r#"<p style="letter-spacing: normal; margin: 0px">x</p>"#);

        let first = inline_tree(&root, &cascade);
        let second = inline_tree(&first, &cascade);

        let first_p = first.child_elements().next().unwrap().attr("style").unwrap();
        let second_p = second.child_elements().next().unwrap().attr("style").unwrap();
        assert!(!declaration_names(first_p).contains(&"margin"));
        assert!(!declaration_names(first_p).contains(&"letter-spacing"));
        assert!(second_p.contains("margin:16px 0;"));
        assert!(second_p.contains("letter-spacing:0.5px;"));
    }

    #[test]
    fn test_display_only_oracle_idempotent() {
        let root = parse_root(r#"<p class="a">x<b>y</b></p>"#);
        let first = inline_tree(&root, &DisplayOracle);
        let second = inline_tree(&first, &DisplayOracle);
        assert_eq!(first, second);
    }
}
