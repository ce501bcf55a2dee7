//! HTML5 fragment parsing
//!
//! Parses sanitized markup with html5ever into an rcdom and converts the
//! result into the owned [`Node`] tree.

use html5ever::tendril::TendrilSink;
use html5ever::{
    local_name, namespace_url, ns, parse_fragment as parse_html_fragment, ParseOpts, QualName,
};
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use super::{Element, Node};

/// Parse an HTML fragment as if it were the contents of `<body>`.
///
/// Doctypes and processing instructions are dropped; elements, text and
/// comments are kept in document order.
pub fn parse_fragment(html: &str) -> Vec<Node> {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let dom = parse_html_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(html);

    if !dom.errors.is_empty() {
        debug!("HTML fragment parsed with {} recoverable errors", dom.errors.len());
    }

    // Fragment parsing yields Document > html > (fragment children)
    let document_children = dom.document.children.borrow();
    document_children
        .iter()
        .flat_map(|html_root| html_root.children.borrow().clone())
        .filter_map(|handle| convert(&handle))
        .collect()
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::new(name.local.to_string());
            element.attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect();
            element.children = handle
                .children
                .borrow()
                .iter()
                .filter_map(convert)
                .collect();
            Some(Node::Element(element))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        _ => None,
    }
}
