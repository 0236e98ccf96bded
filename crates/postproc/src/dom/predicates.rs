// ABOUTME: Pure structural queries over annotated nodes used by the post-processors.
// ABOUTME: Marker detection, literal-HTML and fragment-top checks, separator-skipping child lookup.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;

use super::data::{ElementData, NodeData};

// Template/extension marker types, with an optional `/End` suffix.
static TPL_META_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)mw:(?:Transclusion|Param|Extension/[^\s/]+)(/End)?(?:\s|$)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Start,
    End,
}

fn marker_kind(node: NodeRef<'_, NodeData>) -> Option<MarkerKind> {
    let el = node.value().as_element()?;
    if el.name != "meta" {
        return None;
    }
    let caps = TPL_META_TYPE_RE.captures(el.attr("typeof")?)?;
    Some(if caps.get(1).is_some() {
        MarkerKind::End
    } else {
        MarkerKind::Start
    })
}

/// Return the element payload of `node`.
///
/// # Panics
///
/// Panics if `node` is not an element.
pub fn assert_elt(node: NodeRef<'_, NodeData>) -> &ElementData {
    match node.value() {
        NodeData::Element(el) => el,
        other => panic!("expected an element node, found {other:?}"),
    }
}

/// `<meta typeof="mw:Transclusion">` and friends.
pub fn is_tpl_start_marker_meta(node: NodeRef<'_, NodeData>) -> bool {
    marker_kind(node) == Some(MarkerKind::Start)
}

/// `<meta typeof="mw:Transclusion/End">` and friends.
pub fn is_tpl_end_marker_meta(node: NodeRef<'_, NodeData>) -> bool {
    marker_kind(node) == Some(MarkerKind::End)
}

pub fn is_tpl_marker_meta(node: NodeRef<'_, NodeData>) -> bool {
    marker_kind(node).is_some()
}

/// Elements the author wrote as explicit HTML markup (`stx: "html"`).
pub fn is_literal_html_node(node: NodeRef<'_, NodeData>) -> bool {
    node.value()
        .as_element()
        .is_some_and(|el| el.data_parsoid.stx.as_deref() == Some("html"))
}

/// True for the top of the processed fragment: a fragment root or `<body>`.
pub fn at_the_top(node: NodeRef<'_, NodeData>) -> bool {
    match node.value() {
        NodeData::Fragment => true,
        NodeData::Element(el) => el.name == "body",
        _ => false,
    }
}

/// Inter-element whitespace: text made only of spaces, tabs and newlines.
pub fn is_iew(node: NodeRef<'_, NodeData>) -> bool {
    match node.value() {
        NodeData::Text(t) => t.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n')),
        _ => false,
    }
}

/// Anything that is not a comment or inter-element whitespace.
pub fn is_content_node(node: NodeRef<'_, NodeData>) -> bool {
    !matches!(node.value(), NodeData::Comment(_)) && !is_iew(node)
}

pub fn first_non_sep_child(node: NodeRef<'_, NodeData>) -> Option<NodeRef<'_, NodeData>> {
    let mut child = node.first_child();
    while let Some(c) = child {
        if is_content_node(c) {
            return Some(c);
        }
        child = c.next_sibling();
    }
    None
}

pub fn last_non_sep_child(node: NodeRef<'_, NodeData>) -> Option<NodeRef<'_, NodeData>> {
    let mut child = node.last_child();
    while let Some(c) = child {
        if is_content_node(c) {
            return Some(c);
        }
        child = c.prev_sibling();
    }
    None
}
