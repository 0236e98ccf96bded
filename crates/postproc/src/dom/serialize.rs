// ABOUTME: HTML serialization of the annotated tree.
// ABOUTME: Annotation records are written back out as data-parsoid JSON attributes.

use ego_tree::{NodeId, NodeRef};

use super::data::{ElementData, NodeData};
use super::tree::Document;

/// Serialize the children of the document root.
pub fn to_html(doc: &Document) -> String {
    serialize_children(doc, doc.root())
}

/// Serialize `id` itself; a fragment node serializes as its children.
pub fn serialize_node(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc.node(id), &mut out);
    out
}

/// Serialize the children of `id` (its "inner HTML").
pub fn serialize_children(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    for child in doc.node(id).children() {
        write_node(child, &mut out);
    }
    out
}

fn write_node(node: NodeRef<'_, NodeData>, out: &mut String) {
    match node.value() {
        NodeData::Fragment => {
            for child in node.children() {
                write_node(child, out);
            }
        }
        NodeData::Text(t) => {
            let raw = node
                .parent()
                .and_then(|p| p.value().node_name().map(is_raw_text_element))
                .unwrap_or(false);
            if raw {
                out.push_str(t);
            } else {
                out.push_str(&escape_text(t));
            }
        }
        NodeData::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        NodeData::Element(el) => {
            write_start_tag(el, out);
            if is_void_element(&el.name) {
                return;
            }
            for child in node.children() {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(&el.name);
            out.push('>');
        }
    }
}

fn write_start_tag(el: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (k, v) in &el.attrs {
        push_attr(out, k, v);
    }
    if !el.data_parsoid.is_empty() {
        if let Ok(json) = serde_json::to_string(&el.data_parsoid) {
            push_attr(out, "data-parsoid", &json);
        }
    }
    if is_void_element(&el.name) {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attr(value));
    out.push('"');
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Check if tag is void element
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::data::DataParsoid;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_elements_text_and_comments() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, ElementData::new("p").with_attr("class", "a\"b"));
        doc.append_text(p, "1 < 2 & 3");
        doc.append_tag(p, "br", DataParsoid::default());
        doc.append_comment(root, " note ");

        assert_eq!(
            to_html(&doc),
            r#"<p class="a&quot;b">1 &lt; 2 &amp; 3<br /></p><!-- note -->"#
        );
    }

    #[test]
    fn test_serialize_data_parsoid() {
        let mut doc = Document::new();
        let root = doc.root();
        let i = doc.append_tag(root, "i", DataParsoid::auto_end());
        doc.append_text(i, "x");

        assert_eq!(
            to_html(&doc),
            r#"<i data-parsoid="{&quot;autoInsertedEnd&quot;:true}">x</i>"#
        );
    }

    #[test]
    fn test_serialize_node_includes_self() {
        let mut doc = Document::new();
        let root = doc.root();
        let ul = doc.append_tag(root, "ul", DataParsoid::default());
        let li = doc.append_tag(ul, "li", DataParsoid::default());
        doc.append_text(li, "item");

        assert_eq!(serialize_node(&doc, ul), "<ul><li>item</li></ul>");
        assert_eq!(serialize_children(&doc, ul), "<li>item</li>");
        assert_eq!(serialize_node(&doc, root), to_html(&doc));
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let mut doc = Document::new();
        let root = doc.root();
        let style = doc.append_tag(root, "style", DataParsoid::default());
        doc.append_text(style, "a > b { color: red }");

        assert_eq!(to_html(&doc), "<style>a > b { color: red }</style>");
    }
}
