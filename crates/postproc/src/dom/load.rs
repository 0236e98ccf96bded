// ABOUTME: Builds the annotated tree from HTML text using scraper's html5ever parser.
// ABOUTME: data-parsoid attributes are lifted out of the attribute list into DataParsoid records.

use ego_tree::NodeId;
use scraper::Html;

use super::data::{DataParsoid, ElementData};
use super::tree::Document;
use crate::error::{Error, Result};

/// Parse an HTML fragment (body context) into a [`Document`] whose root is a
/// fragment node.
///
/// Parsing follows the HTML5 tree construction rules, so table content is
/// normalized the way a browser would (implied `tbody`, fostered content).
pub fn load_fragment(html: &str) -> Result<Document> {
    let parsed = Html::parse_fragment(html);
    let mut doc = Document::new();
    let root = doc.root();
    // parse_fragment wraps the nodes in an <html> element.
    convert_children(*parsed.root_element(), &mut doc, root)?;
    Ok(doc)
}

/// Parse a full HTML document. The `<body>` element is the top of the
/// processed fragment.
pub fn load_document(html: &str) -> Result<Document> {
    let parsed = Html::parse_document(html);
    let mut doc = Document::new();
    let root = doc.root();
    convert_children(parsed.tree.root(), &mut doc, root)?;
    Ok(doc)
}

fn convert_children(
    src: ego_tree::NodeRef<'_, scraper::Node>,
    doc: &mut Document,
    parent: NodeId,
) -> Result<()> {
    for child in src.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                doc.append_text(parent, &**text);
            }
            scraper::Node::Comment(comment) => {
                doc.append_comment(parent, &**comment);
            }
            scraper::Node::Element(el) => {
                let id = doc.append_element(parent, convert_element(el)?);
                convert_children(child, doc, id)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn convert_element(el: &scraper::node::Element) -> Result<ElementData> {
    let mut data = ElementData::new(el.name());
    for (name, value) in el.attrs() {
        if name == "data-parsoid" {
            data.data_parsoid = serde_json::from_str::<DataParsoid>(value)
                .map_err(|e| Error::invalid_data_parsoid(el.name(), e))?;
        } else {
            data.attrs.push((name.to_string(), value.to_string()));
        }
    }
    Ok(data)
}
