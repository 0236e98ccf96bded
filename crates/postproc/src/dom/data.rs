// ABOUTME: Node payloads for the annotated tree: fragment roots, elements, text and comments.
// ABOUTME: DataParsoid is the per-element provenance record carried in the data-parsoid attribute.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provenance metadata attached to an element by the tokenizer/expander.
///
/// Only the fields the post-processors consult are typed; every other key is
/// kept in `extra` so the record survives a load/serialize round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataParsoid {
    /// The opening tag was synthesized, not written by the author.
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_inserted_start: bool,

    /// The closing tag was synthesized, not written by the author.
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_inserted_end: bool,

    /// Source syntax of the element, `"html"` for explicitly written markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stx: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl DataParsoid {
    /// Record for an element written as literal HTML (`stx: "html"`).
    pub fn literal_html() -> Self {
        Self {
            stx: Some("html".to_string()),
            ..Self::default()
        }
    }

    /// Record for an element whose start tag was auto-inserted.
    pub fn auto_start() -> Self {
        Self {
            auto_inserted_start: true,
            ..Self::default()
        }
    }

    /// Record for an element whose end tag was auto-inserted.
    pub fn auto_end() -> Self {
        Self {
            auto_inserted_end: true,
            ..Self::default()
        }
    }

    /// True if nothing would be written to the `data-parsoid` attribute.
    pub fn is_empty(&self) -> bool {
        !self.auto_inserted_start
            && !self.auto_inserted_end
            && self.stx.is_none()
            && self.extra.is_empty()
    }
}

/// An element: lowercase tag name, ordered attributes and its annotation record.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub data_parsoid: DataParsoid,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            data_parsoid: DataParsoid::default(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_data_parsoid(mut self, dp: DataParsoid) -> Self {
        self.data_parsoid = dp;
        self
    }

    /// Value of the first attribute with the given name (ASCII case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Top of a processed fragment. Nothing migrates across it.
    Fragment,
    Element(ElementData),
    Text(String),
    Comment(String),
}

impl NodeData {
    pub fn as_element(&self) -> Option<&ElementData> {
        match self {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name for elements, `None` otherwise.
    pub fn node_name(&self) -> Option<&str> {
        self.as_element().map(|el| el.name.as_str())
    }
}
