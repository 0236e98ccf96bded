// ABOUTME: Wikitext source widths of start/end tags, keyed by HTML tag name.
// ABOUTME: A zero width marks a tag side that contributes no source characters and can be crossed.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Source width of a tag's opening and closing syntax.
///
/// `None` means the width varies with the source (e.g. `|-` vs `|-  `),
/// which never counts as zero-width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Option<u32>, Option<u32>)", into = "(Option<u32>, Option<u32>)")]
pub struct TagWidth {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl TagWidth {
    pub const fn new(start: Option<u32>, end: Option<u32>) -> Self {
        Self { start, end }
    }

    pub fn zero_width_start(&self) -> bool {
        self.start == Some(0)
    }

    pub fn zero_width_end(&self) -> bool {
        self.end == Some(0)
    }
}

impl From<(Option<u32>, Option<u32>)> for TagWidth {
    fn from((start, end): (Option<u32>, Option<u32>)) -> Self {
        Self { start, end }
    }
}

impl From<TagWidth> for (Option<u32>, Option<u32>) {
    fn from(w: TagWidth) -> Self {
        (w.start, w.end)
    }
}

const fn w(start: u32, end: u32) -> TagWidth {
    TagWidth::new(Some(start), Some(end))
}

const fn variable_start(end: u32) -> TagWidth {
    TagWidth::new(None, Some(end))
}

// Widths of the wikitext syntax that produces each tag.
const WT_TAG_WIDTHS: &[(&str, TagWidth)] = &[
    ("body", w(0, 0)),
    ("html", w(0, 0)),
    ("head", w(0, 0)),
    ("p", w(0, 0)),
    ("meta", w(0, 0)),
    ("tbody", w(0, 0)),
    ("br", w(0, 0)),
    ("ul", w(0, 0)),
    ("ol", w(0, 0)),
    ("dl", w(0, 0)),
    ("pre", w(1, 0)),
    ("li", w(1, 0)),
    ("dt", w(1, 0)),
    ("dd", w(1, 0)),
    ("h1", w(1, 1)),
    ("h2", w(2, 2)),
    ("h3", w(3, 3)),
    ("h4", w(4, 4)),
    ("h5", w(5, 5)),
    ("h6", w(6, 6)),
    ("hr", w(4, 0)),
    ("table", w(2, 2)),
    ("tr", variable_start(0)),
    ("td", variable_start(0)),
    ("th", variable_start(0)),
    ("b", w(3, 3)),
    ("i", w(2, 2)),
    ("figure", w(2, 2)),
];

static DEFAULT_TAG_WIDTHS: Lazy<TagWidths> =
    Lazy::new(|| TagWidths::from_entries(WT_TAG_WIDTHS.iter().copied()));

/// Lookup table from tag name to [`TagWidth`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagWidths {
    widths: HashMap<String, TagWidth>,
}

impl TagWidths {
    /// An empty table: no tag is zero-width.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in wikitext table.
    pub fn wikitext() -> Self {
        DEFAULT_TAG_WIDTHS.clone()
    }

    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, TagWidth)>) -> Self {
        let mut table = Self::empty();
        for (name, width) in entries {
            table.insert(name, width);
        }
        table
    }

    /// Parse a JSON object of `{"tag": [start, end]}`, where either side may be `null`.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let parsed: TagWidths = serde_json::from_str(json).map_err(Error::config)?;
        Ok(Self::from_entries(
            parsed.widths.iter().map(|(k, v)| (k.as_str(), *v)),
        ))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, name: &str, width: TagWidth) {
        self.widths.insert(name.to_ascii_lowercase(), width);
    }

    /// Entries of `other` replace entries of `self` with the same tag.
    pub fn merge(&mut self, other: &TagWidths) {
        for (name, width) in &other.widths {
            self.widths.insert(name.clone(), *width);
        }
    }

    pub fn get(&self, name: &str) -> Option<TagWidth> {
        self.widths.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
