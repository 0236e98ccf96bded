// ABOUTME: Arena-backed mutable document tree used by the DOM post-processors.
// ABOUTME: Wraps ego_tree::Tree<NodeData> with DOM-style accessors and insert/detach primitives.

use ego_tree::{NodeId, NodeRef, Tree};

use super::data::{DataParsoid, ElementData, NodeData};

/// An annotated document (or fragment) tree.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Parent, sibling and
/// child links are indices, so relocating a node is a pair of list edits
/// (detach, then insert) and never invalidates other ids. Detached nodes stay
/// in the arena as orphans until the document is dropped.
#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document whose root is a fragment node.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(NodeData::Fragment),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    pub fn node(&self, id: NodeId) -> NodeRef<'_, NodeData> {
        self.tree
            .get(id)
            .expect("node id does not belong to this document")
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        self.node(id).value()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|n| n.id())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.first_child().map(|n| n.id())
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.last_child().map(|n| n.id())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.next_sibling().map(|n| n.id())
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.prev_sibling().map(|n| n.id())
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        self.tree.get(id).is_some_and(|n| n.has_children())
    }

    /// Ids of the children of `id`, in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).children().map(|n| n.id())
    }

    /// Remove `id` (and its subtree) from its parent. No-op for orphans.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(mut node) = self.tree.get_mut(id) {
            node.detach();
        }
    }

    /// Insert `new` into `parent` immediately before `reference`, or as the
    /// last child when `reference` is `None`. `new` is detached from its
    /// current position first.
    ///
    /// # Panics
    ///
    /// Panics if `reference` is not a child of `parent`, or if `new` is
    /// `reference` itself.
    pub fn insert_before(&mut self, parent: NodeId, new: NodeId, reference: Option<NodeId>) {
        self.detach(new);
        match reference {
            Some(reference) => {
                assert_eq!(
                    self.parent(reference),
                    Some(parent),
                    "insert_before: reference node is not a child of parent"
                );
                let mut reference = self
                    .tree
                    .get_mut(reference)
                    .expect("node id does not belong to this document");
                reference.insert_id_before(new);
            }
            None => {
                let mut parent = self
                    .tree
                    .get_mut(parent)
                    .expect("node id does not belong to this document");
                parent.append_id(new);
            }
        }
    }

    /// Append a new node with the given payload as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let mut parent = self
            .tree
            .get_mut(parent)
            .expect("node id does not belong to this document");
        parent.append(data).id()
    }

    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> NodeId {
        self.append(parent, NodeData::Element(element))
    }

    /// Append `<name>` with the given annotation record and no attributes.
    pub fn append_tag(&mut self, parent: NodeId, name: &str, dp: DataParsoid) -> NodeId {
        self.append_element(parent, ElementData::new(name).with_data_parsoid(dp))
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeData::Text(text.into()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.append(parent, NodeData::Comment(text.into()))
    }

    /// Append a template start marker, `<meta typeof="{marker_type}">`.
    pub fn append_start_marker(&mut self, parent: NodeId, marker_type: &str) -> NodeId {
        self.append_element(
            parent,
            ElementData::new("meta").with_attr("typeof", marker_type),
        )
    }

    /// Append a template end marker, `<meta typeof="{marker_type}/End">`.
    pub fn append_end_marker(&mut self, parent: NodeId, marker_type: &str) -> NodeId {
        self.append_element(
            parent,
            ElementData::new("meta").with_attr("typeof", format!("{marker_type}/End")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(doc: &Document, parent: NodeId) -> Vec<String> {
        doc.children(parent)
            .map(|id| match doc.data(id) {
                NodeData::Element(el) => el.name.clone(),
                NodeData::Text(t) => format!("#text:{t}"),
                NodeData::Comment(c) => format!("#comment:{c}"),
                NodeData::Fragment => "#fragment".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_insert_before_reference_moves_node() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_tag(root, "div", DataParsoid::default());
        let inner = doc.append_text(div, "x");
        let after = doc.append_tag(root, "p", DataParsoid::default());

        doc.insert_before(root, inner, Some(div));

        assert_eq!(names(&doc, root), vec!["#text:x", "div", "p"]);
        assert!(!doc.has_children(div));
        assert_eq!(doc.parent(inner), Some(root));
        assert_eq!(doc.next_sibling(inner), Some(div));
        assert_eq!(doc.prev_sibling(after), Some(div));
    }

    #[test]
    fn test_insert_before_none_appends() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_tag(root, "a", DataParsoid::default());
        let b = doc.append_tag(root, "b", DataParsoid::default());
        let t = doc.append_text(a, "t");

        doc.insert_before(root, t, None);

        assert_eq!(names(&doc, root), vec!["a", "b", "#text:t"]);
        assert_eq!(doc.last_child(root), Some(t));
        assert_eq!(doc.prev_sibling(t), Some(b));
    }

    #[test]
    fn test_detach_leaves_orphan() {
        let mut doc = Document::new();
        let root = doc.root();
        let c = doc.append_comment(root, "gone");
        doc.detach(c);
        assert_eq!(doc.first_child(root), None);
        assert_eq!(doc.parent(c), None);
        // Detaching twice is harmless.
        doc.detach(c);
    }

    #[test]
    fn test_marker_builders_set_typeof() {
        let mut doc = Document::new();
        let root = doc.root();
        let s = doc.append_start_marker(root, "mw:Transclusion");
        let e = doc.append_end_marker(root, "mw:Transclusion");
        let attr = |id| doc.data(id).as_element().and_then(|el| el.attr("typeof"));
        assert_eq!(attr(s), Some("mw:Transclusion"));
        assert_eq!(attr(e), Some("mw:Transclusion/End"));
    }

    #[test]
    #[should_panic(expected = "not a child of parent")]
    fn test_insert_before_rejects_foreign_reference() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_tag(root, "div", DataParsoid::default());
        let inner = doc.append_text(div, "x");
        let other = doc.append_text(root, "y");
        doc.insert_before(root, other, Some(inner));
    }
}
