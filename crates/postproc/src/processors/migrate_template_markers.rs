// ABOUTME: Moves template/extension boundary metas as close as possible to the content they delimit.
// ABOUTME: Markers only cross tag boundaries that are zero-width in the source or auto-inserted.

use ego_tree::NodeId;

use crate::dom::predicates::{
    assert_elt, at_the_top, first_non_sep_child, is_literal_html_node, is_tpl_end_marker_meta,
    is_tpl_start_marker_meta, last_non_sep_child,
};
use crate::dom::Document;
use crate::env::{Env, ProcessorOptions};
use crate::processors::DomProcessor;

/// Migrates template start/end metas out of wrappers that contributed no source text.
///
/// If the last child of a node is a start-meta, it becomes the node's next
/// sibling. If the first child of a node is an end-meta, it becomes the node's
/// previous sibling. Both only happen when the crossed tag side has zero source
/// width (and the node is not literal HTML) or was auto-inserted. Ranges
/// computed from the metas then cover exactly what the invocation produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateTemplateMarkerMetas;

impl DomProcessor for MigrateTemplateMarkerMetas {
    fn name(&self) -> &'static str {
        "migrate-template-markers"
    }

    fn run(
        &self,
        env: &Env,
        doc: &mut Document,
        root: NodeId,
        _options: &ProcessorOptions,
        _at_top_level: bool,
    ) {
        let moved = migrate_markers(env, doc, root);
        log::debug!(target: "wikidom.pp", "migrate-template-markers: {moved} node move(s)");
    }
}

/// Run marker migration over the subtree at `root` and return the number of
/// node moves performed. Zero means the tree was already migrated.
///
/// # Panics
///
/// Panics if a node that must be crossed has no parent; this happens only
/// when `root` itself is an eligible element rather than a fragment root.
pub fn migrate_markers(env: &Env, doc: &mut Document, root: NodeId) -> usize {
    let mut moved = 0;
    do_migrate(env, doc, root, &mut moved);
    moved
}

fn do_migrate(env: &Env, doc: &mut Document, node: NodeId, moved: &mut usize) {
    // Children first, so metas bubble up from the deepest nesting. Grab the
    // sibling before recursing: the child may push metas out beside itself.
    let mut child = doc.first_child(node);
    while let Some(c) = child {
        let sibling = doc.next_sibling(c);
        if doc.has_children(c) {
            do_migrate(env, doc, c, moved);
        }
        child = sibling;
    }

    // No migration out of the fragment.
    if at_the_top(doc.node(node)) {
        return;
    }

    // A hoisted group can expose another end-meta behind it (`<end/> <end/>`);
    // keep going until the leading content is no longer an end-meta, so a
    // second run finds nothing left to move.
    while let Some(sentinel) = end_meta_to_hoist(env, doc, node) {
        let parent = doc
            .parent(node)
            .expect("cannot migrate a marker out of a parentless node");
        loop {
            let first = doc
                .first_child(node)
                .expect("sentinel marker is still a child");
            doc.insert_before(parent, first, Some(node));
            *moved += 1;
            log::trace!(target: "wikidom.pp", "moved {first:?} before {node:?}");
            if first == sentinel {
                break;
            }
        }
    }

    while let Some(sentinel) = start_meta_to_sink(env, doc, node) {
        let parent = doc
            .parent(node)
            .expect("cannot migrate a marker out of a parentless node");
        loop {
            let last = doc
                .last_child(node)
                .expect("sentinel marker is still a child");
            let after = doc.next_sibling(node);
            doc.insert_before(parent, last, after);
            *moved += 1;
            log::trace!(target: "wikidom.pp", "moved {last:?} after {node:?}");
            if last == sentinel {
                break;
            }
        }
    }
}

/// The end-meta that should leave `node` through its start tag, if any.
fn end_meta_to_hoist(env: &Env, doc: &Document, node: NodeId) -> Option<NodeId> {
    let n = doc.node(node);
    let first = first_non_sep_child(n)?;
    if !is_tpl_end_marker_meta(first) {
        return None;
    }
    // We can cross the start tag only if it is zero-width or auto-inserted.
    let el = assert_elt(n);
    let zero_width = env
        .tag_width(&el.name)
        .is_some_and(|w| w.zero_width_start())
        && !is_literal_html_node(n);
    (zero_width || el.data_parsoid.auto_inserted_start).then(|| first.id())
}

/// The start-meta that should leave `node` through its end tag, if any.
fn start_meta_to_sink(env: &Env, doc: &Document, node: NodeId) -> Option<NodeId> {
    let n = doc.node(node);
    let last = last_non_sep_child(n)?;
    if !is_tpl_start_marker_meta(last) {
        return None;
    }
    let el = assert_elt(n);
    // Never out of a table: the meta may have been fostered there, and moving
    // it further yields a range that no longer encloses its content.
    if el.name == "table" {
        return None;
    }
    let zero_width = env
        .tag_width(&el.name)
        .is_some_and(|w| w.zero_width_end())
        && !is_literal_html_node(n);
    (zero_width || el.data_parsoid.auto_inserted_end).then(|| last.id())
}
