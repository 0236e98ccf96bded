// ABOUTME: DOM post-processor contract and the ordered pipeline that runs processors over a tree.
// ABOUTME: Each processor is standalone: it may not assume any other pass has or hasn't run.

//! DOM post-processing passes.
//!
//! A [`DomProcessor`] rewrites an annotated tree in place. A [`Pipeline`] runs
//! a fixed sequence of processors over the same document.

use ego_tree::NodeId;

use crate::dom::serialize::serialize_node;
use crate::dom::Document;
use crate::env::{Env, ProcessorOptions};

pub mod migrate_template_markers;

pub use migrate_template_markers::MigrateTemplateMarkerMetas;

/// A single DOM rewriting pass.
pub trait DomProcessor {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite the subtree rooted at `root` in place.
    ///
    /// `at_top_level` is true for whole-document runs and false for nested
    /// fragment runs.
    fn run(
        &self,
        env: &Env,
        doc: &mut Document,
        root: NodeId,
        options: &ProcessorOptions,
        at_top_level: bool,
    );
}

/// An ordered list of processors.
#[derive(Default)]
pub struct Pipeline {
    processors: Vec<Box<dyn DomProcessor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The post-processors run after tree building.
    pub fn default_post_processors() -> Self {
        Self::new().with(MigrateTemplateMarkerMetas)
    }

    pub fn with(mut self, processor: impl DomProcessor + 'static) -> Self {
        self.push(processor);
        self
    }

    pub fn push(&mut self, processor: impl DomProcessor + 'static) {
        self.processors.push(Box::new(processor));
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Run every processor over the whole document.
    pub fn run(&self, env: &Env, doc: &mut Document) {
        let root = doc.root();
        self.run_on(env, doc, root, &ProcessorOptions::new(), true);
    }

    /// Run every processor over the subtree rooted at `root`.
    pub fn run_on(
        &self,
        env: &Env,
        doc: &mut Document,
        root: NodeId,
        options: &ProcessorOptions,
        at_top_level: bool,
    ) {
        for processor in &self.processors {
            log::debug!(
                target: "wikidom.pp",
                "running {} (top level: {at_top_level})",
                processor.name()
            );
            processor.run(env, doc, root, options, at_top_level);
            if env.dump_dom {
                log::trace!(
                    target: "wikidom.pp",
                    "dom after {}: {}",
                    processor.name(),
                    serialize_node(doc, root)
                );
            }
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("processors", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::data::DataParsoid;
    use crate::dom::serialize::to_html;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(&'static str, bool)>>>,
    }

    impl DomProcessor for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(
            &self,
            _env: &Env,
            _doc: &mut Document,
            _root: NodeId,
            _options: &ProcessorOptions,
            at_top_level: bool,
        ) {
            self.log.borrow_mut().push((self.name, at_top_level));
        }
    }

    #[test]
    fn test_pipeline_runs_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pipeline = Pipeline::new()
            .with(Recorder {
                name: "first",
                log: log.clone(),
            })
            .with(Recorder {
                name: "second",
                log: log.clone(),
            });
        let mut doc = Document::new();

        pipeline.run(&Env::default(), &mut doc);

        assert_eq!(*log.borrow(), vec![("first", true), ("second", true)]);
        assert_eq!(pipeline.names(), vec!["first", "second"]);
    }

    #[test]
    fn test_pipeline_run_on_passes_flag() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let pipeline = Pipeline::new().with(Recorder {
            name: "only",
            log: log.clone(),
        });
        let mut doc = Document::new();
        let root = doc.root();

        pipeline.run_on(&Env::default(), &mut doc, root, &ProcessorOptions::new(), false);

        assert_eq!(*log.borrow(), vec![("only", false)]);
    }

    fn build_nested_paragraph(doc: &mut Document) -> NodeId {
        let root = doc.root();
        let div = doc.append_tag(root, "div", DataParsoid::default());
        let p = doc.append_tag(div, "p", DataParsoid::default());
        doc.append_end_marker(p, "mw:Transclusion");
        doc.append_text(p, "x");
        div
    }

    #[test]
    fn test_run_on_subtree_matches_top_level_run() {
        let env = Env::builder().dump_dom(true).build();
        // Let the trace arguments, including the DOM dump, be evaluated.
        log::set_max_level(log::LevelFilter::Trace);
        let pipeline = Pipeline::default_post_processors();

        let mut nested = Document::new();
        let div = build_nested_paragraph(&mut nested);
        pipeline.run_on(&env, &mut nested, div, &ProcessorOptions::new(), false);

        let mut whole = Document::new();
        build_nested_paragraph(&mut whole);
        pipeline.run(&env, &mut whole);

        assert_eq!(
            to_html(&nested),
            r#"<div><meta typeof="mw:Transclusion/End" /><p>x</p></div>"#
        );
        assert_eq!(to_html(&nested), to_html(&whole));
    }

    #[test]
    fn test_default_post_processors() {
        let pipeline = Pipeline::default_post_processors();
        assert_eq!(pipeline.names(), vec!["migrate-template-markers"]);
        assert_eq!(format!("{pipeline:?}"), r#"Pipeline { processors: ["migrate-template-markers"] }"#);
    }
}
