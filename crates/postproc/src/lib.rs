// ABOUTME: Library entry point for the wikidom DOM post-processor.
// ABOUTME: Re-exports the tree model, environment, pipeline and the marker migration pass.

//! wikidom-postproc - DOM normalization passes for a wikitext-to-HTML compiler.
//!
//! After wikitext has been expanded into an annotated HTML tree, the passes in
//! this crate correct structural artifacts of template and extension
//! expansion before the tree is serialized or diffed.
//!
//! # Example
//!
//! ```
//! use wikidom_postproc::{load_fragment, to_html, Env, Pipeline};
//!
//! let html = r#"<p>text<meta typeof="mw:Transclusion" /></p>"#;
//! let mut doc = load_fragment(html).unwrap();
//! Pipeline::default_post_processors().run(&Env::default(), &mut doc);
//! assert_eq!(to_html(&doc), r#"<p>text</p><meta typeof="mw:Transclusion" />"#);
//! ```

pub mod consts;
pub mod dom;
pub mod env;
pub mod error;
pub mod processors;

pub use crate::consts::{TagWidth, TagWidths};
pub use crate::dom::{
    load_document, load_fragment, serialize_node, to_html, DataParsoid, Document, ElementData,
    NodeData,
};
pub use crate::env::{Env, EnvBuilder, ProcessorOptions};
pub use crate::error::{Error, Result};
pub use crate::processors::migrate_template_markers::migrate_markers;
pub use crate::processors::{DomProcessor, MigrateTemplateMarkerMetas, Pipeline};

pub use ego_tree::NodeId;
