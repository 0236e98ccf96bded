// ABOUTME: Annotated DOM used by the post-processors: node payloads, arena tree, predicates.
// ABOUTME: Also provides loading from HTML text and serialization back to HTML.

//! DOM model for the post-processing passes.
//!
//! The tree is an arena of [`NodeData`] addressed by `ego_tree::NodeId`.
//! Element annotations live in [`DataParsoid`] records rather than in
//! attributes, and are written back out by the serializer.

pub mod data;
pub mod load;
pub mod predicates;
pub mod serialize;
pub mod tree;

pub use data::{DataParsoid, ElementData, NodeData};
pub use load::{load_document, load_fragment};
pub use serialize::{serialize_children, serialize_node, to_html};
pub use tree::Document;
