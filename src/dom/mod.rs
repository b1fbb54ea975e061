//! Element tree: slotmap-backed arena with identity and token queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{Element, ElementId, ElementKind, ElementSpec};
pub use tree::ElementTree;
