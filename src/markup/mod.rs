//! Markup parser: indentation-nested element declarations.
//!
//! ```text
//! %block #dialog (style="background: RGBA(0,0,0,200)")
//!  %button #ok .btn (listen) = Okay
//! ```

pub mod document;
pub mod line;

pub use document::{MarkupDocument, MarkupNode, MarkupParser, parse_markup};
pub use line::MarkupLine;

/// Diagnostics from markup parsing. None of these abort a load.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkupError {
    #[error("line {line}: attribute group is never closed")]
    UnclosedAttributes { line: usize },
    #[error("line {line}: unknown element type `%{name}`")]
    UnknownType { line: usize, name: String },
    #[error("line {line}: indentation jumps from {from} to {to}")]
    IndentJump { line: usize, from: usize, to: usize },
}
