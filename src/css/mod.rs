//! Stylesheet engine: tokenizer, parser, typed styles, registry, cascade.

pub mod scalar;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod styles;
pub mod properties;
pub mod stylesheet;
