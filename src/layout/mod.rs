//! Layout engine: unit resolution, recursive box layout, hit-testing.

pub mod engine;
pub mod resolve;
pub mod spatial;

pub use engine::LayoutEngine;
pub use spatial::hit_test;
