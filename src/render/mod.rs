//! Rendering seam: the host canvas that receives paint primitives.

pub mod canvas;

pub use canvas::{Canvas, CaptionHandle, RectHandle};
