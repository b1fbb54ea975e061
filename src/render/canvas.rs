//! The 2D canvas collaborator.
//!
//! The core never rasterizes. It asks the host's canvas for two kinds of
//! retained primitives, a rectangle (background and border) and a caption
//! (text), and updates them as layout changes. Handles are opaque to the
//! core and only meaningful to the canvas that issued them.

use crate::css::styles::{Color, HorizontalAlign, VerticalAlign};
use crate::geometry::{Point, Region};

/// Handle to a rectangle primitive issued by a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectHandle(u64);

impl RectHandle {
    /// Wrap a canvas-specific identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The canvas-specific identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Handle to a caption primitive issued by a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptionHandle(u64);

impl CaptionHandle {
    /// Wrap a canvas-specific identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The canvas-specific identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Retained-mode drawing surface provided by the host.
///
/// Regions are absolute, in host pixels. The trait is object safe so hosts may
/// pass `Box<dyn Canvas>`.
pub trait Canvas {
    // Rectangles
    fn create_rectangle(&mut self, region: Region) -> RectHandle;
    fn destroy_rectangle(&mut self, rect: RectHandle);
    fn set_rectangle_region(&mut self, rect: RectHandle, region: Region);
    fn set_background_colour(&mut self, rect: RectHandle, colour: Color);
    /// Fill the rectangle with a sprite from the current atlas.
    fn set_background_image(&mut self, rect: RectHandle, sprite: &str);
    /// Remove any background fill, leaving only the border.
    fn clear_background(&mut self, rect: RectHandle);
    /// Set a uniform border width with per-edge colours (top, right, bottom, left).
    fn set_border(&mut self, rect: RectHandle, width: f32, colours: [Color; 4]);

    // Captions
    fn create_caption(&mut self, font: u32, region: Region, text: &str) -> CaptionHandle;
    fn destroy_caption(&mut self, caption: CaptionHandle);
    fn set_caption_region(&mut self, caption: CaptionHandle, region: Region);
    fn set_caption_text(&mut self, caption: CaptionHandle, text: &str);
    fn set_caption_font(&mut self, caption: CaptionHandle, font: u32);
    fn set_caption_colour(&mut self, caption: CaptionHandle, colour: Color);
    fn set_caption_alignment(
        &mut self,
        caption: CaptionHandle,
        horizontal: HorizontalAlign,
        vertical: VerticalAlign,
    );

    /// Point containment as the host sees it (sprites may be non-rectangular).
    fn contains(&self, rect: RectHandle, point: Point) -> bool;
}

impl<C: Canvas + ?Sized> Canvas for Box<C> {
    fn create_rectangle(&mut self, region: Region) -> RectHandle {
        (**self).create_rectangle(region)
    }
    fn destroy_rectangle(&mut self, rect: RectHandle) {
        (**self).destroy_rectangle(rect)
    }
    fn set_rectangle_region(&mut self, rect: RectHandle, region: Region) {
        (**self).set_rectangle_region(rect, region)
    }
    fn set_background_colour(&mut self, rect: RectHandle, colour: Color) {
        (**self).set_background_colour(rect, colour)
    }
    fn set_background_image(&mut self, rect: RectHandle, sprite: &str) {
        (**self).set_background_image(rect, sprite)
    }
    fn clear_background(&mut self, rect: RectHandle) {
        (**self).clear_background(rect)
    }
    fn set_border(&mut self, rect: RectHandle, width: f32, colours: [Color; 4]) {
        (**self).set_border(rect, width, colours)
    }
    fn create_caption(&mut self, font: u32, region: Region, text: &str) -> CaptionHandle {
        (**self).create_caption(font, region, text)
    }
    fn destroy_caption(&mut self, caption: CaptionHandle) {
        (**self).destroy_caption(caption)
    }
    fn set_caption_region(&mut self, caption: CaptionHandle, region: Region) {
        (**self).set_caption_region(caption, region)
    }
    fn set_caption_text(&mut self, caption: CaptionHandle, text: &str) {
        (**self).set_caption_text(caption, text)
    }
    fn set_caption_font(&mut self, caption: CaptionHandle, font: u32) {
        (**self).set_caption_font(caption, font)
    }
    fn set_caption_colour(&mut self, caption: CaptionHandle, colour: Color) {
        (**self).set_caption_colour(caption, colour)
    }
    fn set_caption_alignment(
        &mut self,
        caption: CaptionHandle,
        horizontal: HorizontalAlign,
        vertical: VerticalAlign,
    ) {
        (**self).set_caption_alignment(caption, horizontal, vertical)
    }
    fn contains(&self, rect: RectHandle, point: Point) -> bool {
        (**self).contains(rect, point)
    }
}
