//! A headless canvas that records every primitive request.

use std::collections::HashMap;

use crate::css::styles::{Color, HorizontalAlign, VerticalAlign};
use crate::geometry::{Point, Region};
use crate::render::canvas::{Canvas, CaptionHandle, RectHandle};

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    CreateRectangle(RectHandle, Region),
    DestroyRectangle(RectHandle),
    RectangleRegion(RectHandle, Region),
    BackgroundColour(RectHandle, Color),
    BackgroundImage(RectHandle, String),
    ClearBackground(RectHandle),
    Border(RectHandle, f32, [Color; 4]),
    CreateCaption(CaptionHandle, u32, Region, String),
    DestroyCaption(CaptionHandle),
    CaptionRegion(CaptionHandle, Region),
    CaptionText(CaptionHandle, String),
    CaptionFont(CaptionHandle, u32),
    CaptionColour(CaptionHandle, Color),
    CaptionAlignment(CaptionHandle, HorizontalAlign, VerticalAlign),
}

/// What a live rectangle currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    None,
    Colour(Color),
    Image(String),
}

/// Current state of a live rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleState {
    pub region: Region,
    pub fill: Fill,
    pub border_width: f32,
    pub border_colours: [Color; 4],
}

/// Current state of a live caption.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionState {
    pub font: u32,
    pub region: Region,
    pub text: String,
    pub colour: Color,
    pub alignment: (HorizontalAlign, VerticalAlign),
}

/// In-memory [`Canvas`] for tests and headless hosts.
///
/// Keeps the full call log plus the current state of every live primitive.
/// Containment uses the rectangle's last region.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    next_handle: u64,
    calls: Vec<CanvasCall>,
    rectangles: HashMap<RectHandle, RectangleState>,
    captions: HashMap<CaptionHandle, CaptionState>,
}

impl RecordingCanvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Forget the call log; live primitives are kept.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of rectangles created and not yet destroyed.
    pub fn live_rectangles(&self) -> usize {
        self.rectangles.len()
    }

    /// Number of captions created and not yet destroyed.
    pub fn live_captions(&self) -> usize {
        self.captions.len()
    }

    /// State of a live rectangle.
    pub fn rectangle(&self, rect: RectHandle) -> Option<&RectangleState> {
        self.rectangles.get(&rect)
    }

    /// State of a live caption.
    pub fn caption(&self, caption: CaptionHandle) -> Option<&CaptionState> {
        self.captions.get(&caption)
    }

    fn issue(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Canvas for RecordingCanvas {
    fn create_rectangle(&mut self, region: Region) -> RectHandle {
        let rect = RectHandle::new(self.issue());
        self.rectangles.insert(
            rect,
            RectangleState {
                region,
                fill: Fill::None,
                border_width: 0.0,
                border_colours: [Color::BLACK; 4],
            },
        );
        self.calls.push(CanvasCall::CreateRectangle(rect, region));
        rect
    }

    fn destroy_rectangle(&mut self, rect: RectHandle) {
        self.rectangles.remove(&rect);
        self.calls.push(CanvasCall::DestroyRectangle(rect));
    }

    fn set_rectangle_region(&mut self, rect: RectHandle, region: Region) {
        if let Some(state) = self.rectangles.get_mut(&rect) {
            state.region = region;
        }
        self.calls.push(CanvasCall::RectangleRegion(rect, region));
    }

    fn set_background_colour(&mut self, rect: RectHandle, colour: Color) {
        if let Some(state) = self.rectangles.get_mut(&rect) {
            state.fill = Fill::Colour(colour);
        }
        self.calls.push(CanvasCall::BackgroundColour(rect, colour));
    }

    fn set_background_image(&mut self, rect: RectHandle, sprite: &str) {
        if let Some(state) = self.rectangles.get_mut(&rect) {
            state.fill = Fill::Image(sprite.to_owned());
        }
        self.calls
            .push(CanvasCall::BackgroundImage(rect, sprite.to_owned()));
    }

    fn clear_background(&mut self, rect: RectHandle) {
        if let Some(state) = self.rectangles.get_mut(&rect) {
            state.fill = Fill::None;
        }
        self.calls.push(CanvasCall::ClearBackground(rect));
    }

    fn set_border(&mut self, rect: RectHandle, width: f32, colours: [Color; 4]) {
        if let Some(state) = self.rectangles.get_mut(&rect) {
            state.border_width = width;
            state.border_colours = colours;
        }
        self.calls.push(CanvasCall::Border(rect, width, colours));
    }

    fn create_caption(&mut self, font: u32, region: Region, text: &str) -> CaptionHandle {
        let caption = CaptionHandle::new(self.issue());
        self.captions.insert(
            caption,
            CaptionState {
                font,
                region,
                text: text.to_owned(),
                colour: Color::WHITE,
                alignment: (HorizontalAlign::Left, VerticalAlign::Top),
            },
        );
        self.calls
            .push(CanvasCall::CreateCaption(caption, font, region, text.to_owned()));
        caption
    }

    fn destroy_caption(&mut self, caption: CaptionHandle) {
        self.captions.remove(&caption);
        self.calls.push(CanvasCall::DestroyCaption(caption));
    }

    fn set_caption_region(&mut self, caption: CaptionHandle, region: Region) {
        if let Some(state) = self.captions.get_mut(&caption) {
            state.region = region;
        }
        self.calls.push(CanvasCall::CaptionRegion(caption, region));
    }

    fn set_caption_text(&mut self, caption: CaptionHandle, text: &str) {
        if let Some(state) = self.captions.get_mut(&caption) {
            state.text = text.to_owned();
        }
        self.calls
            .push(CanvasCall::CaptionText(caption, text.to_owned()));
    }

    fn set_caption_font(&mut self, caption: CaptionHandle, font: u32) {
        if let Some(state) = self.captions.get_mut(&caption) {
            state.font = font;
        }
        self.calls.push(CanvasCall::CaptionFont(caption, font));
    }

    fn set_caption_colour(&mut self, caption: CaptionHandle, colour: Color) {
        if let Some(state) = self.captions.get_mut(&caption) {
            state.colour = colour;
        }
        self.calls.push(CanvasCall::CaptionColour(caption, colour));
    }

    fn set_caption_alignment(
        &mut self,
        caption: CaptionHandle,
        horizontal: HorizontalAlign,
        vertical: VerticalAlign,
    ) {
        if let Some(state) = self.captions.get_mut(&caption) {
            state.alignment = (horizontal, vertical);
        }
        self.calls
            .push(CanvasCall::CaptionAlignment(caption, horizontal, vertical));
    }

    fn contains(&self, rect: RectHandle, point: Point) -> bool {
        self.rectangles
            .get(&rect)
            .is_some_and(|state| state.region.contains(point))
    }
}
