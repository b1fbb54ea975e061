//! Recursive layout with paint-primitive synchronisation.
//!
//! [`LayoutEngine`] resolves an element's box against its parent, pushes the
//! result to the canvas, then recurses into every child so that a single
//! mutation always leaves the whole subtree consistent.

use crate::css::styles::Background;
use crate::dom::node::{Element, ElementId};
use crate::dom::tree::ElementTree;
use crate::geometry::{Region, Size};
use crate::layout::resolve::resolve_region;
use crate::render::canvas::Canvas;

/// Top-down box resolver. Holds the viewport used as the roots' parent box.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    viewport: Region,
}

impl LayoutEngine {
    /// Create an engine for a viewport of the given size.
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport: viewport.to_region(),
        }
    }

    /// The viewport box.
    pub fn viewport(&self) -> Region {
        self.viewport
    }

    /// Change the viewport. Callers relayout the roots afterwards.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport.to_region();
    }

    /// The box an element is laid out against: its parent's last resolved
    /// box, or the viewport for roots.
    pub fn parent_region(&self, tree: &ElementTree, id: ElementId) -> Region {
        tree.parent(id)
            .and_then(|p| tree.get(p))
            .map(|parent| parent.region)
            .unwrap_or(self.viewport)
    }

    /// Lay out `id` and its whole subtree.
    pub fn layout<C: Canvas + ?Sized>(&self, tree: &mut ElementTree, canvas: &mut C, id: ElementId) {
        let parent = self.parent_region(tree, id);
        layout_subtree(tree, canvas, id, parent);
    }

    /// Lay out every root and its subtree.
    pub fn layout_all<C: Canvas + ?Sized>(&self, tree: &mut ElementTree, canvas: &mut C) {
        let roots = tree.roots().to_vec();
        for root in roots {
            layout_subtree(tree, canvas, root, self.viewport);
        }
    }
}

/// Resolve `id` against `parent`, sync its primitives, then recurse.
pub fn layout_subtree<C: Canvas + ?Sized>(
    tree: &mut ElementTree,
    canvas: &mut C,
    id: ElementId,
    parent: Region,
) {
    let Some(element) = tree.get_mut(id) else {
        return;
    };
    element.region = resolve_region(element.style(), parent);
    sync_primitives(element, canvas);
    let region = element.region;

    let children = tree.children(id).to_vec();
    for child in children {
        layout_subtree(tree, canvas, child, region);
    }
}

/// Create, update or destroy the element's rectangle and caption so they
/// match its current style, text and box.
pub fn sync_primitives<C: Canvas + ?Sized>(element: &mut Element, canvas: &mut C) {
    let region = element.region;
    let style = element.styles.get(element.state);

    if style.needs_box() {
        let rect = match element.rect {
            Some(rect) => {
                canvas.set_rectangle_region(rect, region);
                rect
            }
            None => canvas.create_rectangle(region),
        };
        match style.background.get() {
            Background::Transparent => canvas.clear_background(rect),
            Background::Colour(colour) => canvas.set_background_colour(rect, *colour),
            Background::Sprite(sprite) => canvas.set_background_image(rect, sprite),
        }
        canvas.set_border(rect, *style.border_width.get(), style.border_colours());
        element.rect = Some(rect);
    } else if let Some(rect) = element.rect.take() {
        canvas.destroy_rectangle(rect);
    }

    if element.text.is_empty() {
        if let Some(caption) = element.caption.take() {
            canvas.destroy_caption(caption);
        }
        return;
    }

    let font = *style.font.get();
    let caption = match element.caption {
        Some(caption) => {
            canvas.set_caption_region(caption, region);
            canvas.set_caption_font(caption, font);
            canvas.set_caption_text(caption, &element.text);
            caption
        }
        None => canvas.create_caption(font, region, &element.text),
    };
    canvas.set_caption_colour(caption, *style.colour.get());
    canvas.set_caption_alignment(caption, *style.text_align.get(), *style.vertical_align.get());
    element.caption = Some(caption);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::scalar::Scalar;
    use crate::css::styles::{Color, InteractionState, StateStyles, Style};
    use crate::dom::node::ElementSpec;
    use crate::testing::canvas::{CanvasCall, RecordingCanvas};

    fn element_with(style: Style, text: &str) -> Element {
        let styles = StateStyles {
            normal: style.clone(),
            hover: style.clone(),
            active: style,
        };
        ElementSpec::new("#x").text(text).into_element(styles)
    }

    fn px_box(left: f32, top: f32, width: f32, height: f32) -> Style {
        let mut s = Style::new();
        s.left.set(Scalar::px(left));
        s.top.set(Scalar::px(top));
        s.width.set(Scalar::px(width));
        s.height.set(Scalar::px(height));
        s
    }

    // ── layout ───────────────────────────────────────────────────────

    #[test]
    fn root_uses_viewport() {
        let mut tree = ElementTree::new();
        let mut canvas = RecordingCanvas::new();
        let engine = LayoutEngine::new(Size::new(200.0, 100.0));
        let id = tree.insert(None, element_with(Style::new(), ""));
        engine.layout(&mut tree, &mut canvas, id);
        assert_eq!(tree.get(id).unwrap().region, Region::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn child_resolves_against_parent() {
        let mut tree = ElementTree::new();
        let mut canvas = RecordingCanvas::new();
        let engine = LayoutEngine::new(Size::new(1024.0, 768.0));
        let parent = tree.insert(None, element_with(px_box(10.0, 10.0, 200.0, 50.0), ""));
        let mut half = Style::new();
        half.width.set(Scalar::percent(50.0));
        let child = tree.insert(Some(parent), element_with(half, ""));

        engine.layout_all(&mut tree, &mut canvas);
        assert_eq!(tree.get(child).unwrap().region, Region::new(10.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn relayout_propagates_to_children() {
        let mut tree = ElementTree::new();
        let mut canvas = RecordingCanvas::new();
        let engine = LayoutEngine::new(Size::new(1024.0, 768.0));
        let parent = tree.insert(None, element_with(px_box(0.0, 0.0, 100.0, 100.0), ""));
        let child = tree.insert(Some(parent), element_with(px_box(5.0, 5.0, 10.0, 10.0), ""));
        engine.layout_all(&mut tree, &mut canvas);

        tree.get_mut(parent).unwrap().styles.normal.left.set(Scalar::px(50.0));
        engine.layout(&mut tree, &mut canvas, parent);
        assert_eq!(tree.get(child).unwrap().region.left, 55.0);
    }

    #[test]
    fn set_viewport_changes_root_box() {
        let mut engine = LayoutEngine::new(Size::new(10.0, 10.0));
        engine.set_viewport(Size::new(30.0, 40.0));
        assert_eq!(engine.viewport(), Region::new(0.0, 0.0, 30.0, 40.0));
    }

    // ── primitives ───────────────────────────────────────────────────

    #[test]
    fn transparent_box_creates_nothing() {
        let mut canvas = RecordingCanvas::new();
        let mut el = element_with(Style::new(), "");
        sync_primitives(&mut el, &mut canvas);
        assert!(el.rect().is_none());
        assert!(el.caption().is_none());
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn background_creates_rectangle_once() {
        let mut canvas = RecordingCanvas::new();
        let mut style = Style::new();
        style.background.set(Background::Colour(Color::rgb(1, 2, 3)));
        let mut el = element_with(style, "");

        sync_primitives(&mut el, &mut canvas);
        let rect = el.rect().unwrap();
        sync_primitives(&mut el, &mut canvas);
        assert_eq!(el.rect(), Some(rect));
        assert_eq!(canvas.live_rectangles(), 1);
        assert!(canvas
            .calls()
            .contains(&CanvasCall::BackgroundColour(rect, Color::rgb(1, 2, 3))));
    }

    #[test]
    fn border_alone_creates_rectangle() {
        let mut canvas = RecordingCanvas::new();
        let mut style = Style::new();
        style.border_width.set(2.0);
        let mut el = element_with(style, "");
        sync_primitives(&mut el, &mut canvas);
        assert!(el.rect().is_some());
    }

    #[test]
    fn rectangle_destroyed_when_no_longer_needed() {
        let mut canvas = RecordingCanvas::new();
        let mut style = Style::new();
        style.border_width.set(1.0);
        let mut el = element_with(style, "");
        sync_primitives(&mut el, &mut canvas);

        el.styles.hover = Style::new();
        el.state = InteractionState::Hover;
        sync_primitives(&mut el, &mut canvas);
        assert!(el.rect().is_none());
        assert_eq!(canvas.live_rectangles(), 0);
    }

    #[test]
    fn caption_follows_text() {
        let mut canvas = RecordingCanvas::new();
        let mut el = element_with(Style::new(), "Okay");
        sync_primitives(&mut el, &mut canvas);
        assert!(el.caption().is_some());
        assert_eq!(canvas.live_captions(), 1);

        el.text.clear();
        sync_primitives(&mut el, &mut canvas);
        assert!(el.caption().is_none());
        assert_eq!(canvas.live_captions(), 0);
    }
}
