//! Pointer hit-testing over listener elements.
//!
//! Listeners are scanned in registration order. Within a listener the search
//! goes children-first (frontmost child first), so the innermost listening
//! element under the point wins over its ancestors. Non-listening elements
//! never win but do not block the search into their own children.

use crate::dom::node::{Element, ElementId};
use crate::dom::tree::ElementTree;
use crate::geometry::Point;
use crate::render::canvas::Canvas;

/// Whether `point` falls inside the element's painted box.
///
/// Elements with a rectangle defer to the canvas; others use their resolved
/// region.
pub fn element_contains<C: Canvas + ?Sized>(element: &Element, canvas: &C, point: Point) -> bool {
    match element.rect() {
        Some(rect) => canvas.contains(rect, point),
        None => element.region.contains(point),
    }
}

/// The innermost listening element in `id`'s subtree under `point`.
pub fn innermost_hit<C: Canvas + ?Sized>(
    tree: &ElementTree,
    canvas: &C,
    id: ElementId,
    point: Point,
) -> Option<ElementId> {
    let element = tree.get(id)?;
    if !element_contains(element, canvas, point) {
        return None;
    }
    tree.children(id)
        .iter()
        .rev()
        .find_map(|&child| innermost_hit(tree, canvas, child, point))
        .or_else(|| element.listening.then_some(id))
}

/// Scan `listeners` in order and return the first hit.
pub fn hit_test<C: Canvas + ?Sized>(
    tree: &ElementTree,
    canvas: &C,
    listeners: &[ElementId],
    point: Point,
) -> Option<ElementId> {
    listeners
        .iter()
        .find_map(|&id| innermost_hit(tree, canvas, id, point))
}
