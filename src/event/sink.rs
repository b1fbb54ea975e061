//! Callback sink: where activate/focus/blur notifications go.

use crate::dom::node::{Element, ElementId};
use crate::event::handler::Callback;
use crate::event::input::PointerEvent;

/// Receives interaction callbacks from the hit-test state machine.
///
/// All methods default to doing nothing, so implementors override only what
/// they care about. `()` is a sink that ignores everything.
pub trait EventSink {
    /// The pointer was pressed on a listening element.
    fn activated(&mut self, _id: ElementId, _element: &Element, _event: &PointerEvent) {}

    /// The pointer moved onto a listening element.
    fn focused(&mut self, _id: ElementId, _element: &Element, _event: &PointerEvent) {}

    /// The pointer left the last tracked element without hitting another.
    fn blurred(&mut self, _id: ElementId, _element: &Element, _event: &PointerEvent) {}
}

impl EventSink for () {}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn activated(&mut self, id: ElementId, element: &Element, event: &PointerEvent) {
        (**self).activated(id, element, event)
    }
    fn focused(&mut self, id: ElementId, element: &Element, event: &PointerEvent) {
        (**self).focused(id, element, event)
    }
    fn blurred(&mut self, id: ElementId, element: &Element, event: &PointerEvent) {
        (**self).blurred(id, element, event)
    }
}

/// Route a [`Callback`] to the matching sink method.
pub fn dispatch<S: EventSink + ?Sized>(
    sink: &mut S,
    callback: Callback,
    id: ElementId,
    element: &Element,
    event: &PointerEvent,
) {
    match callback {
        Callback::Activated => sink.activated(id, element, event),
        Callback::Focused => sink.focused(id, element, event),
        Callback::Blurred => sink.blurred(id, element, event),
    }
}
