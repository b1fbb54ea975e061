//! An [`EventSink`] that records every callback.

use crate::dom::node::{Element, ElementId};
use crate::event::handler::Callback;
use crate::event::input::PointerEvent;
use crate::event::sink::EventSink;
use crate::geometry::Point;

/// One recorded callback.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkEvent {
    pub callback: Callback,
    pub element: ElementId,
    pub identity: String,
    pub position: Point,
}

/// Records callbacks in the order they fire.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded callbacks, oldest first.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Take the recorded callbacks, leaving the sink empty.
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }

    /// How many times `callback` fired.
    pub fn count(&self, callback: Callback) -> usize {
        self.events.iter().filter(|e| e.callback == callback).count()
    }

    fn record(&mut self, callback: Callback, id: ElementId, element: &Element, event: &PointerEvent) {
        self.events.push(SinkEvent {
            callback,
            element: id,
            identity: element.identity.clone(),
            position: event.position,
        });
    }
}

impl EventSink for RecordingSink {
    fn activated(&mut self, id: ElementId, element: &Element, event: &PointerEvent) {
        self.record(Callback::Activated, id, element, event);
    }

    fn focused(&mut self, id: ElementId, element: &Element, event: &PointerEvent) {
        self.record(Callback::Focused, id, element, event);
    }

    fn blurred(&mut self, id: ElementId, element: &Element, event: &PointerEvent) {
        self.record(Callback::Blurred, id, element, event);
    }
}
