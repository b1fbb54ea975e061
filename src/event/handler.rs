//! Pointer hit-test state machine.
//!
//! [`HitTester`] holds the listener list and the currently tracked element.
//! Each pointer event is hit-tested against the listeners and turned into
//! Normal/Hover/Active transitions plus at most one callback. The caller
//! re-lays out every element named in the returned [`HitOutcome`].

use crate::css::styles::InteractionState;
use crate::dom::node::ElementId;
use crate::dom::tree::ElementTree;
use crate::event::input::{PointerAction, PointerEvent};
use crate::layout::spatial::hit_test;
use crate::render::canvas::Canvas;

/// Which collaborator callback a transition triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    Activated,
    Focused,
    Blurred,
}

/// Result of feeding one pointer event to the [`HitTester`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitOutcome {
    /// Elements whose state changed, in the order the changes were made.
    pub changes: Vec<(ElementId, InteractionState)>,
    /// The callback to fire, if any, and the element it concerns.
    pub callback: Option<(Callback, ElementId)>,
}

impl HitOutcome {
    /// Whether the event changed nothing.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.callback.is_none()
    }
}

/// The state an event asks the element under the pointer to be in.
pub fn target_state(event: &PointerEvent) -> InteractionState {
    match event.action {
        PointerAction::Moved if event.is_drag() => InteractionState::Active,
        PointerAction::Moved => InteractionState::Hover,
        PointerAction::Pressed => InteractionState::Active,
        PointerAction::Released => InteractionState::Hover,
    }
}

/// Listener registry plus the element currently holding Hover/Active.
#[derive(Debug, Default)]
pub struct HitTester {
    listeners: Vec<ElementId>,
    tracked: Option<ElementId>,
}

impl HitTester {
    /// Create a tester with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element for hit-testing. Registering twice is a no-op.
    pub fn listen(&mut self, id: ElementId) {
        if !self.listeners.contains(&id) {
            self.listeners.push(id);
        }
    }

    /// Listeners in registration order.
    pub fn listeners(&self) -> &[ElementId] {
        &self.listeners
    }

    /// The element currently in Hover or Active, if any.
    pub fn tracked(&self) -> Option<ElementId> {
        self.tracked
    }

    /// Apply one pointer event: hit-test, update element states in `tree`,
    /// and report what changed.
    pub fn handle<C: Canvas + ?Sized>(
        &mut self,
        tree: &mut ElementTree,
        canvas: &C,
        event: &PointerEvent,
    ) -> HitOutcome {
        let mut outcome = HitOutcome::default();
        let hit = hit_test(tree, canvas, &self.listeners, event.position);

        let Some(id) = hit else {
            if let Some(previous) = self.tracked.take() {
                set_state(tree, previous, InteractionState::Normal, &mut outcome);
                outcome.callback = Some((Callback::Blurred, previous));
            }
            return outcome;
        };

        let target = target_state(event);
        let current = tree.get(id).map(|el| el.state);
        if self.tracked == Some(id) && current == Some(target) {
            return outcome;
        }

        if let Some(previous) = self.tracked.filter(|&p| p != id) {
            set_state(tree, previous, InteractionState::Normal, &mut outcome);
        }
        set_state(tree, id, target, &mut outcome);
        self.tracked = Some(id);

        outcome.callback = match (event.action, target) {
            (PointerAction::Pressed, _) => Some((Callback::Activated, id)),
            (PointerAction::Moved, InteractionState::Hover) => Some((Callback::Focused, id)),
            _ => None,
        };
        outcome
    }
}

fn set_state(
    tree: &mut ElementTree,
    id: ElementId,
    state: InteractionState,
    outcome: &mut HitOutcome,
) {
    if let Some(element) = tree.get_mut(id) {
        tracing::debug!(element = %element.identity, from = ?element.state, to = ?state, "state transition");
        element.state = state;
        outcome.changes.push((id, state));
    }
}

// ===========================================================================
// Tests
// ===========================================================================
