//! Pointer input types.
//!
//! Defines [`PointerEvent`], [`PointerAction`] and the [`Buttons`] mask. Hosts
//! build events directly from their own device polling; terminal hosts can
//! convert crossterm mouse events via `From`.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

/// Pointer button-down bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const PRIMARY: Buttons = Buttons(1);
    pub const SECONDARY: Buttons = Buttons(2);
    pub const MIDDLE: Buttons = Buttons(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Buttons) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no button is down.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Buttons {
    type Output = Buttons;
    fn bitor(self, rhs: Self) -> Self::Output {
        Buttons(self.0 | rhs.0)
    }
}

impl BitAnd for Buttons {
    type Output = Buttons;
    fn bitand(self, rhs: Self) -> Self::Output {
        Buttons(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// PointerEvent
// ---------------------------------------------------------------------------

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    Moved,
    Pressed,
    Released,
}

/// A pointer event in absolute host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    /// Buttons held down when the event was generated.
    pub buttons: Buttons,
}

impl PointerEvent {
    /// Create a new pointer event.
    pub fn new(action: PointerAction, position: Point, buttons: Buttons) -> Self {
        Self {
            action,
            position,
            buttons,
        }
    }

    /// A move with the given buttons held.
    pub fn moved(x: f32, y: f32, buttons: Buttons) -> Self {
        Self::new(PointerAction::Moved, Point::new(x, y), buttons)
    }

    /// A primary-button press.
    pub fn pressed(x: f32, y: f32) -> Self {
        Self::new(PointerAction::Pressed, Point::new(x, y), Buttons::PRIMARY)
    }

    /// A primary-button release.
    pub fn released(x: f32, y: f32) -> Self {
        Self::new(PointerAction::Released, Point::new(x, y), Buttons::NONE)
    }

    /// Whether this is a move with the primary button held.
    pub fn is_drag(&self) -> bool {
        self.action == PointerAction::Moved && self.buttons.contains(Buttons::PRIMARY)
    }
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

/// Convert a crossterm mouse button to our `Buttons` bit.
fn convert_mouse_button(b: crossterm::event::MouseButton) -> Buttons {
    match b {
        crossterm::event::MouseButton::Left => Buttons::PRIMARY,
        crossterm::event::MouseButton::Right => Buttons::SECONDARY,
        crossterm::event::MouseButton::Middle => Buttons::MIDDLE,
    }
}

/// Convert a crossterm `MouseEvent` into a `PointerEvent`.
///
/// Cell coordinates become pointer coordinates. Scroll events carry no
/// button state and map to a plain move.
impl From<crossterm::event::MouseEvent> for PointerEvent {
    fn from(me: crossterm::event::MouseEvent) -> Self {
        use crossterm::event::MouseEventKind;

        let (action, buttons) = match me.kind {
            MouseEventKind::Down(b) => (PointerAction::Pressed, convert_mouse_button(b)),
            MouseEventKind::Up(_) => (PointerAction::Released, Buttons::NONE),
            MouseEventKind::Drag(b) => (PointerAction::Moved, convert_mouse_button(b)),
            // Moved and any scroll variant.
            _ => (PointerAction::Moved, Buttons::NONE),
        };
        PointerEvent::new(
            action,
            Point::new(f32::from(me.column), f32::from(me.row)),
            buttons,
        )
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    fn ct(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    // ── Buttons ──────────────────────────────────────────────────────

    #[test]
    fn buttons_none_is_empty() {
        assert!(Buttons::NONE.is_empty());
        assert!(Buttons::default().is_empty());
    }

    #[test]
    fn buttons_combined() {
        let b = Buttons::PRIMARY | Buttons::MIDDLE;
        assert!(b.contains(Buttons::PRIMARY));
        assert!(b.contains(Buttons::MIDDLE));
        assert!(!b.contains(Buttons::SECONDARY));
        assert_eq!(b & Buttons::PRIMARY, Buttons::PRIMARY);
    }

    // ── PointerEvent ─────────────────────────────────────────────────

    #[test]
    fn constructors() {
        let p = PointerEvent::pressed(1.0, 2.0);
        assert_eq!(p.action, PointerAction::Pressed);
        assert_eq!(p.position, Point::new(1.0, 2.0));
        assert!(p.buttons.contains(Buttons::PRIMARY));

        let r = PointerEvent::released(1.0, 2.0);
        assert!(r.buttons.is_empty());
    }

    #[test]
    fn drag_detection() {
        assert!(PointerEvent::moved(0.0, 0.0, Buttons::PRIMARY).is_drag());
        assert!(!PointerEvent::moved(0.0, 0.0, Buttons::SECONDARY).is_drag());
        assert!(!PointerEvent::pressed(0.0, 0.0).is_drag());
    }

    // ── From<crossterm::event::MouseEvent> ───────────────────────────

    #[test]
    fn from_crossterm_down() {
        let ev = PointerEvent::from(ct(MouseEventKind::Down(MouseButton::Left), 3, 4));
        assert_eq!(ev, PointerEvent::pressed(3.0, 4.0));
    }

    #[test]
    fn from_crossterm_right_down() {
        let ev = PointerEvent::from(ct(MouseEventKind::Down(MouseButton::Right), 0, 0));
        assert_eq!(ev.action, PointerAction::Pressed);
        assert_eq!(ev.buttons, Buttons::SECONDARY);
    }

    #[test]
    fn from_crossterm_up() {
        let ev = PointerEvent::from(ct(MouseEventKind::Up(MouseButton::Left), 7, 8));
        assert_eq!(ev, PointerEvent::released(7.0, 8.0));
    }

    #[test]
    fn from_crossterm_drag_is_move_with_button() {
        let ev = PointerEvent::from(ct(MouseEventKind::Drag(MouseButton::Left), 1, 1));
        assert!(ev.is_drag());
    }

    #[test]
    fn from_crossterm_moved_and_scroll() {
        let moved = PointerEvent::from(ct(MouseEventKind::Moved, 5, 6));
        assert_eq!(moved, PointerEvent::moved(5.0, 6.0, Buttons::NONE));
        let scroll = PointerEvent::from(ct(MouseEventKind::ScrollUp, 5, 6));
        assert_eq!(scroll.action, PointerAction::Moved);
    }
}
