//! Pilot: programmatic interaction with a headless Hud.
//!
//! The `Pilot` wraps a [`Hud`] built on the recording collaborators and
//! provides methods to simulate pointer input and inspect the result.

use crate::dom::node::{Element, ElementId, ElementSpec};
use crate::event::handler::{Callback, HitOutcome};
use crate::event::input::{Buttons, PointerEvent};
use crate::hud::{Hud, HudConfig};
use crate::resource::MemoryResources;
use crate::testing::canvas::RecordingCanvas;
use crate::testing::sink::{RecordingSink, SinkEvent};

/// The Hud type a [`Pilot`] drives.
pub type HeadlessHud = Hud<RecordingCanvas, MemoryResources, RecordingSink>;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless hud driver for testing.
///
/// # Examples
///
/// ```
/// use hudkit::testing::Pilot;
/// use hudkit::event::Callback;
///
/// let mut pilot = Pilot::new(200.0, 100.0)
///     .with_css("#ok:active { font: 3; }");
/// pilot.load_markup("%button #ok (listen) = Okay");
/// pilot.click(10.0, 10.0);
/// assert_eq!(pilot.count(Callback::Activated), 1);
/// ```
pub struct Pilot {
    hud: HeadlessHud,
}

impl Pilot {
    /// Create a headless hud with the given viewport.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_config(HudConfig::new().with_viewport(width, height))
    }

    /// Create a headless hud from a config.
    pub fn with_config(config: HudConfig) -> Self {
        Self {
            hud: Hud::new(
                config,
                RecordingCanvas::new(),
                MemoryResources::new(),
                RecordingSink::new(),
            ),
        }
    }

    /// Load a stylesheet string (builder).
    pub fn with_css(mut self, css: &str) -> Self {
        self.hud.load_css_str(css);
        self
    }

    /// Make a resource available to `Hud::load_css` / `Hud::load_markup`.
    pub fn with_resource(mut self, group: &str, name: &str, text: &str) -> Self {
        self.hud.resources_mut().insert(group, name, text);
        self
    }

    /// Load a markup string; returns the created elements.
    pub fn load_markup(&mut self, markup: &str) -> Vec<ElementId> {
        self.hud.load_markup_str(markup)
    }

    /// Create a single element.
    pub fn create(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        self.hud.create_element(parent, spec)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Move the pointer with no button held.
    pub fn move_to(&mut self, x: f32, y: f32) -> HitOutcome {
        self.hud
            .handle_pointer(&PointerEvent::moved(x, y, Buttons::NONE))
    }

    /// Press the primary button.
    pub fn press(&mut self, x: f32, y: f32) -> HitOutcome {
        self.hud.handle_pointer(&PointerEvent::pressed(x, y))
    }

    /// Release all buttons.
    pub fn release(&mut self, x: f32, y: f32) -> HitOutcome {
        self.hud.handle_pointer(&PointerEvent::released(x, y))
    }

    /// Press then release at the same point.
    pub fn click(&mut self, x: f32, y: f32) {
        self.press(x, y);
        self.release(x, y);
    }

    /// Press at `from`, move to `to` with the primary button held, release.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.press(from.0, from.1);
        self.hud
            .handle_pointer(&PointerEvent::moved(to.0, to.1, Buttons::PRIMARY));
        self.release(to.0, to.1);
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.hud.set_viewport(width, height);
    }

    // ── Inspection ──────────────────────────────────────────────────

    pub fn hud(&self) -> &HeadlessHud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut HeadlessHud {
        &mut self.hud
    }

    /// First element with the given identity.
    pub fn element(&self, identity: &str) -> Option<&Element> {
        self.hud.find(identity).and_then(|id| self.hud.element(id))
    }

    /// Callbacks fired so far.
    pub fn events(&self) -> &[SinkEvent] {
        self.hud.sink().events()
    }

    /// Take the callbacks fired so far.
    pub fn take_events(&mut self) -> Vec<SinkEvent> {
        self.hud.sink_mut().take()
    }

    /// How many times `callback` fired.
    pub fn count(&self, callback: Callback) -> usize {
        self.hud.sink().count(callback)
    }

    /// Text outline of the element tree.
    pub fn outline(&self) -> String {
        crate::testing::snapshot::outline(self.hud.tree())
    }
}
