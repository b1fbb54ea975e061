//! Headless testing framework: recording collaborators, Pilot, outline.
//!
//! Use the [`Pilot`] to drive a [`Hud`](crate::hud::Hud) without a real
//! rendering host. [`RecordingCanvas`] and [`RecordingSink`] stand in for the
//! canvas and callback collaborators, and [`outline`] dumps the element tree
//! as plain text for snapshot assertions.

pub mod canvas;
pub mod pilot;
pub mod sink;
pub mod snapshot;

pub use canvas::{CanvasCall, RecordingCanvas};
pub use pilot::{HeadlessHud, Pilot};
pub use sink::{RecordingSink, SinkEvent};
pub use snapshot::outline;
