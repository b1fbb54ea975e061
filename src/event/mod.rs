//! Event system: pointer input, hit-test state machine, callback sink.

pub mod handler;
pub mod input;
pub mod sink;

pub use handler::{Callback, HitOutcome, HitTester};
pub use input::{Buttons, PointerAction, PointerEvent};
pub use sink::EventSink;
