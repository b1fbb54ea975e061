//! # hudkit
//!
//! A stylesheet-driven, retained-mode HUD layer for real-time rendering hosts.
//!
//! hudkit parses a small CSS-like stylesheet and an indentation-nested markup
//! document into an element tree, cascades per-state styles onto every
//! element, lays the tree out against its parent boxes and turns pointer input
//! into Normal/Hover/Active transitions. Painting is left to the host through
//! the [`Canvas`](render::Canvas) trait.
//!
//! ## Core Systems
//!
//! - **[`css`]**: stylesheet parser, typed styles with explicit set flags, cascade
//! - **[`markup`]**: indentation-structured element declarations
//! - **[`dom`]**: slotmap-backed element arena with identity lookups
//! - **[`layout`]**: pixel/percent/far/center box resolution and hit search
//! - **[`event`]**: pointer events, hit-test state machine, callback sink
//! - **[`render`]**: the canvas collaborator and primitive handles
//! - **[`resource`]**: resource addressing and providers
//! - **[`hud`]**: the controller tying everything together
//! - **[`testing`]**: headless collaborators, `Pilot`, tree outline
//! - **[`geometry`]**: Point, Size, Region primitives
//!
//! ```
//! use hudkit::testing::Pilot;
//!
//! let mut pilot = Pilot::new(640.0, 480.0)
//!     .with_css("btn { background-colour: RGBA(128,70,27,255); font: 9; }");
//! let ids = pilot.load_markup("%button .btn (listen) = Okay");
//! let okay = pilot.hud().element(ids[0]).unwrap();
//! assert_eq!(*okay.style().font.get(), 9);
//! assert!(okay.listening);
//! ```

// Foundation
pub mod geometry;

// Core systems
pub mod css;
pub mod dom;
pub mod layout;
pub mod markup;

// Events
pub mod event;

// Collaborators
pub mod render;
pub mod resource;

// Controller
pub mod hud;

// Headless test support
pub mod testing;

pub use hud::{Hud, HudConfig};
pub use resource::LoadError;
