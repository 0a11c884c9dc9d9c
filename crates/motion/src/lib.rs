//! The interaction engine.
//!
//! Wires cosmetic behaviors onto a document tree and drives them with
//! synthetic environment events: a collapsible mobile sidebar, scroll-spy
//! navigation highlighting, smooth anchor scrolling, scroll-triggered
//! reveals, a numeric count-up, hover/parallax decoration, and a
//! page-load fade. Everything runs single-threaded; the only suspension
//! points are the engine's timers and visibility passes.

pub mod anchor;
pub mod config;
pub mod counter;
pub mod decor;
pub mod engine;
pub mod error;
pub mod event;
pub mod nav;
pub mod reveal;
pub mod spy;
pub mod typewriter;

pub use config::{ConfigError, MotionConfig};
pub use engine::{Engine, NavState, TimerTask};
pub use error::MotionError;
pub use event::{InputEvent, Key};
pub use reveal::RevealGroup;
pub use typewriter::Typewriter;
