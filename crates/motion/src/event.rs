//! Synthetic environment events.

use dom::NodeId;

/// A key identity, reduced to what the engine reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

/// An input event dispatched into the engine by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A click landing on the given node.
    Click { target: NodeId },
    /// A key press anywhere in the page.
    KeyDown { key: Key },
    /// The viewport scrolled to a new vertical offset.
    Scroll { to: f32 },
    /// The pointer entered the given node.
    PointerEnter { target: NodeId },
    /// The pointer left the given node.
    PointerLeave { target: NodeId },
    /// The page finished loading.
    Load,
}
