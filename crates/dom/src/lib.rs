//! Document substrate for the interaction engine.
//!
//! An append-only document tree referenced by plain `NodeId` indices.
//! Nodes live for the lifetime of the page view and are never deallocated;
//! building a new [`Document`] is the only way state resets.

pub mod node;
pub mod selector;
pub mod tree;

pub use node::*;
pub use selector::{Selector, SelectorError, SelectorList};
pub use tree::Document;
