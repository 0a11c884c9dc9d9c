//! Mobile sidebar controller.
//!
//! A two-state machine around one bit: is the sidebar open. The bit lives
//! in [`NavState`](crate::engine::NavState) — the `active` marker classes
//! on the toggle control and the panel are a view of it, written in
//! lockstep so the pair is always both-present or both-absent.

use dom::{Document, NodeId};
use tracing::debug;
use viewport::{ScrollBehavior, Viewport};

use crate::engine::NavState;
use crate::error::MotionError;
use crate::event::Key;

/// Marker class shared by the toggle control and the panel.
const ACTIVE: &str = "active";

pub struct NavController {
    toggle: Option<NodeId>,
    sidebar: Option<NodeId>,
    links: Vec<NodeId>,
    breakpoint: f32,
}

impl NavController {
    /// Look up the collaborators. Either the toggle or the panel missing
    /// leaves the controller inert.
    pub fn mount(doc: &Document, breakpoint: f32) -> Result<Self, MotionError> {
        let toggle = doc.query(".mobile-menu-toggle")?;
        let sidebar = doc.query(".sidebar")?;
        let links = doc.query_all(".nav-link")?;
        if toggle.is_none() || sidebar.is_none() {
            debug!("sidebar controller inert: toggle or panel missing");
        }
        Ok(Self {
            toggle,
            sidebar,
            links,
            breakpoint,
        })
    }

    fn collaborators(&self) -> Option<(NodeId, NodeId)> {
        Some((self.toggle?, self.sidebar?))
    }

    /// Write the `active` markers to match `state.sidebar_open`.
    fn sync_markers(&self, doc: &mut Document, state: &NavState) {
        let Some((toggle, sidebar)) = self.collaborators() else {
            return;
        };
        if state.sidebar_open {
            doc.add_class(toggle, ACTIVE);
            doc.add_class(sidebar, ACTIVE);
        } else {
            doc.remove_class(toggle, ACTIVE);
            doc.remove_class(sidebar, ACTIVE);
        }
    }

    fn force_closed(&self, doc: &mut Document, state: &mut NavState) {
        if state.sidebar_open {
            state.sidebar_open = false;
            debug!("sidebar closed");
        }
        self.sync_markers(doc, state);
    }

    /// Route a click: toggle flip, narrow-viewport link close, or
    /// outside-click close.
    pub fn on_click(
        &self,
        doc: &mut Document,
        viewport: &Viewport,
        state: &mut NavState,
        target: NodeId,
    ) {
        let Some((toggle, sidebar)) = self.collaborators() else {
            return;
        };
        let narrow = viewport.width <= self.breakpoint;

        if doc.contains(toggle, target) {
            state.sidebar_open = !state.sidebar_open;
            self.sync_markers(doc, state);
            debug!(open = state.sidebar_open, "sidebar toggled");
            return;
        }

        if self.links.iter().any(|&l| doc.contains(l, target)) {
            if narrow {
                self.force_closed(doc, state);
            }
            return;
        }

        if narrow && state.sidebar_open && !doc.contains(sidebar, target) {
            self.force_closed(doc, state);
        }
    }

    /// Escape closes an open sidebar; anything else is ignored.
    pub fn on_key(&self, doc: &mut Document, state: &mut NavState, key: &Key) {
        if *key == Key::Escape && state.sidebar_open {
            self.force_closed(doc, state);
        }
    }

    /// Scroll lock: while the sidebar is open on a narrow viewport, snap
    /// back to the recorded offset; otherwise record the new offset.
    ///
    /// Returns `true` when a snapback happened.
    pub fn on_scroll(&self, viewport: &mut Viewport, state: &mut NavState) -> bool {
        if self.collaborators().is_none() {
            return false;
        }
        if viewport.width <= self.breakpoint && state.sidebar_open {
            viewport.scroll_to(state.last_scroll_offset, ScrollBehavior::Auto);
            true
        } else {
            state.last_scroll_offset = viewport.scroll_y;
            false
        }
    }
}
