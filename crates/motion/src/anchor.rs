//! In-page anchor scrolling.
//!
//! Clicks on fragment anchors suppress the default jump and scroll the
//! viewport to the target's top, offset a little for breathing room, with
//! smooth behavior recorded on the viewport.

use std::collections::HashMap;

use dom::{Document, NodeId};
use tracing::debug;
use viewport::{Rect, ScrollBehavior, Viewport};

use crate::error::MotionError;

pub struct AnchorScroller {
    anchors: Vec<NodeId>,
    offset: f32,
}

impl AnchorScroller {
    pub fn mount(doc: &Document, offset: f32) -> Result<Self, MotionError> {
        Ok(Self {
            anchors: doc.query_all(r##"a[href^="#"]"##)?,
            offset,
        })
    }

    /// Handle a click. Returns `true` when the viewport was scrolled.
    ///
    /// A bare `#` href and a fragment with no matching element both
    /// swallow the click without scrolling.
    pub fn on_click(
        &self,
        doc: &Document,
        viewport: &mut Viewport,
        rects: &HashMap<NodeId, Rect>,
        target: NodeId,
    ) -> bool {
        let Some(&anchor) = self.anchors.iter().find(|&&a| doc.contains(a, target)) else {
            return false;
        };
        let Some(href) = doc.attribute(anchor, "href") else {
            return false;
        };
        if href == "#" {
            return false;
        }
        let Some(fragment) = href.strip_prefix('#') else {
            return false;
        };
        let Some(section) = doc.element_by_id(fragment) else {
            return false;
        };
        let Some(rect) = rects.get(&section) else {
            return false;
        };

        viewport.scroll_to(rect.y - self.offset, ScrollBehavior::Smooth);
        debug!(fragment, to = viewport.scroll_y, "anchor scroll");
        true
    }
}
