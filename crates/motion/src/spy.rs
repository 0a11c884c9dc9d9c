//! Scroll-spy: marks the nav link for the section currently in view.

use std::collections::HashMap;

use dom::{Document, NodeId};
use tracing::debug;
use viewport::{IntersectionWatcher, Rect, RootMargin, Viewport};

use crate::config::MotionConfig;
use crate::engine::NavState;
use crate::error::MotionError;

const ACTIVE: &str = "active";

pub struct ScrollSpy {
    watcher: IntersectionWatcher<NodeId>,
    links: Vec<NodeId>,
    hero: Option<NodeId>,
    about_link: Option<NodeId>,
    activation_limit: f32,
}

impl ScrollSpy {
    pub fn mount(doc: &Document, config: &MotionConfig) -> Result<Self, MotionError> {
        let margin = RootMargin::parse(&config.spy_root_margin)?;
        let mut watcher = IntersectionWatcher::new(config.spy_threshold, margin);
        for section in doc.query_all(".section, .hero")? {
            watcher.observe(section);
        }
        debug!(sections = watcher.watched(), "scroll-spy mounted");

        Ok(Self {
            watcher,
            links: doc.query_all(".nav-link")?,
            hero: doc.query(".hero")?,
            about_link: doc.query(r##"a[href="#about"]"##)?,
            activation_limit: config.hero_activation_limit,
        })
    }

    /// Move the `active` marker to the link targeting `section_id`.
    ///
    /// A section identified `home` coalesces onto the `#about` link. The
    /// marker is cleared from every link first, so at most one link holds
    /// it afterwards.
    fn activate(&self, doc: &mut Document, state: &mut NavState, section_id: &str) {
        state.active_link = None;
        let fragment = format!("#{section_id}");
        for &link in &self.links {
            doc.remove_class(link, ACTIVE);
            let href = doc.attribute(link, "href").map(str::to_string);
            let matches = href.as_deref() == Some(fragment.as_str())
                || (section_id == "home" && href.as_deref() == Some("#about"));
            if matches {
                doc.add_class(link, ACTIVE);
                state.active_link = Some(link);
            }
        }
        debug!(section = section_id, "scroll-spy activated");
    }

    /// Run a visibility pass; the last qualifying section processed wins.
    pub fn pass(
        &mut self,
        doc: &mut Document,
        viewport: &Viewport,
        rects: &HashMap<NodeId, Rect>,
        state: &mut NavState,
    ) {
        let entries = self.watcher.pass(viewport, |t| rects.get(&t).copied());
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            if let Some(id) = doc.attribute(entry.target, "id").map(str::to_string) {
                self.activate(doc, state, &id);
            }
        }
    }

    /// Load-time default: with a hero present and the page still near the
    /// top, the `#about` link starts out active without waiting for a
    /// visibility pass.
    pub fn on_load(&self, doc: &mut Document, viewport: &Viewport, state: &mut NavState) {
        if self.hero.is_none() || viewport.scroll_y >= self.activation_limit {
            return;
        }
        if let Some(link) = self.about_link {
            doc.add_class(link, ACTIVE);
            state.active_link = Some(link);
            debug!("scroll-spy default link activated");
        }
    }
}
