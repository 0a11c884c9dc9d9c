//! Scroll-triggered reveals.
//!
//! One generic engine over a declarative table of [`RevealGroup`]
//! descriptors. Matched elements start hidden (opacity 0, offset from
//! their resting place) and slide in the first time their visibility
//! predicate is satisfied. The end state is idempotent: re-entering the
//! band re-fires harmlessly and nothing ever reverses on exit.

use std::collections::{HashMap, HashSet};

use dom::{Document, NodeId};
use tracing::{debug, trace};
use viewport::{IntersectionWatcher, Rect, RootMargin, Viewport};

use crate::config::MotionConfig;
use crate::error::MotionError;

/// One reveal behavior: which elements, how much of them must be
/// visible, and where they slide in from.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealGroup {
    pub selector: String,
    pub threshold: f32,
    /// CSS root-margin shorthand applied to the viewport band.
    pub root_margin: String,
    /// Starting offset from the resting place, in pixels (dx, dy).
    pub enter_from: (f32, f32),
}

impl RevealGroup {
    /// The stock table: content blocks rise up, section numbers slide in
    /// from the left.
    pub fn defaults(config: &MotionConfig) -> Vec<RevealGroup> {
        vec![
            RevealGroup {
                selector: ".timeline-item, .strength-item, .future-item, \
                           .about-text, .about-philosophy"
                    .to_string(),
                threshold: config.content_threshold,
                root_margin: config.content_root_margin.clone(),
                enter_from: (0.0, config.content_rise),
            },
            RevealGroup {
                selector: ".section-number".to_string(),
                threshold: config.number_threshold,
                root_margin: "0px".to_string(),
                enter_from: (-config.number_slide, 0.0),
            },
        ]
    }

    /// The inline transform an element of this group starts with.
    fn hidden_transform(&self) -> String {
        let (dx, dy) = self.enter_from;
        if dx != 0.0 {
            format!("translateX({dx}px)")
        } else {
            format!("translateY({dy}px)")
        }
    }

    /// The inline transform written when the element reveals.
    fn resting_transform(&self) -> String {
        if self.enter_from.0 != 0.0 {
            "translateX(0)".to_string()
        } else {
            "translateY(0)".to_string()
        }
    }
}

struct GroupWatcher {
    watcher: IntersectionWatcher<NodeId>,
    resting: String,
}

/// Drives every [`RevealGroup`] against the shared visibility pass.
pub struct RevealEngine {
    groups: Vec<GroupWatcher>,
    revealed: HashSet<NodeId>,
}

impl RevealEngine {
    /// Query each group's elements, write their hidden starting styles,
    /// and start watching them.
    pub fn mount(
        doc: &mut Document,
        groups: &[RevealGroup],
        transition: &str,
    ) -> Result<Self, MotionError> {
        let mut mounted = Vec::with_capacity(groups.len());
        for group in groups {
            let margin = RootMargin::parse(&group.root_margin)?;
            let mut watcher = IntersectionWatcher::new(group.threshold, margin);
            let hidden = group.hidden_transform();

            let elements = doc.query_all(&group.selector)?;
            for &el in &elements {
                doc.set_style(el, "opacity", "0");
                doc.set_style(el, "transform", &hidden);
                doc.set_style(el, "transition", transition);
                watcher.observe(el);
            }
            debug!(
                selector = group.selector.as_str(),
                elements = elements.len(),
                "reveal group mounted"
            );

            mounted.push(GroupWatcher {
                watcher,
                resting: group.resting_transform(),
            });
        }
        Ok(Self {
            groups: mounted,
            revealed: HashSet::new(),
        })
    }

    /// Run a visibility pass and reveal every element that newly
    /// qualifies.
    pub fn pass(
        &mut self,
        doc: &mut Document,
        viewport: &Viewport,
        rects: &HashMap<NodeId, Rect>,
    ) {
        for group in &mut self.groups {
            let entries = group.watcher.pass(viewport, |t| rects.get(&t).copied());
            for entry in entries {
                if !entry.is_intersecting {
                    continue;
                }
                doc.set_style(entry.target, "opacity", "1");
                doc.set_style(entry.target, "transform", &group.resting);
                self.revealed.insert(entry.target);
                trace!(target = ?entry.target, "revealed");
            }
        }
    }

    /// How many distinct elements have revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use viewport::Viewport;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);
        let item = doc.append_element(body, "div", "timeline-item");
        let number = doc.append_element(body, "span", "section-number");
        (doc, item, number)
    }

    fn engine(doc: &mut Document) -> RevealEngine {
        let config = MotionConfig::default();
        RevealEngine::mount(doc, &RevealGroup::defaults(&config), &config.reveal_transition)
            .unwrap()
    }

    #[test]
    fn mount_hides_targets() {
        let (mut doc, item, number) = page();
        let _engine = engine(&mut doc);

        assert_eq!(doc.style(item, "opacity"), Some("0"));
        assert_eq!(doc.style(item, "transform"), Some("translateY(20px)"));
        assert_eq!(
            doc.style(item, "transition"),
            Some("opacity 0.6s ease, transform 0.6s ease")
        );
        assert_eq!(doc.style(number, "transform"), Some("translateX(-20px)"));
    }

    #[test]
    fn reveal_on_enter() {
        let (mut doc, item, number) = page();
        let mut engine = engine(&mut doc);
        let vp = Viewport::new(1280.0, 720.0);

        let mut rects = HashMap::new();
        rects.insert(item, Rect::new(0.0, 100.0, 600.0, 100.0));
        rects.insert(number, Rect::new(0.0, 250.0, 60.0, 40.0));
        engine.pass(&mut doc, &vp, &rects);

        assert_eq!(doc.style(item, "opacity"), Some("1"));
        assert_eq!(doc.style(item, "transform"), Some("translateY(0)"));
        assert_eq!(doc.style(number, "transform"), Some("translateX(0)"));
        assert_eq!(engine.revealed_count(), 2);
    }

    #[test]
    fn offscreen_targets_stay_hidden() {
        let (mut doc, item, number) = page();
        let mut engine = engine(&mut doc);
        let vp = Viewport::new(1280.0, 720.0);

        let mut rects = HashMap::new();
        rects.insert(item, Rect::new(0.0, 5000.0, 600.0, 100.0));
        rects.insert(number, Rect::new(0.0, 5200.0, 60.0, 40.0));
        engine.pass(&mut doc, &vp, &rects);

        assert_eq!(doc.style(item, "opacity"), Some("0"));
        assert_eq!(engine.revealed_count(), 0);
    }

    #[test]
    fn reveal_is_idempotent_and_never_reverses() {
        let (mut doc, item, _number) = page();
        let mut engine = engine(&mut doc);
        let mut vp = Viewport::new(1280.0, 720.0);

        let mut rects = HashMap::new();
        rects.insert(item, Rect::new(0.0, 100.0, 600.0, 100.0));
        engine.pass(&mut doc, &vp, &rects);
        assert_eq!(doc.style(item, "opacity"), Some("1"));

        // Scroll far away: the exit entry must not re-hide the element.
        vp.scroll_to(10_000.0, viewport::ScrollBehavior::Auto);
        engine.pass(&mut doc, &vp, &rects);
        assert_eq!(doc.style(item, "opacity"), Some("1"));
        assert_eq!(doc.style(item, "transform"), Some("translateY(0)"));

        // And scrolling back re-fires the enter without any artifact.
        vp.scroll_to(0.0, viewport::ScrollBehavior::Auto);
        engine.pass(&mut doc, &vp, &rects);
        assert_eq!(doc.style(item, "opacity"), Some("1"));
        assert_eq!(engine.revealed_count(), 1);
    }

    #[test]
    fn content_margin_holds_back_elements_near_the_fold() {
        let (mut doc, item, _number) = page();
        let mut engine = engine(&mut doc);
        let vp = Viewport::new(1280.0, 720.0);

        // Over half of the item is inside the raw viewport, but the 50px
        // bottom exclusion leaves only 5px inside the band: under the 10%
        // threshold, so it stays hidden until scrolled further in.
        let mut rects = HashMap::new();
        rects.insert(item, Rect::new(0.0, 665.0, 600.0, 100.0));
        engine.pass(&mut doc, &vp, &rects);
        assert_eq!(doc.style(item, "opacity"), Some("0"));
    }
}
