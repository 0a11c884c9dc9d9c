//! Presentational decorators: card hover accents and the hero parallax.
//!
//! Both are stateless per-event style writers. The hover swap flips a
//! border accent between two palette values; the parallax translates and
//! fades the hero block for the first viewport-height of scroll and then
//! leaves it wherever it was.

use dom::{Document, NodeId};
use tracing::trace;
use viewport::Viewport;

use crate::config::MotionConfig;
use crate::error::MotionError;

pub struct Decor {
    cards: Vec<NodeId>,
    hero: Option<NodeId>,
    accent: String,
    resting: String,
    parallax_factor: f32,
    parallax_fade: f32,
}

impl Decor {
    pub fn mount(doc: &Document, config: &MotionConfig) -> Result<Self, MotionError> {
        Ok(Self {
            cards: doc.query_all(".timeline-item, .future-item")?,
            hero: doc.query(".hero-content")?,
            accent: config.hover_accent.clone(),
            resting: config.hover_resting.clone(),
            parallax_factor: config.parallax_factor,
            parallax_fade: config.parallax_fade,
        })
    }

    /// The card owning `target`, if the pointer event landed on one.
    fn card_for(&self, doc: &Document, target: NodeId) -> Option<NodeId> {
        self.cards.iter().copied().find(|&c| doc.contains(c, target))
    }

    pub fn on_pointer_enter(&self, doc: &mut Document, target: NodeId) {
        if let Some(card) = self.card_for(doc, target) {
            doc.set_style(card, "border-left-color", &self.accent);
            doc.set_style(card, "transition", "border-color 0.3s ease");
            trace!(?card, "card hover enter");
        }
    }

    pub fn on_pointer_leave(&self, doc: &mut Document, target: NodeId) {
        if let Some(card) = self.card_for(doc, target) {
            doc.set_style(card, "border-left-color", &self.resting);
            trace!(?card, "card hover leave");
        }
    }

    /// Parallax: within the first viewport-height of scroll, translate
    /// the hero by a fraction of the offset and fade it linearly; past
    /// that, the last-applied values stick.
    pub fn on_scroll(&self, doc: &mut Document, viewport: &Viewport) {
        let Some(hero) = self.hero else {
            return;
        };
        let scrolled = viewport.scroll_y;
        if scrolled < viewport.height {
            doc.set_style(
                hero,
                "transform",
                &format!("translateY({}px)", scrolled * self.parallax_factor),
            );
            doc.set_style(
                hero,
                "opacity",
                &format!("{}", 1.0 - (scrolled / viewport.height) * self.parallax_fade),
            );
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use viewport::ScrollBehavior;

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);
        let card = doc.append_element(body, "div", "timeline-item");
        let title = doc.append_element(card, "h3", "timeline-title");
        let hero = doc.append_element(body, "div", "hero-content");
        (doc, card, title, hero)
    }

    fn decor(doc: &Document) -> Decor {
        Decor::mount(doc, &MotionConfig::default()).unwrap()
    }

    #[test]
    fn hover_swaps_border_accent() {
        let (mut doc, card, _title, _hero) = page();
        let decor = decor(&doc);

        decor.on_pointer_enter(&mut doc, card);
        assert_eq!(doc.style(card, "border-left-color"), Some("var(--green)"));
        assert_eq!(doc.style(card, "transition"), Some("border-color 0.3s ease"));

        decor.on_pointer_leave(&mut doc, card);
        assert_eq!(
            doc.style(card, "border-left-color"),
            Some("var(--lightest-navy)")
        );
    }

    #[test]
    fn hover_on_descendant_styles_the_card() {
        let (mut doc, card, title, _hero) = page();
        let decor = decor(&doc);
        decor.on_pointer_enter(&mut doc, title);
        assert_eq!(doc.style(card, "border-left-color"), Some("var(--green)"));
        assert_eq!(doc.style(title, "border-left-color"), None);
    }

    #[test]
    fn hover_elsewhere_is_a_noop() {
        let (mut doc, card, _title, hero) = page();
        let decor = decor(&doc);
        decor.on_pointer_enter(&mut doc, hero);
        assert_eq!(doc.style(card, "border-left-color"), None);
        assert_eq!(doc.style(hero, "border-left-color"), None);
    }

    #[test]
    fn parallax_translates_and_fades() {
        let (mut doc, _card, _title, hero) = page();
        let decor = decor(&doc);
        let mut vp = Viewport::new(1280.0, 720.0);

        vp.scroll_to(360.0, ScrollBehavior::Auto);
        decor.on_scroll(&mut doc, &vp);
        assert_eq!(doc.style(hero, "transform"), Some("translateY(180px)"));
        assert_eq!(doc.style(hero, "opacity"), Some("0.75"));
    }

    #[test]
    fn parallax_sticks_past_one_viewport_height() {
        let (mut doc, _card, _title, hero) = page();
        let decor = decor(&doc);
        let mut vp = Viewport::new(1280.0, 720.0);

        vp.scroll_to(700.0, ScrollBehavior::Auto);
        decor.on_scroll(&mut doc, &vp);
        let transform = doc.style(hero, "transform").unwrap().to_string();

        // Beyond the hero's range the last values are left in place.
        vp.scroll_to(2000.0, ScrollBehavior::Auto);
        decor.on_scroll(&mut doc, &vp);
        assert_eq!(doc.style(hero, "transform"), Some(transform.as_str()));
    }

    #[test]
    fn parallax_without_hero_is_a_noop() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);
        let decor = Decor::mount(&doc, &MotionConfig::default()).unwrap();
        let mut vp = Viewport::new(1280.0, 720.0);
        vp.scroll_to(100.0, ScrollBehavior::Auto);
        decor.on_scroll(&mut doc, &vp);
    }
}
