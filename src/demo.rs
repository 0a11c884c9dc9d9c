//! The sample portfolio page.
//!
//! Builds the document the stylesheet-and-markup side of the page would
//! provide — hero, about, journey, strengths, and future sections behind
//! a sidebar with a mobile toggle — plus a hand-laid-out rect per
//! element the engine observes, standing in for a layout engine.

use dom::{Document, NodeId};
use motion::{Engine, MotionConfig, MotionError};
use viewport::{Rect, Viewport};

/// Vertical extent of each content section.
const SECTION_H: f32 = 800.0;

/// Handles into the demo page, for scripting traces and reading state
/// back out.
pub struct PageHandles {
    pub body: NodeId,
    pub toggle: NodeId,
    pub sidebar: NodeId,
    pub nav_links: Vec<NodeId>,
    pub hero: NodeId,
    pub hero_content: NodeId,
    /// about, journey, strengths, future — in page order.
    pub sections: Vec<NodeId>,
    pub section_numbers: Vec<NodeId>,
    pub about_text: NodeId,
    pub about_philosophy: NodeId,
    pub timeline_items: Vec<NodeId>,
    pub strength_items: Vec<NodeId>,
    pub future_items: Vec<NodeId>,
    pub future_numbers: Vec<NodeId>,
}

impl PageHandles {
    /// Document-space y offset of the named section, for scripting
    /// scroll stops.
    pub fn section_top(&self, index: usize, viewport_height: f32) -> f32 {
        viewport_height + index as f32 * SECTION_H
    }
}

/// Build the portfolio document and its layout.
///
/// The hero fills the first `height` pixels; the four content sections
/// stack below it, [`SECTION_H`] each.
pub fn build(width: f32, height: f32) -> (Document, PageHandles, Vec<(NodeId, Rect)>) {
    let mut doc = Document::new();
    let root = doc.root();
    let body = doc.create_element("body");
    doc.append_child(root, body);

    let mut layout: Vec<(NodeId, Rect)> = Vec::new();

    // Navigation chrome.
    let toggle = doc.append_element(body, "button", "mobile-menu-toggle");
    let sidebar = doc.append_element(body, "nav", "sidebar");
    let mut nav_links = Vec::new();
    for fragment in ["#about", "#journey", "#strengths", "#future"] {
        nav_links.push(doc.append_element_with(
            sidebar,
            "a",
            &[("class", "nav-link"), ("href", fragment)],
        ));
    }

    // Hero.
    let hero = doc.append_element_with(body, "section", &[("class", "hero"), ("id", "home")]);
    let hero_content = doc.append_element(hero, "div", "hero-content");
    let title = doc.append_element(hero_content, "h1", "hero-title");
    doc.append_text(title, "Building quiet, deliberate software.");
    layout.push((hero, Rect::new(0.0, 0.0, width, height)));

    let mut sections = Vec::new();
    let mut section_numbers = Vec::new();
    let content_x = 40.0;
    let content_w = width - 80.0;

    let section = |doc: &mut Document,
                       layout: &mut Vec<(NodeId, Rect)>,
                       id: &str,
                       number: &str,
                       y: f32| {
        let el = doc.append_element_with(body, "section", &[("class", "section"), ("id", id)]);
        layout.push((el, Rect::new(0.0, y, width, SECTION_H)));
        let num = doc.append_element(el, "span", "section-number");
        doc.append_text(num, number);
        layout.push((num, Rect::new(content_x, y + 40.0, 60.0, 40.0)));
        (el, num)
    };

    // About.
    let about_y = height;
    let (about, about_num) = section(&mut doc, &mut layout, "about", "01", about_y);
    sections.push(about);
    section_numbers.push(about_num);
    let about_text = doc.append_element(about, "div", "about-text");
    doc.append_text(about_text, "I care about the seams between systems.");
    layout.push((about_text, Rect::new(content_x, about_y + 100.0, content_w, 200.0)));
    let about_philosophy = doc.append_element(about, "div", "about-philosophy");
    doc.append_text(about_philosophy, "Slow is smooth; smooth is fast.");
    layout.push((
        about_philosophy,
        Rect::new(content_x, about_y + 320.0, content_w, 200.0),
    ));

    // Journey.
    let journey_y = height + SECTION_H;
    let (journey, journey_num) = section(&mut doc, &mut layout, "journey", "02", journey_y);
    sections.push(journey);
    section_numbers.push(journey_num);
    let mut timeline_items = Vec::new();
    for (i, label) in ["First terminal", "First team", "First production outage"]
        .iter()
        .enumerate()
    {
        let item = doc.append_element(journey, "div", "timeline-item");
        doc.append_text(item, label);
        layout.push((
            item,
            Rect::new(content_x, journey_y + 100.0 + i as f32 * 220.0, content_w, 200.0),
        ));
        timeline_items.push(item);
    }

    // Strengths.
    let strengths_y = height + 2.0 * SECTION_H;
    let (strengths, strengths_num) =
        section(&mut doc, &mut layout, "strengths", "03", strengths_y);
    sections.push(strengths);
    section_numbers.push(strengths_num);
    let mut strength_items = Vec::new();
    for (i, label) in ["Debugging", "Writing", "Listening"].iter().enumerate() {
        let item = doc.append_element(strengths, "div", "strength-item");
        doc.append_text(item, label);
        layout.push((
            item,
            Rect::new(content_x, strengths_y + 100.0 + i as f32 * 220.0, content_w, 200.0),
        ));
        strength_items.push(item);
    }

    // Future.
    let future_y = height + 3.0 * SECTION_H;
    let (future, future_num) = section(&mut doc, &mut layout, "future", "04", future_y);
    sections.push(future);
    section_numbers.push(future_num);
    let mut future_items = Vec::new();
    let mut future_numbers = Vec::new();
    for (i, &(count, label)) in [("05", "years shipping"), ("12", "languages tried"), ("42", "ideas parked")]
        .iter()
        .enumerate()
    {
        let item_y = future_y + 100.0 + i as f32 * 220.0;
        let item = doc.append_element(future, "div", "future-item");
        layout.push((item, Rect::new(content_x, item_y, content_w, 200.0)));
        let number = doc.append_element(item, "div", "future-number");
        doc.append_text(number, count);
        layout.push((number, Rect::new(content_x, item_y + 20.0, 80.0, 60.0)));
        let caption = doc.append_element(item, "p", "future-label");
        doc.append_text(caption, label);
        future_items.push(item);
        future_numbers.push(number);
    }

    let handles = PageHandles {
        body,
        toggle,
        sidebar,
        nav_links,
        hero,
        hero_content,
        sections,
        section_numbers,
        about_text,
        about_philosophy,
        timeline_items,
        strength_items,
        future_items,
        future_numbers,
    };
    (doc, handles, layout)
}

/// Build the page and mount the engine over it, with every element's
/// geometry recorded.
pub fn mount(
    width: f32,
    height: f32,
    config: MotionConfig,
) -> Result<(Engine, PageHandles), MotionError> {
    let (doc, handles, layout) = build(width, height);
    let mut engine = Engine::mount(doc, Viewport::new(width, height), config)?;
    for (node, rect) in layout {
        engine.set_rect(node, rect);
    }
    Ok((engine, handles))
}
