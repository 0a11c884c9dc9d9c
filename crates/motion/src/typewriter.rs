//! Typewriter text reveal.
//!
//! Writes a target string into an element one character per period,
//! chaining a one-shot timer per character and stopping on its own when
//! the text is complete. Public API only — the stock engine never starts
//! one, matching the page this models, where the routine exists unused.

use dom::{Document, NodeId};
use scheduler::Timers;
use tracing::debug;

use crate::engine::TimerTask;

pub struct Typewriter {
    element: NodeId,
    chars: Vec<char>,
    period_ms: u64,
    written: usize,
}

impl Typewriter {
    pub const DEFAULT_PERIOD_MS: u64 = 50;

    pub fn new(element: NodeId, text: &str) -> Self {
        Self::with_period(element, text, Self::DEFAULT_PERIOD_MS)
    }

    pub fn with_period(element: NodeId, text: &str, period_ms: u64) -> Self {
        Self {
            element,
            chars: text.chars().collect(),
            period_ms,
            written: 0,
        }
    }

    /// Clear the element and write the first character, scheduling the
    /// next one. An empty target completes immediately.
    pub fn start(&mut self, doc: &mut Document, timers: &mut Timers<TimerTask>) {
        self.written = 0;
        doc.set_text_content(self.element, "");
        debug!(chars = self.chars.len(), "typewriter started");
        self.on_tick(doc, timers);
    }

    /// Append the next character; schedules another tick while characters
    /// remain.
    pub fn on_tick(&mut self, doc: &mut Document, timers: &mut Timers<TimerTask>) {
        if self.written >= self.chars.len() {
            return;
        }
        self.written += 1;
        let text: String = self.chars[..self.written].iter().collect();
        doc.set_text_content(self.element, &text);
        if self.written < self.chars.len() {
            timers.set_timeout(TimerTask::TypewriterTick, self.period_ms);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.written >= self.chars.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let root = doc.root();
        doc.append_child(root, body);
        let title = doc.append_element(body, "h1", "hero-title");
        doc.append_text(title, "placeholder");
        (doc, title)
    }

    fn drain(
        tw: &mut Typewriter,
        doc: &mut Document,
        timers: &mut Timers<TimerTask>,
        now: u64,
    ) {
        for (_, task) in timers.advance_to(now) {
            assert_eq!(task, TimerTask::TypewriterTick);
            tw.on_tick(doc, timers);
        }
    }

    #[test]
    fn reveals_one_character_per_period() {
        let (mut doc, title) = page();
        let mut timers: Timers<TimerTask> = Timers::new();
        let mut tw = Typewriter::new(title, "Hi!");

        tw.start(&mut doc, &mut timers);
        assert_eq!(doc.text_content(title), "H");
        assert_eq!(timers.pending(), 1);

        drain(&mut tw, &mut doc, &mut timers, 50);
        assert_eq!(doc.text_content(title), "Hi");

        drain(&mut tw, &mut doc, &mut timers, 100);
        assert_eq!(doc.text_content(title), "Hi!");
        assert!(tw.is_complete());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn empty_text_completes_without_scheduling() {
        let (mut doc, title) = page();
        let mut timers: Timers<TimerTask> = Timers::new();
        let mut tw = Typewriter::new(title, "");

        tw.start(&mut doc, &mut timers);
        assert_eq!(doc.text_content(title), "");
        assert!(tw.is_complete());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn custom_period_spaces_the_ticks() {
        let (mut doc, title) = page();
        let mut timers: Timers<TimerTask> = Timers::new();
        let mut tw = Typewriter::with_period(title, "ab", 200);

        tw.start(&mut doc, &mut timers);
        assert_eq!(timers.next_deadline(), Some(200));
        drain(&mut tw, &mut doc, &mut timers, 200);
        assert_eq!(doc.text_content(title), "ab");
    }

    #[test]
    fn tick_after_completion_is_a_noop() {
        let (mut doc, title) = page();
        let mut timers: Timers<TimerTask> = Timers::new();
        let mut tw = Typewriter::new(title, "a");
        tw.start(&mut doc, &mut timers);
        assert!(tw.is_complete());
        tw.on_tick(&mut doc, &mut timers);
        assert_eq!(doc.text_content(title), "a");
        assert_eq!(timers.pending(), 0);
    }
}
