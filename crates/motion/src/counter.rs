//! Numeric count-up animation.
//!
//! Each `.future-number` element animates from 0 to the integer already
//! rendered as its text, the first time enough of it scrolls into view.
//! The ramp is a fixed number of fractional increments on a fixed tick
//! cadence; only integer floors are displayed, zero-padded to two
//! digits, and the final frame is the element's original text padded the
//! same way. The `animated` marker class is the one-shot guard.

use std::collections::HashMap;

use dom::{Document, NodeId};
use scheduler::{TimerId, Timers};
use tracing::debug;
use viewport::{IntersectionWatcher, Rect, RootMargin, Viewport};

use crate::config::MotionConfig;
use crate::engine::TimerTask;
use crate::error::MotionError;

/// One-shot guard class; also the hook external styling keys off.
const ANIMATED: &str = "animated";

struct CounterRun {
    timer: TimerId,
    current: f64,
    increment: f64,
    target: f64,
    /// The element's original text, re-rendered padded at completion.
    original: String,
}

pub struct CounterAnimator {
    watcher: IntersectionWatcher<NodeId>,
    runs: HashMap<NodeId, CounterRun>,
    steps: u32,
    tick_ms: u64,
}

impl CounterAnimator {
    pub fn mount(doc: &Document, config: &MotionConfig) -> Result<Self, MotionError> {
        let mut watcher =
            IntersectionWatcher::new(config.counter_threshold, RootMargin::NONE);
        for number in doc.query_all(".future-number")? {
            watcher.observe(number);
        }
        debug!(counters = watcher.watched(), "counter animator mounted");
        Ok(Self {
            watcher,
            runs: HashMap::new(),
            steps: config.counter_steps,
            tick_ms: config.counter_tick_ms,
        })
    }

    /// Run a visibility pass and start a count-up for every element that
    /// newly qualifies and has not animated before.
    pub fn pass(
        &mut self,
        doc: &mut Document,
        viewport: &Viewport,
        rects: &HashMap<NodeId, Rect>,
        timers: &mut Timers<TimerTask>,
    ) {
        let entries = self.watcher.pass(viewport, |t| rects.get(&t).copied());
        for entry in entries {
            if !entry.is_intersecting || doc.has_class(entry.target, ANIMATED) {
                continue;
            }
            doc.add_class(entry.target, ANIMATED);

            let original = doc.text_content(entry.target).trim().to_string();
            // Malformed text: the guard stays but nothing animates.
            let Ok(target) = original.parse::<f64>() else {
                debug!(text = original.as_str(), "counter target not numeric");
                continue;
            };

            let timer = timers.set_interval(
                TimerTask::CounterTick {
                    element: entry.target,
                },
                self.tick_ms,
            );
            self.runs.insert(
                entry.target,
                CounterRun {
                    timer,
                    current: 0.0,
                    increment: target / f64::from(self.steps),
                    target,
                    original,
                },
            );
            debug!(target, "counter started");
        }
    }

    /// Advance one element's count-up by one tick.
    pub fn on_tick(
        &mut self,
        doc: &mut Document,
        timers: &mut Timers<TimerTask>,
        element: NodeId,
    ) {
        let Some(run) = self.runs.get_mut(&element) else {
            return;
        };
        run.current += run.increment;
        if run.current < run.target {
            doc.set_text_content(element, &format!("{:02}", run.current.floor() as i64));
            return;
        }
        if let Some(run) = self.runs.remove(&element) {
            doc.set_text_content(element, &format!("{:0>2}", run.original));
            timers.cancel(run.timer);
            debug!(target = run.target, "counter finished");
        }
    }

    /// Count-ups still in flight.
    pub fn running(&self) -> usize {
        self.runs.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
