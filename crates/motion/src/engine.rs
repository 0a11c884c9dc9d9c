//! The engine: owns the document, the viewport, the timer queue, and the
//! behavior controllers, and routes host-dispatched events to them.
//!
//! Interaction state lives in [`NavState`] — the marker classes on the
//! page are a view of it, kept in lockstep, never read back as the
//! source of truth. Element geometry is host-supplied through
//! [`set_rect`](Engine::set_rect); a visibility pass recomputes
//! intersections after mount, load, every scroll, and every timer
//! advance.

use std::collections::HashMap;

use dom::{Document, NodeId};
use scheduler::Timers;
use tracing::debug;
use viewport::{Rect, ScrollBehavior, Viewport};

use crate::anchor::AnchorScroller;
use crate::config::MotionConfig;
use crate::counter::CounterAnimator;
use crate::decor::Decor;
use crate::error::MotionError;
use crate::event::InputEvent;
use crate::nav::NavController;
use crate::reveal::{RevealEngine, RevealGroup};
use crate::spy::ScrollSpy;
use crate::typewriter::Typewriter;

/// Interaction state, owned by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavState {
    pub sidebar_open: bool,
    /// Vertical offset recorded before the sidebar opened; the scroll
    /// lock snaps back to it.
    pub last_scroll_offset: f32,
    pub active_link: Option<NodeId>,
}

/// Payload carried by the engine's timers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerTask {
    /// Second half of the page-load fade.
    LoadFade,
    /// One counter increment for the given element.
    CounterTick { element: NodeId },
    /// One typewriter character.
    TypewriterTick,
}

pub struct Engine {
    doc: Document,
    viewport: Viewport,
    timers: Timers<TimerTask>,
    rects: HashMap<NodeId, Rect>,
    state: NavState,
    config: MotionConfig,

    nav: NavController,
    spy: ScrollSpy,
    anchor: AnchorScroller,
    reveal: RevealEngine,
    counter: CounterAnimator,
    decor: Decor,
    body: Option<NodeId>,
    typewriter: Option<Typewriter>,
}

impl Engine {
    /// Query all collaborators, write the reveal groups' hidden starting
    /// styles, and run an initial visibility pass.
    ///
    /// Missing collaborators disable the behaviors that need them;
    /// mounting only fails on malformed selectors or margins, which are
    /// programming errors, not page states.
    pub fn mount(
        mut doc: Document,
        viewport: Viewport,
        config: MotionConfig,
    ) -> Result<Self, MotionError> {
        let nav = NavController::mount(&doc, config.mobile_breakpoint)?;
        let spy = ScrollSpy::mount(&doc, &config)?;
        let anchor = AnchorScroller::mount(&doc, config.anchor_offset)?;
        let reveal = RevealEngine::mount(
            &mut doc,
            &RevealGroup::defaults(&config),
            &config.reveal_transition,
        )?;
        let counter = CounterAnimator::mount(&doc, &config)?;
        let decor = Decor::mount(&doc, &config)?;
        let body = doc.query("body")?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "engine mounted"
        );

        let mut engine = Self {
            doc,
            viewport,
            timers: Timers::new(),
            rects: HashMap::new(),
            state: NavState::default(),
            config,
            nav,
            spy,
            anchor,
            reveal,
            counter,
            decor,
            body,
            typewriter: None,
        };
        engine.visibility_pass();
        Ok(engine)
    }

    // =======================================================================
    // Host surface
    // =======================================================================

    /// Record an element's document-space geometry, standing in for what
    /// a layout engine would produce.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// The current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Timers still scheduled (counters mid-ramp, a pending fade).
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Distinct elements revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.reveal.revealed_count()
    }

    /// Route one host event through the behaviors that listen for it.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::Click { target } => {
                self.nav
                    .on_click(&mut self.doc, &self.viewport, &mut self.state, target);
                if self
                    .anchor
                    .on_click(&self.doc, &mut self.viewport, &self.rects, target)
                {
                    self.after_scroll();
                }
            }
            InputEvent::KeyDown { key } => {
                self.nav.on_key(&mut self.doc, &mut self.state, &key);
            }
            InputEvent::Scroll { to } => {
                self.viewport.scroll_to(to, ScrollBehavior::Auto);
                self.after_scroll();
            }
            InputEvent::PointerEnter { target } => {
                self.decor.on_pointer_enter(&mut self.doc, target);
            }
            InputEvent::PointerLeave { target } => {
                self.decor.on_pointer_leave(&mut self.doc, target);
            }
            InputEvent::Load => {
                self.spy.on_load(&mut self.doc, &self.viewport, &mut self.state);
                self.begin_load_fade();
                self.visibility_pass();
            }
        }
    }

    /// Move the virtual clock forward, run every timer due by then, and
    /// finish with a visibility pass.
    pub fn advance_to(&mut self, now_ms: u64) {
        let fired = self.timers.advance_to(now_ms);
        for (_, task) in fired {
            match task {
                TimerTask::LoadFade => self.finish_load_fade(),
                TimerTask::CounterTick { element } => {
                    self.counter
                        .on_tick(&mut self.doc, &mut self.timers, element);
                }
                TimerTask::TypewriterTick => {
                    if let Some(tw) = self.typewriter.as_mut() {
                        tw.on_tick(&mut self.doc, &mut self.timers);
                    }
                }
            }
        }
        self.visibility_pass();
    }

    /// Install and start a typewriter on `element`. Not called by any
    /// stock behavior; hosts opt in.
    pub fn start_typewriter(&mut self, element: NodeId, text: &str, period_ms: u64) {
        let mut tw = Typewriter::with_period(element, text, period_ms);
        tw.start(&mut self.doc, &mut self.timers);
        self.typewriter = Some(tw);
    }

    // =======================================================================
    // Internal plumbing
    // =======================================================================

    /// Scroll side effects in page registration order: parallax first,
    /// then the navigation lock (which may snap the offset back), then a
    /// visibility pass against the settled position.
    fn after_scroll(&mut self) {
        self.decor.on_scroll(&mut self.doc, &self.viewport);
        self.nav.on_scroll(&mut self.viewport, &mut self.state);
        self.visibility_pass();
    }

    fn visibility_pass(&mut self) {
        self.spy
            .pass(&mut self.doc, &self.viewport, &self.rects, &mut self.state);
        self.reveal.pass(&mut self.doc, &self.viewport, &self.rects);
        self.counter
            .pass(&mut self.doc, &self.viewport, &self.rects, &mut self.timers);
    }

    fn begin_load_fade(&mut self) {
        let Some(body) = self.body else {
            return;
        };
        self.doc.set_style(body, "opacity", "0");
        self.timers
            .set_timeout(TimerTask::LoadFade, self.config.load_fade_delay_ms);
        debug!("load fade scheduled");
    }

    fn finish_load_fade(&mut self) {
        let Some(body) = self.body else {
            return;
        };
        self.doc
            .set_style(body, "transition", &self.config.load_fade_transition);
        self.doc.set_style(body, "opacity", "1");
    }
}

// ===========================================================================
// Tests
// ===========================================================================
