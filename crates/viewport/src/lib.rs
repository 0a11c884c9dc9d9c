//! Viewport metrics and visibility observation.
//!
//! Element geometry is an input here: the host records a document-space
//! [`Rect`] per element, standing in for what a layout engine would
//! produce. On top of that this crate answers the one question the
//! interaction engine keeps asking: "how much of this element is inside
//! the (possibly margin-adjusted) viewport band right now, and did that
//! cross the configured threshold?"

use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Rect
// ─────────────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle in document space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// The overlapping region of two rects, or `Rect::ZERO` when disjoint.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Rect::ZERO;
        }
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Returns `true` when the rects overlap or share an edge/corner.
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Viewport
// ─────────────────────────────────────────────────────────────────────────────

/// How a programmatic scroll was requested. The offset is applied
/// immediately either way — the easing of a smooth scroll is presentation,
/// like a CSS transition — but the requested behavior is recorded so the
/// host (and tests) can tell the two apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

/// The visible window onto the document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
    pub last_scroll_behavior: ScrollBehavior,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            last_scroll_behavior: ScrollBehavior::Auto,
        }
    }

    /// Scroll to a vertical offset, clamped at the top of the document.
    pub fn scroll_to(&mut self, y: f32, behavior: ScrollBehavior) {
        self.scroll_y = y.max(0.0);
        self.last_scroll_behavior = behavior;
    }

    /// The currently visible region in document space.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RootMargin
// ─────────────────────────────────────────────────────────────────────────────

/// Failure to parse a root-margin string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarginError {
    #[error("empty margin")]
    Empty,
    #[error("margin takes 1 to 4 values, got {0}")]
    BadArity(usize),
    #[error("margin value `{0}` must end in `px` or `%`")]
    BadUnit(String),
    #[error("margin value `{0}` is not a number")]
    BadNumber(String),
}

/// One side of a root margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Margin {
    Px(f32),
    /// Resolved against the viewport's corresponding dimension.
    Percent(f32),
}

impl Margin {
    pub const ZERO: Margin = Margin::Px(0.0);

    fn resolve(&self, dimension: f32) -> f32 {
        match *self {
            Margin::Px(v) => v,
            Margin::Percent(v) => dimension * v / 100.0,
        }
    }

    fn parse(part: &str) -> Result<Self, MarginError> {
        if let Some(number) = part.strip_suffix("px") {
            number
                .parse::<f32>()
                .map(Margin::Px)
                .map_err(|_| MarginError::BadNumber(part.to_string()))
        } else if let Some(number) = part.strip_suffix('%') {
            number
                .parse::<f32>()
                .map(Margin::Percent)
                .map_err(|_| MarginError::BadNumber(part.to_string()))
        } else {
            Err(MarginError::BadUnit(part.to_string()))
        }
    }
}

/// Margins applied to the viewport band before intersection testing.
/// Positive values grow the band outward, negative values shrink it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: Margin,
    pub right: Margin,
    pub bottom: Margin,
    pub left: Margin,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::NONE
    }
}

impl RootMargin {
    pub const NONE: RootMargin = RootMargin {
        top: Margin::ZERO,
        right: Margin::ZERO,
        bottom: Margin::ZERO,
        left: Margin::ZERO,
    };

    /// Parse the CSS shorthand: 1–4 whitespace-separated `px`/`%` values
    /// in top / right / bottom / left order.
    pub fn parse(input: &str) -> Result<Self, MarginError> {
        let parts: Vec<Margin> = input
            .split_whitespace()
            .map(Margin::parse)
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [] => Err(MarginError::Empty),
            [all] => Ok(Self {
                top: *all,
                right: *all,
                bottom: *all,
                left: *all,
            }),
            [vertical, horizontal] => Ok(Self {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, horizontal, bottom] => Ok(Self {
                top: *top,
                right: *horizontal,
                bottom: *bottom,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Self {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            more => Err(MarginError::BadArity(more.len())),
        }
    }

    /// The margin-adjusted band for a viewport. Top/bottom percentages
    /// resolve against the viewport height, left/right against its width.
    pub fn apply(&self, viewport: &Viewport) -> Rect {
        let top = self.top.resolve(viewport.height);
        let bottom = self.bottom.resolve(viewport.height);
        let left = self.left.resolve(viewport.width);
        let right = self.right.resolve(viewport.width);

        let visible = viewport.visible_rect();
        Rect::new(
            visible.x - left,
            visible.y - top,
            visible.w + left + right,
            visible.h + top + bottom,
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Intersection watching
// ─────────────────────────────────────────────────────────────────────────────

/// A visibility-state change for one watched target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry<T> {
    pub target: T,
    /// Fraction of the target's area inside the band, in `0.0..=1.0`.
    pub ratio: f32,
    /// Whether the target currently satisfies the watcher's threshold.
    pub is_intersecting: bool,
}

struct Watched<T> {
    target: T,
    was_intersecting: Option<bool>,
}

/// Watches a set of targets against a ratio threshold inside a
/// margin-adjusted viewport band.
///
/// [`pass`](IntersectionWatcher::pass) emits an entry for every target
/// whose intersecting state changed since the previous pass, plus an
/// initial entry per target on its first pass.
pub struct IntersectionWatcher<T> {
    threshold: f32,
    margin: RootMargin,
    targets: Vec<Watched<T>>,
}

impl<T: Copy + PartialEq> IntersectionWatcher<T> {
    pub fn new(threshold: f32, margin: RootMargin) -> Self {
        Self {
            threshold,
            margin,
            targets: Vec::new(),
        }
    }

    /// Start watching `target`. Watching the same target twice is a no-op.
    pub fn observe(&mut self, target: T) {
        if self.targets.iter().any(|w| w.target == target) {
            return;
        }
        self.targets.push(Watched {
            target,
            was_intersecting: None,
        });
    }

    pub fn watched(&self) -> usize {
        self.targets.len()
    }

    /// Recompute visibility for every target. `rect_of` supplies each
    /// target's document-space geometry; targets without geometry are
    /// skipped and keep their previous state.
    pub fn pass(
        &mut self,
        viewport: &Viewport,
        mut rect_of: impl FnMut(T) -> Option<Rect>,
    ) -> Vec<IntersectionEntry<T>> {
        let band = self.margin.apply(viewport);
        let mut entries = Vec::new();

        for watched in &mut self.targets {
            let Some(rect) = rect_of(watched.target) else {
                continue;
            };

            let touches = rect.touches(&band);
            let ratio = if rect.area() > 0.0 {
                rect.intersect(&band).area() / rect.area()
            } else {
                0.0
            };
            let is_intersecting = if rect.area() > 0.0 && self.threshold > 0.0 {
                ratio >= self.threshold
            } else {
                touches
            };

            if watched.was_intersecting != Some(is_intersecting) {
                watched.was_intersecting = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: watched.target,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
