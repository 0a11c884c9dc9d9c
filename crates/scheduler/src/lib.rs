//! Deterministic timer queue for the interaction engine.
//!
//! Single-threaded and driven by an explicit millisecond clock instead of
//! wall time, so interaction traces replay identically in tests and in
//! the demo shell. One-shot timeouts and repeating intervals are the only
//! suspension points the engine has; firings are handed back to the
//! caller in deadline order and run strictly after the handler that
//! scheduled them.

// ─────────────────────────────────────────────────────────────────────────────
// TimerId
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque identifier for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

// ─────────────────────────────────────────────────────────────────────────────
// TimerEntry
// ─────────────────────────────────────────────────────────────────────────────

/// Internal representation of a scheduled timer.
struct TimerEntry<T> {
    id: TimerId,
    /// Absolute millisecond deadline.
    fire_at: u64,
    /// If `Some`, the timer repeats with this period.
    period: Option<u64>,
    /// Registration order, tie-break among equal deadlines (FIFO).
    seq: u64,
    task: T,
}

// ─────────────────────────────────────────────────────────────────────────────
// Timers
// ─────────────────────────────────────────────────────────────────────────────

/// A queue of one-shot and repeating timers over a virtual clock.
///
/// The clock only moves through [`advance_to`](Timers::advance_to); it
/// never moves backward.
pub struct Timers<T> {
    entries: Vec<TimerEntry<T>>,
    now: u64,
    next_id: u64,
    next_seq: u64,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            now: 0,
            next_id: 1,
            next_seq: 0,
        }
    }

    /// The current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of scheduled timers.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// The earliest deadline among scheduled timers.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.fire_at).min()
    }

    fn schedule(&mut self, task: T, fire_at: u64, period: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            id,
            fire_at,
            period,
            seq,
            task,
        });
        id
    }

    /// Schedule a one-shot timer `delay_ms` from now.
    pub fn set_timeout(&mut self, task: T, delay_ms: u64) -> TimerId {
        let fire_at = self.now + delay_ms;
        self.schedule(task, fire_at, None)
    }

    /// Schedule a repeating timer with the given period. A zero period is
    /// clamped to 1 ms so an advance can never loop forever.
    pub fn set_interval(&mut self, task: T, period_ms: u64) -> TimerId {
        let period = period_ms.max(1);
        let fire_at = self.now + period;
        self.schedule(task, fire_at, Some(period))
    }

    /// Cancel a timer. Unknown ids are a no-op (the timer may have already
    /// fired and been removed).
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }
}

impl<T: Clone> Timers<T> {
    /// Move the clock to `now_ms` and return every firing due by then, in
    /// deadline order (FIFO among equal deadlines). Repeating timers
    /// reschedule themselves and may fire several times in one advance.
    ///
    /// A `now_ms` in the past is a no-op: the clock never rewinds.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<(TimerId, T)> {
        if now_ms < self.now {
            return Vec::new();
        }
        self.now = now_ms;

        let mut fired: Vec<(u64, u64, TimerId, T)> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].fire_at <= now_ms {
                let entry = &mut self.entries[i];
                match entry.period {
                    Some(period) => {
                        // Collect every missed occurrence, then reschedule
                        // past `now_ms`.
                        while entry.fire_at <= now_ms {
                            fired.push((
                                entry.fire_at,
                                entry.seq,
                                entry.id,
                                entry.task.clone(),
                            ));
                            entry.fire_at += period;
                        }
                        i += 1;
                    }
                    None => {
                        let entry = self.entries.swap_remove(i);
                        fired.push((entry.fire_at, entry.seq, entry.id, entry.task));
                    }
                }
            } else {
                i += 1;
            }
        }

        fired.sort_by_key(|(fire_at, seq, _, _)| (*fire_at, *seq));
        fired
            .into_iter()
            .map(|(_, _, id, task)| (id, task))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
