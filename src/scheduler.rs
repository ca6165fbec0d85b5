//! Owned timers for the work that runs on its own cadence instead of once
//! per frame: formation steps, spider spawns, boss updates, the boss arrival
//! delay and the staggered shots of a targeted burst.
//!
//! The scheduler never runs anything itself. `advance` reports which timers
//! came due and the game dispatches them, so every timer only carries the
//! parameters it needs and can be cancelled like any other value.

/// What a timer does when it fires.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerKind {
    FormationStep,
    SpiderSpawn,
    BossUpdate,
    BossArrival,
    /// One deferred shot of a targeted burst, aimed when the burst began.
    BurstShot { angle: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    /// Milliseconds until the next firing; may dip below zero mid-advance.
    remaining: i64,
    /// `Some` for repeating timers.
    period: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` once after `delay_ms`.
    pub fn once(&mut self, kind: TimerKind, delay_ms: u32) -> TimerId {
        self.push(kind, delay_ms, None)
    }

    /// Fire `kind` every `period_ms`, first firing one period from now.
    /// A zero period is treated as one millisecond.
    pub fn every(&mut self, kind: TimerKind, period_ms: u32) -> TimerId {
        let period = period_ms.max(1);
        self.push(kind, period, Some(period))
    }

    fn push(&mut self, kind: TimerKind, delay_ms: u32, period: Option<u32>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            kind,
            remaining: delay_ms as i64,
            period,
        });
        id
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel every timer whose kind matches; returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&TimerKind) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.kind));
        before - self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn count_where(&self, mut pred: impl FnMut(&TimerKind) -> bool) -> usize {
        self.timers.iter().filter(|t| pred(&t.kind)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Move the clock forward and collect every firing, in timer order.
    ///
    /// A repeating timer whose period is shorter than `elapsed_ms` fires
    /// once per elapsed period. One-shot timers are removed once fired.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        let elapsed = elapsed_ms as i64;
        self.timers.retain_mut(|timer| {
            timer.remaining -= elapsed;
            match timer.period {
                Some(period) => {
                    while timer.remaining <= 0 {
                        fired.push(timer.kind.clone());
                        timer.remaining += period as i64;
                    }
                    true
                }
                None if timer.remaining <= 0 => {
                    fired.push(timer.kind.clone());
                    false
                }
                None => true,
            }
        });
        fired
    }
}
