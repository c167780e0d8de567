//! # Tick Clock
//!
//! Fixed-step pacing for driving [`crate::LabelEngine::tick`] off wall time.
//! Every tick advances the engine by the same `dt`; a slow frame is paid
//! back with extra ticks, up to [`MAX_CATCH_UP`] at once.

use std::time::{Duration, Instant};

/// Most ticks released by a single [`TickClock::poll`]. Anything beyond is
/// dropped so a stalled process does not replay minutes of animation.
pub const MAX_CATCH_UP: u32 = 8;

/// Releases fixed-length ticks as wall time passes.
#[derive(Debug, Clone)]
pub struct TickClock {
    step: Duration,
    next_due: Instant,
    ticks: u64,
    late_ticks: u64,
}

impl TickClock {
    /// A clock at `tick_rate` ticks per second (at least 1), first tick due
    /// one step after `start`.
    #[must_use]
    pub fn new(tick_rate: u32, start: Instant) -> Self {
        let step = Duration::from_secs(1) / tick_rate.max(1);
        Self { step, next_due: start + step, ticks: 0, late_ticks: 0 }
    }

    /// Number of ticks due at `now`. The caller runs exactly that many.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.next_due <= now {
            if due == MAX_CATCH_UP {
                self.next_due = now + self.step;
                break;
            }
            self.next_due += self.step;
            due += 1;
        }
        self.ticks += u64::from(due);
        due
    }

    /// Records how long one tick's work took; longer than a step is late.
    pub fn record(&mut self, work: Duration) {
        if work > self.step {
            self.late_ticks += 1;
        }
    }

    /// Time left until the next tick, zero if one is already due.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Seconds per tick, the `dt` handed to the engine.
    #[must_use]
    pub fn dt(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Ticks released so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks whose recorded work overran the step.
    #[must_use]
    pub fn late_ticks(&self) -> u64 {
        self.late_ticks
    }
}
