use std::time::{Duration, Instant};

/// Deadline-driven fixed-rate timer.
///
/// The first tick fires one `period` after arming, or after an explicit
/// start delay when armed with [`IntervalTimer::delayed`].
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DueTicks {
    pub(crate) ticks: u32,
    pub(crate) dropped: u32,
}

impl IntervalTimer {
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = normalize_period(period);
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn delayed(period: Duration, start_delay: Duration, now: Instant) -> Self {
        Self {
            period: normalize_period(period),
            next_due: now + start_delay,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Cancels the pending deadline and starts counting from `now` again.
    pub fn rearm(&mut self, start_delay: Duration, now: Instant) {
        self.next_due = now + start_delay;
    }

    pub(crate) fn take_due(&mut self, now: Instant, max_ticks: u32) -> DueTicks {
        let max_ticks = max_ticks.max(1);
        let mut ticks = 0u32;
        while self.next_due <= now && ticks < max_ticks {
            self.next_due += self.period;
            ticks += 1;
        }

        let mut dropped = 0u32;
        while self.next_due <= now {
            self.next_due += self.period;
            dropped = dropped.saturating_add(1);
        }

        DueTicks { ticks, dropped }
    }
}

fn normalize_period(period: Duration) -> Duration {
    if period.is_zero() {
        Duration::from_millis(1)
    } else {
        period
    }
}
