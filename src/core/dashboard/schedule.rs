//! Fixed-period tick deadlines.

use std::time::{Duration, Instant};

/// Deadline following `last` once the work for `last` finished at `now`.
///
/// Normally this is `last + period`. When the work overran, the deadline skips
/// ahead by whole periods to the first one still in the future instead of
/// queueing the missed ticks: `last + ceil((now - last) / period) * period`,
/// never less than one period.
pub fn next_deadline(last: Instant, now: Instant, period: Duration) -> Instant {
    if period.is_zero() {
        return now.max(last);
    }

    let behind = now.saturating_duration_since(last).as_nanos();
    let step = period.as_nanos();
    let periods = behind.div_ceil(step).max(1);

    // More than u32::MAX missed periods: restart one period from now.
    match u32::try_from(periods) {
        Ok(n) => last + period * n,
        Err(_) => now + period,
    }
}

/// Running deadline of the main loop
#[derive(Debug, Clone, Copy)]
pub struct TickCadence {
    deadline: Instant,
    period: Duration,
}

impl TickCadence {
    /// First deadline one period after `start`.
    pub fn starting_at(start: Instant, period: Duration) -> Self {
        Self {
            deadline: start + period,
            period,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the current deadline, clamped to zero.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Move past the current deadline, realigning if `now` is already beyond it.
    pub fn advance(&mut self, now: Instant) -> Instant {
        self.deadline = next_deadline(self.deadline, now, self.period);
        self.deadline
    }
}
