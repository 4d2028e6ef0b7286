/// Cancelable fixed-period ticker, driven by the frame clock.
///
/// Time is fed in with `advance`; it reports whether a period completed
/// since the last call.  The remainder carries over to the next frame.
/// A single call fires at most once: whole periods beyond the first are
/// dropped, so a stalled frame never produces a burst.  Cancelling drops
/// any partial period, so a restarted ticker never fires early or catches
/// up on time spent stopped.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    accumulator: Duration,
    running: bool,
}

impl Ticker {
    /// A stopped ticker.  `period` must be non-zero.
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero());
        Self {
            period,
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// (Re)start from a full period.
    pub fn start(&mut self) {
        self.running = true;
        self.accumulator = Duration::ZERO;
    }

    /// Idempotent.
    pub fn cancel(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// True when at least one period completed within `dt`.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.accumulator += dt;
        let mut fired = false;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            fired = true;
        }
        fired
    }
}
