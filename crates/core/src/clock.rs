//! Round clock - cancellable once-per-second tick source
//!
//! The frame loop feeds elapsed milliseconds in; the clock releases one tick
//! per full period. Cancelling is permanent: a cancelled clock drops its
//! backlog and never releases another tick.

use crate::types::TICK_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundClock {
    period_ms: u32,
    accum_ms: u32,
    cancelled: bool,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::with_period(TICK_MS)
    }

    pub fn with_period(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            accum_ms: 0,
            cancelled: false,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Milliseconds accumulated towards the next tick.
    pub fn pending_ms(&self) -> u32 {
        self.accum_ms
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.accum_ms = 0;
    }

    /// Add elapsed time; returns how many ticks became due.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.accum_ms = self.accum_ms.saturating_add(elapsed_ms);
        let due = self.accum_ms / self.period_ms;
        self.accum_ms %= self.period_ms;
        due
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new()
    }
}
