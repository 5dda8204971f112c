//! Session module - timed round state machine
//!
//! ```text
//! Active --tick (time > 1)--> Active
//! Active --tick (time hits 0)--> Ended(TimeUp)
//! Active --abort--> Ended(Aborted)
//! ```
//!
//! `Ended` is terminal: ticks, matches and aborts after it change nothing.
//! The session owns its [`RoundClock`], and ending cancels the clock in the
//! same call, so no tick can land after the transition.

use log::info;

use crate::clock::RoundClock;
use crate::types::{CoreError, EndReason};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Active,
    Ended(EndReason),
}

/// Outcome of a finished round, handed to whoever records scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundResult {
    pub score: u32,
    pub reason: EndReason,
    pub duration_secs: u32,
}

impl RoundResult {
    /// Only rounds that ran out the clock go to the leaderboard.
    pub fn is_rankable(&self) -> bool {
        self.reason == EndReason::TimeUp
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    score: u32,
    time_remaining: u32,
    duration_secs: u32,
    state: SessionState,
    clock: RoundClock,
    /// Set once on the transition to `Ended`; cleared when acknowledged.
    result: Option<RoundResult>,
}

impl Session {
    /// Start an active session with the full duration on the clock.
    pub fn new(duration_secs: u32) -> Result<Self, CoreError> {
        if duration_secs == 0 {
            return Err(CoreError::InvalidConfiguration {
                reason: "round duration must be positive",
            });
        }
        Ok(Self {
            score: 0,
            time_remaining: duration_secs,
            duration_secs,
            state: SessionState::Active,
            clock: RoundClock::new(),
            result: None,
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.state {
            SessionState::Active => None,
            SessionState::Ended(reason) => Some(reason),
        }
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    /// One elapsed second. Returns the result if this tick ended the round.
    pub fn tick(&mut self) -> Option<RoundResult> {
        if !self.is_active() {
            return None;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            return Some(self.end(EndReason::TimeUp));
        }
        None
    }

    /// Feed frame time through the clock and run every tick that came due.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<RoundResult> {
        let due = self.clock.advance(elapsed_ms);
        for _ in 0..due {
            if let Some(result) = self.tick() {
                return Some(result);
            }
        }
        None
    }

    /// Add points for a match. Ignored once ended.
    pub fn on_match(&mut self, points: u32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.score = self.score.saturating_add(points);
        true
    }

    /// Stop the round from outside. Returns the result if this call ended it.
    pub fn abort(&mut self) -> Option<RoundResult> {
        if !self.is_active() {
            return None;
        }
        Some(self.end(EndReason::Aborted))
    }

    /// Peek at the unacknowledged result.
    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Acknowledge and take the result; later calls return `None`.
    pub fn take_result(&mut self) -> Option<RoundResult> {
        self.result.take()
    }

    fn end(&mut self, reason: EndReason) -> RoundResult {
        self.clock.cancel();
        self.state = SessionState::Ended(reason);
        let result = RoundResult {
            score: self.score,
            reason,
            duration_secs: self.duration_secs,
        };
        self.result = Some(result);
        info!(
            "round ended ({}) with score {} and {}s left",
            reason.as_str(),
            self.score,
            self.time_remaining
        );
        result
    }
}
