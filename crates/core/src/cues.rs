//! Audio cue collaborator.
//!
//! The core only reports cues as [`RoundEvent::Cue`](crate::RoundEvent);
//! whoever owns a speaker implements [`CueSink`]. Playback is advisory, so the
//! signature is infallible and implementations swallow their own failures.

use crate::types::Cue;

pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCues;

impl CueSink for NoCues {
    fn play(&mut self, _cue: Cue) {}
}

/// Records cues in order (useful for tests and replays).
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<Cue>,
}

impl CueSink for CueLog {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}
