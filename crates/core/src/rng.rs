//! RNG module - injectable value source for grid generation
//!
//! Grid generation never touches global randomness. It draws token values from
//! a [`ValueSource`], so a seeded [`SimpleRng`] reproduces the same grid and a
//! [`ScriptedValues`] source lays out an exact board for tests and replays.

use crate::types::ValueRange;

/// Source of token values.
pub trait ValueSource {
    /// Draw the next value; implementations must return a value inside `range`.
    fn next_value(&mut self, range: ValueRange) -> u8;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point of the multiplier alone.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Seed from the wall clock (for interactive play).
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Current internal state (for reproducing a round).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl ValueSource for SimpleRng {
    fn next_value(&mut self, range: ValueRange) -> u8 {
        let span = range.span();
        if span == 0 {
            return range.min;
        }
        range.min + self.next_range(span) as u8
    }
}

/// Replays a fixed list of values in row-major order, cycling when exhausted.
///
/// Values outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct ScriptedValues {
    values: Vec<u8>,
    cursor: usize,
}

impl ScriptedValues {
    pub fn new(values: impl Into<Vec<u8>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl ValueSource for ScriptedValues {
    fn next_value(&mut self, range: ValueRange) -> u8 {
        if self.values.is_empty() {
            return range.min;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        range.clamp(v)
    }
}
