//! Delta-time model.
//!
//! # Design
//!
//! Every timer in the controller is a countdown decremented by the elapsed
//! milliseconds of the tick that drives it.  Nothing reads the wall clock, so
//! a fixed sequence of deltas always replays to the same state.
//!
//! A countdown *elapses* on the tick whose delta is strictly greater than the
//! remaining time; a delta equal to the remaining time only drains it to zero
//! and the next non-zero delta fires it.

use std::fmt;

/// Millisecond countdown driven by tick deltas.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    remaining_ms: u32,
}

impl Countdown {
    pub const ZERO: Countdown = Countdown { remaining_ms: 0 };

    #[inline]
    pub const fn new(ms: u32) -> Self {
        Self { remaining_ms: ms }
    }

    /// Milliseconds left before the countdown elapses.
    #[inline]
    pub fn remaining(self) -> u32 {
        self.remaining_ms
    }

    /// Overwrite the remaining time.
    #[inline]
    pub fn reset(&mut self, ms: u32) {
        self.remaining_ms = ms;
    }

    /// Consume `diff` milliseconds.
    ///
    /// Returns `true` when the countdown elapsed this tick; the remaining time
    /// is then left untouched so the caller decides what to re-arm it with.
    #[inline]
    pub fn tick(&mut self, diff: u32) -> bool {
        if self.remaining_ms < diff {
            true
        } else {
            self.remaining_ms -= diff;
            false
        }
    }

    /// Like [`tick`][Self::tick] but re-arms to `period` when it elapses.
    #[inline]
    pub fn tick_periodic(&mut self, diff: u32, period: u32) -> bool {
        if self.tick(diff) {
            self.remaining_ms = period;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.remaining_ms)
    }
}
