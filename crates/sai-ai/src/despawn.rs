//! Delayed despawn with a fade step.

use tracing::debug;

use sai_core::Countdown;

use crate::Unit;

/// Where a despawn countdown stands.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DespawnState {
    #[default]
    Inactive,
    /// A delay was requested but the countdown has not started.
    Armed,
    Counting,
    /// Invisible; removal follows after the fade delay.
    Fading,
}

impl DespawnState {
    /// Numeric code (0..=3) for diagnostics.
    pub fn code(self) -> u8 {
        match self {
            DespawnState::Inactive => 0,
            DespawnState::Armed    => 1,
            DespawnState::Counting => 2,
            DespawnState::Fading   => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DespawnCountdown {
    state:     DespawnState,
    remaining: Countdown,
}

impl DespawnCountdown {
    #[inline]
    pub fn state(&self) -> DespawnState {
        self.state
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining.remaining()
    }

    /// Arm a despawn `ms` from when it starts; `0` cancels.
    pub fn set(&mut self, ms: u32) {
        self.remaining.reset(ms);
        self.state = if ms > 0 { DespawnState::Armed } else { DespawnState::Inactive };
    }

    /// Begin counting down.
    pub fn start(&mut self) {
        self.state = DespawnState::Counting;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `diff`.  Returns `true` on the tick the unit is removed.
    pub fn update(&mut self, diff: u32, fade_ms: u32, unit: &mut dyn Unit) -> bool {
        match self.state {
            DespawnState::Counting => {
                if self.remaining.tick(diff) {
                    unit.set_visible(false);
                    self.remaining.reset(fade_ms);
                    self.state = DespawnState::Fading;
                    debug!(creature = %unit.id(), "despawn_fading");
                }
                false
            }
            DespawnState::Fading => {
                if !self.remaining.tick(diff) {
                    return false;
                }
                unit.despawn();
                self.reset();
                debug!(creature = %unit.id(), "despawned");
                true
            }
            DespawnState::Inactive | DespawnState::Armed => false,
        }
    }
}
