//! Escort session state.
//!
//! # Phases
//!
//! ```text
//!               pause_path                 evade
//!  Travelling ─────────────▶ Paused ───────────────────┐
//!      ▲  │                    │ timer + resume rules  ▼
//!      │  │ evade              ▼                   Returning { pause: Some }
//!      │  └──────────────▶ Returning { pause: None }   │ origin reached
//!      │     origin reached  │                         ▼
//!      └─────────────────────┘                      Paused
//! ```
//!
//! A session only exists while escorting, so "paused without escorting" and
//! "returning without escorting" cannot be expressed.  [`EscortState`] is the
//! flag view of the same information for callers that want it.

use std::sync::Arc;

use bitflags::bitflags;
use tracing::error;

use sai_core::{Countdown, CreatureId, PathId};
use sai_motion::PointId;
use sai_waypoint::{Waypoint, WaypointPath};

bitflags! {
    /// Flag view of the escort phase.
    ///
    /// `PAUSED` and `RETURNING` only ever appear together with `ESCORTING`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EscortState: u8 {
        const ESCORTING = 1 << 0;
        const RETURNING = 1 << 1;
        const PAUSED    = 1 << 2;
    }
}

/// A running pause.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pause {
    pub remaining: Countdown,
    /// Issued before the current waypoint was reached; motion was cut and
    /// must be re-requested on resume.
    pub forced:    bool,
}

impl Pause {
    pub fn new(delay_ms: u32) -> Self {
        Self { remaining: Countdown::new(delay_ms), forced: false }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Travelling,
    Paused(Pause),
    /// Walking back to the out-of-combat position after an evade.
    Returning { pause: Option<Pause>, origin_reached: bool },
}

impl Phase {
    pub fn flags(&self) -> EscortState {
        match self {
            Phase::Travelling => EscortState::ESCORTING,
            Phase::Paused(_)  => EscortState::ESCORTING | EscortState::PAUSED,
            Phase::Returning { pause: None, .. } => EscortState::ESCORTING | EscortState::RETURNING,
            Phase::Returning { pause: Some(_), .. } => {
                EscortState::ESCORTING | EscortState::RETURNING | EscortState::PAUSED
            }
        }
    }

    /// The pause, whether or not the unit is also returning.
    pub fn pause_mut(&mut self) -> Option<&mut Pause> {
        match self {
            Phase::Paused(p) => Some(p),
            Phase::Returning { pause, .. } => pause.as_mut(),
            Phase::Travelling => None,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.flags().contains(EscortState::PAUSED)
    }

    #[inline]
    pub fn is_returning(&self) -> bool {
        matches!(self, Phase::Returning { .. })
    }
}

/// One escort run, from `start_path` to `end_path`.
#[derive(Clone, Debug)]
pub struct EscortSession {
    pub path_id:          PathId,
    pub path:             Arc<WaypointPath>,
    /// 1-based slot of the waypoint currently targeted; 0 before the first
    /// fetch.
    pub cursor:           u32,
    /// Waypoint at `cursor`.
    pub last_wp:          Option<Waypoint>,
    pub repeat:           bool,
    /// The targeted waypoint was reached and the advance has not run yet.
    pub waypoint_reached: bool,
    pub last_reached:     Option<PointId>,
    pub phase:            Phase,
}

impl EscortSession {
    pub fn new(path_id: PathId, path: Arc<WaypointPath>, repeat: bool) -> Self {
        Self {
            path_id,
            path,
            cursor: 0,
            last_wp: None,
            repeat,
            waypoint_reached: false,
            last_reached: None,
            phase: Phase::Travelling,
        }
    }

    /// Move the cursor to the next slot and fetch its waypoint.
    ///
    /// A stored id that disagrees with the slot is logged and used as-is.
    pub fn next_waypoint(&mut self, creature: CreatureId) -> Option<Waypoint> {
        if self.path.is_empty() {
            return None;
        }
        self.cursor += 1;
        let wp = *self.path.get(self.cursor)?;
        if wp.id != self.cursor {
            error!(
                creature = %creature,
                path = %self.path_id,
                waypoint = wp.id,
                expected = self.cursor,
                "waypoint_id_mismatch"
            );
        }
        self.last_wp = Some(wp);
        Some(wp)
    }

    #[inline]
    pub fn at_final_waypoint(&self) -> bool {
        self.path.is_last(self.cursor)
    }

    /// Id of the targeted waypoint for event payloads (0 before the first
    /// fetch).
    #[inline]
    pub fn last_wp_id(&self) -> u32 {
        self.last_wp.map_or(0, |w| w.id)
    }
}
