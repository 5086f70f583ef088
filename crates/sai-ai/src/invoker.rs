//! Periodic check that the escorted players are still around.

use sai_core::{ActorId, Countdown, Position};

use crate::World;

/// Throttled presence check for the actors an escort was started for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvokerRangeMonitor {
    check: Countdown,
}

impl InvokerRangeMonitor {
    pub fn new(interval_ms: u32) -> Self {
        Self { check: Countdown::new(interval_ms) }
    }

    /// Advance by `diff`; `true` when a check is due (then re-armed).
    #[inline]
    pub fn due(&mut self, diff: u32, interval_ms: u32) -> bool {
        self.check.tick_periodic(diff, interval_ms)
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.check.remaining()
    }

    /// Whether the escort still has someone to escort.
    ///
    /// * no tracked actors: always in range;
    /// * exactly one tracked player: it, or any member of its group, within
    ///   `max_distance`;
    /// * otherwise: any tracked player within `max_distance`.  Tracked actors
    ///   that are not players never count, and a list with no players at all
    ///   is in range.
    ///
    /// Actors that left the world count as out of range.
    pub fn in_range(targets: &[ActorId], from: Position, max_distance: f32, world: &dyn World) -> bool {
        let near = |actor: ActorId| {
            world
                .actor_position(actor)
                .is_some_and(|pos| from.within(pos, max_distance))
        };

        if let [only] = targets {
            if world.is_player(*only) {
                return near(*only) || world.group_members(*only).into_iter().any(near);
            }
        }

        let mut players = targets.iter().copied().filter(|&a| world.is_player(a)).peekable();
        if players.peek().is_none() {
            return true;
        }
        players.any(near)
    }
}
