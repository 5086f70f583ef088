//! Following another unit until a landmark creature is nearby.

use tracing::{debug, info};

use sai_core::{ActorId, AiConfig, Countdown, CreatureEntry, CreatureId, QuestId};
use sai_motion::MotionMaster;

use crate::{Unit, World};

/// How a completed follow is credited to the followed player.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreditKind {
    /// Kill credit for the creature entry `credit`, shared with the group.
    #[default]
    Kill,
    /// Event credit for quest `credit`, shared with the group.
    Event,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FollowSession {
    /// Looked up through the world on every use; may vanish at any time.
    pub target:        ActorId,
    pub distance:      f32,
    pub angle:         f32,
    pub credit:        u32,
    pub arrival_entry: CreatureEntry,
    pub credit_kind:   CreditKind,
    pub poll:          Countdown,
}

#[derive(Clone, Debug, Default)]
pub struct FollowController {
    session: Option<FollowSession>,
}

impl FollowController {
    #[inline]
    pub fn session(&self) -> Option<&FollowSession> {
        self.session.as_ref()
    }

    #[inline]
    pub fn is_following(&self) -> bool {
        self.session.is_some()
    }

    /// Begin following `target`.  Negative distance or angle select the
    /// configured defaults.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        &mut self,
        motion:        &mut dyn MotionMaster,
        config:        &AiConfig,
        target:        ActorId,
        distance:      f32,
        angle:         f32,
        credit:        u32,
        arrival_entry: CreatureEntry,
        credit_kind:   CreditKind,
    ) {
        let distance = if distance >= 0.0 { distance } else { config.default_follow_distance };
        let angle = if angle >= 0.0 { angle } else { config.default_follow_angle };
        self.session = Some(FollowSession {
            target,
            distance,
            angle,
            credit,
            arrival_entry,
            credit_kind,
            poll: Countdown::new(config.follow_poll_interval_ms),
        });
        motion.move_follow(target, distance, angle);
        debug!(target = %target, distance, angle, arrival = %arrival_entry, "follow_started");
    }

    /// Advance the arrival poll.  Returns `true` once a creature of the
    /// arrival entry is within interaction distance.
    pub fn poll(&mut self, diff: u32, unit: &dyn Unit, world: &dyn World, config: &AiConfig) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.poll.tick(diff) {
            return false;
        }
        let found = world
            .find_nearest_creature(session.arrival_entry, unit.position(), config.interaction_distance, unit.id())
            .is_some();
        if !found {
            session.poll.reset(config.follow_poll_interval_ms);
        }
        found
    }

    /// Re-request follow motion (after an evade).  `false` if the target is
    /// gone or nothing is followed.
    pub fn resume_motion(&self, motion: &mut dyn MotionMaster, world: &dyn World) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if world.actor_position(session.target).is_none() {
            return false;
        }
        motion.move_follow(session.target, session.distance, session.angle);
        true
    }

    /// End the follow and hand back what was being followed.
    pub fn take(&mut self) -> Option<FollowSession> {
        self.session.take()
    }

    pub fn reset(&mut self) {
        self.session = None;
    }
}

/// Grant the credit of a completed follow.  Only players receive credit.
pub fn grant_follow_credit(world: &mut dyn World, session: &FollowSession, source: CreatureId) {
    if !world.is_player(session.target) {
        return;
    }
    match session.credit_kind {
        CreditKind::Kill => {
            world.reward_player_and_group_at_event(session.target, CreatureEntry(session.credit), source);
        }
        CreditKind::Event => {
            world.group_event_happens(session.target, QuestId(session.credit), source);
        }
    }
    info!(creature = %source, player = %session.target, credit = session.credit, "follow_credit_granted");
}
