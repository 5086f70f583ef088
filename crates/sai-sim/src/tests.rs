//! Integration tests for sai-sim.

use std::sync::Arc;

use sai_ai::{CreditKind, EscortError, QuestStatus, World};
use sai_core::{ActorId, CreatureEntry, CreatureId, PathId, Position, QuestId, SaiError};
use sai_motion::{MotionInform, MotionKind, MotionMaster, PointId};
use sai_script::{EventLog, SmartEvent};
use sai_waypoint::{WaypointStore, WaypointStoreBuilder};

use crate::{CreatureSpec, NoopObserver, Zone, ZoneBuilder, ZoneConfig, ZoneError, ZoneObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const ESCORT: CreatureId = CreatureId(1);
const LANDMARK: CreatureId = CreatureId(2);
const PLAYER: ActorId = ActorId(5000);
const QUEST: QuestId = QuestId(42);

fn p(x: f32, y: f32, z: f32) -> Position {
    Position::new(x, y, z)
}

/// Path 1: three waypoints five units apart along +x.
fn store() -> Arc<WaypointStore> {
    let mut b = WaypointStoreBuilder::new();
    b.add_path(PathId(1), [p(5.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(15.0, 0.0, 0.0)]);
    Arc::new(b.build())
}

fn escort_spec() -> CreatureSpec {
    CreatureSpec::new(ESCORT, CreatureEntry(100), Position::ORIGIN)
}

/// One escort creature at the origin and one player holding `QUEST`.
fn escort_zone() -> Zone<EventLog> {
    ZoneBuilder::new(store(), ZoneConfig::default())
        .spawn(escort_spec(), EventLog::new())
        .player(PLAYER, Position::ORIGIN)
        .quest(PLAYER, QUEST)
        .build()
        .unwrap()
}

fn log(zone: &Zone<EventLog>, id: CreatureId) -> &EventLog {
    &zone.creature(id).unwrap().script
}

#[derive(Default)]
struct Recorder {
    arrivals: Vec<(CreatureId, MotionInform)>,
    despawns: Vec<CreatureId>,
    ticks:    usize,
    last_now: u64,
}

impl ZoneObserver for Recorder {
    fn on_arrival(&mut self, creature: CreatureId, inform: MotionInform) {
        self.arrivals.push((creature, inform));
    }

    fn on_despawn(&mut self, creature: CreatureId) {
        self.despawns.push(creature);
    }

    fn on_tick_end(&mut self, now_ms: u64, _creatures: usize) {
        self.ticks += 1;
        self.last_now = now_ms;
    }
}

// ── ZoneBuilder validation ────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_and_initializes_creatures() {
        let zone = escort_zone();
        assert_eq!(zone.creature_count(), 1);
        assert_eq!(log(&zone, ESCORT).kinds(), vec![SmartEvent::Respawn]);
        assert_eq!(log(&zone, ESCORT).resets(), 1);
        assert_eq!(zone.world.quest_status(PLAYER, QUEST), QuestStatus::Incomplete);
        assert_eq!(zone.world.actor_position(ActorId::from(ESCORT)), Some(Position::ORIGIN));
    }

    #[test]
    fn duplicate_creature_errors() {
        let result = ZoneBuilder::new(store(), ZoneConfig::default())
            .spawn(escort_spec(), EventLog::new())
            .spawn(escort_spec(), EventLog::new())
            .build();
        assert!(matches!(result, Err(ZoneError::DuplicateCreature(ESCORT))));
    }

    #[test]
    fn negative_reward_distance_errors() {
        let config = ZoneConfig { group_reward_distance: -1.0, ..ZoneConfig::default() };
        let result = ZoneBuilder::<EventLog>::new(store(), config).build();
        assert!(matches!(result, Err(ZoneError::Core(SaiError::Config(_)))));
    }

    #[test]
    fn zero_speed_errors() {
        let mut config = ZoneConfig::default();
        config.motion.walk_speed = 0.0;
        let result = ZoneBuilder::<EventLog>::new(store(), config).build();
        assert!(matches!(result, Err(ZoneError::Motion(_))));
    }

    #[test]
    fn group_with_unknown_player_errors() {
        let result = ZoneBuilder::<EventLog>::new(store(), ZoneConfig::default())
            .player(PLAYER, Position::ORIGIN)
            .group([PLAYER, ActorId(9)])
            .build();
        assert!(matches!(result, Err(ZoneError::Core(SaiError::ActorNotFound(ActorId(9))))));
    }

    #[test]
    fn player_in_two_groups_errors() {
        let result = ZoneBuilder::<EventLog>::new(store(), ZoneConfig::default())
            .player(PLAYER, Position::ORIGIN)
            .player(ActorId(2), Position::ORIGIN)
            .group([PLAYER, ActorId(2)])
            .group([PLAYER])
            .build();
        assert!(matches!(result, Err(ZoneError::AlreadyGrouped(PLAYER))));
    }

    #[test]
    fn quest_for_unknown_player_errors() {
        let result = ZoneBuilder::<EventLog>::new(store(), ZoneConfig::default())
            .quest(PLAYER, QUEST)
            .build();
        assert!(matches!(result, Err(ZoneError::Core(SaiError::ActorNotFound(PLAYER)))));
    }
}

// ── Clock and commands ────────────────────────────────────────────────────────

#[cfg(test)]
mod zone_tests {
    use super::*;

    #[test]
    fn run_for_lands_exactly() {
        let mut zone = escort_zone();
        let mut rec = Recorder::default();
        zone.run_for(250, 100, &mut rec);
        assert_eq!(zone.now_ms(), 250);
        assert_eq!(rec.ticks, 3);
        assert_eq!(rec.last_now, 250);
    }

    #[test]
    fn command_unknown_creature_errors() {
        let mut zone = escort_zone();
        let result = zone.command(CreatureId(99), |ai, ctx| ai.set_data(ctx, 1, 2));
        assert!(matches!(result, Err(ZoneError::Core(SaiError::CreatureNotFound(CreatureId(99))))));
    }

    #[test]
    fn escort_rejected_in_combat() {
        let mut zone = escort_zone();
        zone.creature_mut(ESCORT).unwrap().body.in_combat = true;
        let result = zone.start_escort(ESCORT, PathId(1), false, PLAYER, Some(QUEST));
        assert!(matches!(result, Err(ZoneError::Escort(EscortError::InCombat))));
        assert_eq!(zone.creature(ESCORT).unwrap().ai.escort().escort_quest(), None);
    }

    #[test]
    fn patrolling_creature_loops_its_path() {
        let mut zone = ZoneBuilder::new(store(), ZoneConfig::default())
            .spawn(escort_spec().patrol(PathId(1)), EventLog::new())
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        zone.run_for(20_000, 100, &mut rec);

        let laps = rec
            .arrivals
            .iter()
            .filter(|(_, i)| i.kind == MotionKind::Path && i.point == Some(PointId::Waypoint(1)))
            .count();
        assert!(laps >= 2);
        let creature = zone.creature(ESCORT).unwrap();
        assert!(creature.ai.patrol().is_patrolling());
        assert!(!creature.ai.escort().is_escorting());
    }

    #[test]
    fn idle_creatures_stay_put() {
        let mut zone = escort_zone();
        zone.run_for(5_000, 100, &mut NoopObserver);
        assert_eq!(zone.creature(ESCORT).unwrap().body.position, Position::ORIGIN);
        assert_eq!(zone.creature_count(), 1);
    }
}

// ── End-to-end escort ─────────────────────────────────────────────────────────

#[cfg(test)]
mod escort_tests {
    use super::*;

    #[test]
    fn escort_completes_quest() {
        let mut zone = escort_zone();
        let mut rec = Recorder::default();
        zone.start_escort(ESCORT, PathId(1), false, PLAYER, Some(QUEST)).unwrap();
        zone.run_for(10_000, 100, &mut rec);

        let creature = zone.creature(ESCORT).unwrap();
        assert!(!creature.ai.escort().is_escorting());
        assert_eq!(creature.body.position, p(15.0, 0.0, 0.0));
        assert_eq!(zone.world.quest_status(PLAYER, QUEST), QuestStatus::Complete);

        let reached: Vec<u32> = log(&zone, ESCORT)
            .args_of(SmartEvent::WaypointReached)
            .iter()
            .map(|a| a.a)
            .collect();
        assert_eq!(reached, vec![1, 2, 3]);
        assert_eq!(log(&zone, ESCORT).count(SmartEvent::WaypointEnded), 1);
        assert_eq!(rec.arrivals.len(), 3);
        assert!(rec.arrivals.iter().all(|(c, i)| *c == ESCORT && i.kind == MotionKind::Path));
    }

    #[test]
    fn wandering_player_fails_quest() {
        let mut zone = escort_zone();
        zone.start_escort(ESCORT, PathId(1), false, PLAYER, Some(QUEST)).unwrap();
        zone.run_for(2_000, 100, &mut NoopObserver);
        zone.world.move_player(PLAYER, p(500.0, 0.0, 0.0)).unwrap();
        zone.run_for(2_000, 100, &mut NoopObserver);

        let creature = zone.creature(ESCORT).unwrap();
        assert!(!creature.ai.escort().is_escorting());
        assert_eq!(creature.motion.current_kind(), MotionKind::Idle);
        assert_eq!(zone.world.quest_status(PLAYER, QUEST), QuestStatus::Failed);
        assert_eq!(log(&zone, ESCORT).count(SmartEvent::WaypointStopped), 1);
    }

    #[test]
    fn group_members_near_share_credit() {
        let near = ActorId(2);
        let far = ActorId(3);
        let mut zone = ZoneBuilder::new(store(), ZoneConfig::default())
            .spawn(escort_spec(), EventLog::new())
            .player(PLAYER, Position::ORIGIN)
            .player(near, p(10.0, 0.0, 0.0))
            .player(far, p(200.0, 0.0, 0.0))
            .quest(PLAYER, QUEST)
            .quest(near, QUEST)
            .quest(far, QUEST)
            .group([PLAYER, near, far])
            .build()
            .unwrap();
        zone.start_escort(ESCORT, PathId(1), false, PLAYER, Some(QUEST)).unwrap();
        zone.run_for(10_000, 100, &mut NoopObserver);

        assert_eq!(zone.world.quest_status(PLAYER, QUEST), QuestStatus::Complete);
        assert_eq!(zone.world.quest_status(near, QUEST), QuestStatus::Complete);
        assert_eq!(zone.world.quest_status(far, QUEST), QuestStatus::Incomplete);
    }

    #[test]
    fn evade_returns_then_finishes() {
        let mut zone = escort_zone();
        zone.start_escort(ESCORT, PathId(1), false, PLAYER, Some(QUEST)).unwrap();
        zone.run_for(1_000, 100, &mut NoopObserver);

        let ooc = zone.creature(ESCORT).unwrap().body.position;
        zone.command(ESCORT, |ai, ctx| ai.enter_combat(ctx, Some(ActorId(777)))).unwrap();
        zone.creature_mut(ESCORT).unwrap().body.in_combat = true;
        zone.run_for(500, 100, &mut NoopObserver);
        zone.command(ESCORT, |ai, ctx| ai.enter_evade_mode(ctx)).unwrap();
        assert!(zone.creature(ESCORT).unwrap().body.evading);

        zone.run_for(15_000, 100, &mut NoopObserver);
        let creature = zone.creature(ESCORT).unwrap();
        assert_eq!(creature.ai.escort().ooc_position(), ooc);
        assert!(!creature.body.evading);
        assert!(!creature.ai.escort().is_escorting());
        assert_eq!(zone.world.quest_status(PLAYER, QUEST), QuestStatus::Complete);

        let origin_informs = log(&zone, ESCORT)
            .args_of(SmartEvent::MovementInform)
            .iter()
            .filter(|a| a.b == 0x00FF_FFFF)
            .count();
        assert_eq!(origin_informs, 1);
        assert_eq!(log(&zone, ESCORT).count(SmartEvent::Evade), 1);
    }
}

// ── Despawn and follow ────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn stopped_escort_despawns_and_leaves_zone() {
        let mut zone = escort_zone();
        let mut rec = Recorder::default();
        zone.start_escort(ESCORT, PathId(1), false, PLAYER, None).unwrap();
        zone.run_for(1_000, 100, &mut rec);
        zone.command(ESCORT, |ai, ctx| ai.stop_path(ctx, 2_000, None, false)).unwrap();

        zone.run_for(2_000, 100, &mut rec);
        assert!(zone.creature(ESCORT).unwrap().body.visible);
        zone.run_for(2_000, 100, &mut rec);

        assert_eq!(rec.despawns, vec![ESCORT]);
        assert_eq!(zone.creature_count(), 0);
        assert!(zone.creature(ESCORT).is_none());
        assert_eq!(zone.world.actor_position(ActorId::from(ESCORT)), None);
    }

    #[test]
    fn follow_to_landmark_grants_credit() {
        let mut zone = ZoneBuilder::new(store(), ZoneConfig::default())
            .spawn(escort_spec(), EventLog::new())
            .spawn(CreatureSpec::new(LANDMARK, CreatureEntry(900), p(20.0, 0.0, 0.0)).passive(), EventLog::new())
            .player(PLAYER, Position::ORIGIN)
            .build()
            .unwrap();
        let mut rec = Recorder::default();

        zone.command(ESCORT, |ai, ctx| {
            ai.set_follow(ctx, Some(PLAYER), -1.0, -1.0, 77, CreatureEntry(900), CreditKind::Kill)
        })
        .unwrap();
        zone.world.move_player(PLAYER, p(19.0, 0.0, 0.0)).unwrap();
        zone.run_for(20_000, 100, &mut rec);

        assert_eq!(zone.world.kill_credits(), &[(PLAYER, CreatureEntry(77))]);
        assert_eq!(rec.despawns, vec![ESCORT]);
        assert!(zone.creature(LANDMARK).is_some());
        assert_eq!(zone.world.actor_position(ActorId::from(ESCORT)), None);
    }

    #[test]
    fn follower_is_not_its_own_landmark() {
        let mut zone = escort_zone();
        let mut rec = Recorder::default();
        zone.world.move_player(PLAYER, p(50.0, 0.0, 0.0)).unwrap();

        // Arrival entry equals the follower's own entry.
        zone.command(ESCORT, |ai, ctx| {
            ai.set_follow(ctx, Some(PLAYER), -1.0, -1.0, 77, CreatureEntry(100), CreditKind::Kill)
        })
        .unwrap();
        zone.run_for(1_200, 100, &mut rec);

        assert!(zone.creature(ESCORT).unwrap().ai.follow().is_following());
        assert!(zone.world.kill_credits().is_empty());
        assert_eq!(log(&zone, ESCORT).count(SmartEvent::FollowCompleted), 0);
    }

    #[test]
    fn nearest_creature_lookup_skips_the_caller() {
        let zone = ZoneBuilder::new(store(), ZoneConfig::default())
            .spawn(escort_spec(), EventLog::new())
            .spawn(CreatureSpec::new(LANDMARK, CreatureEntry(100), p(3.0, 0.0, 0.0)), EventLog::new())
            .build()
            .unwrap();

        let found = zone.world.find_nearest_creature(CreatureEntry(100), Position::ORIGIN, 5.0, ESCORT);
        assert_eq!(found, Some(LANDMARK));
        let found = zone.world.find_nearest_creature(CreatureEntry(100), Position::ORIGIN, 5.0, LANDMARK);
        assert_eq!(found, Some(ESCORT));
    }
}
