//! `SmartAi`, the per-creature controller the host talks to.

use std::sync::Arc;

use tracing::{debug, trace};

use sai_core::{ActorId, AiConfig, CreatureEntry, MoveMode, PathId, QuestId};
use sai_motion::{MotionKind, PointId};
use sai_script::{EventArgs, SmartEvent};
use sai_waypoint::WaypointStore;

use crate::follow::grant_follow_credit;
use crate::{
    AiContext, CreditKind, DespawnCountdown, EscortController, EscortResult, EscortState,
    FollowController, PatrolController,
};

/// Scripted controller for one creature.
///
/// The host calls [`update`][Self::update] once per tick, forwards motion
/// arrivals to [`movement_inform`][Self::movement_inform], and invokes the
/// combat and lifecycle hooks as they happen.  Every call receives a fresh
/// [`AiContext`]; the controller itself holds no references into the world.
#[derive(Debug)]
pub struct SmartAi {
    config:            AiConfig,
    store:             Arc<WaypointStore>,
    escort:            EscortController,
    follow:            FollowController,
    patrol:            PatrolController,
    can_auto_attack:   bool,
    can_combat_move:   bool,
    invincibility_hp:  u32,
    prevent_move_home: bool,
    just_reset:        bool,
}

impl SmartAi {
    pub fn new(store: Arc<WaypointStore>, config: AiConfig) -> Self {
        Self {
            escort: EscortController::new(Arc::clone(&store), config.clone()),
            store,
            config,
            follow: FollowController::default(),
            patrol: PatrolController::default(),
            can_auto_attack: true,
            can_combat_move: true,
            invincibility_hp: 0,
            prevent_move_home: false,
            just_reset: false,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    #[inline]
    pub fn escort(&self) -> &EscortController {
        &self.escort
    }

    #[inline]
    pub fn escort_mut(&mut self) -> &mut EscortController {
        &mut self.escort
    }

    #[inline]
    pub fn escort_state(&self) -> EscortState {
        self.escort.state()
    }

    #[inline]
    pub fn follow(&self) -> &FollowController {
        &self.follow
    }

    #[inline]
    pub fn patrol(&self) -> &PatrolController {
        &self.patrol
    }

    #[inline]
    pub fn despawn(&self) -> &DespawnCountdown {
        self.escort.despawn()
    }

    #[inline]
    pub fn can_combat_move(&self) -> bool {
        self.can_combat_move
    }

    // ── Escort ────────────────────────────────────────────────────────────

    pub fn start_path(
        &mut self,
        ctx:     &mut AiContext<'_>,
        run:     bool,
        path:    Option<PathId>,
        repeat:  bool,
        invoker: Option<ActorId>,
    ) -> EscortResult<()> {
        self.escort.start_path(ctx, run, path, repeat, invoker)?;
        self.patrol.stop();
        Ok(())
    }

    pub fn load_path(&mut self, ctx: &mut AiContext<'_>, path: PathId) -> EscortResult<()> {
        self.escort.load_path(ctx, path)
    }

    pub fn pause_path(&mut self, ctx: &mut AiContext<'_>, delay_ms: u32, forced: bool) -> EscortResult<()> {
        self.escort.pause_path(ctx, delay_ms, forced)
    }

    pub fn stop_path(&mut self, ctx: &mut AiContext<'_>, despawn_ms: u32, quest: Option<QuestId>, fail: bool) {
        self.escort.stop_path(ctx, despawn_ms, quest, fail);
    }

    pub fn end_path(&mut self, ctx: &mut AiContext<'_>, fail: bool) {
        self.escort.end_path(ctx, fail);
    }

    pub fn resume_path(&mut self, ctx: &mut AiContext<'_>) {
        self.escort.resume_path(ctx);
    }

    pub fn return_to_last_ooc_pos(&mut self, ctx: &mut AiContext<'_>) {
        self.escort.return_to_last_ooc_pos(ctx);
    }

    pub fn set_escort_targets(&mut self, targets: Vec<ActorId>) {
        self.escort.set_escort_targets(targets);
    }

    pub fn set_escort_quest(&mut self, quest: Option<QuestId>) {
        self.escort.set_escort_quest(quest);
    }

    /// Arm a despawn `ms` after it is started (by the end of an escort).
    pub fn set_despawn_time(&mut self, ms: u32) {
        self.escort.despawn_mut().set(ms);
    }

    pub fn start_despawn(&mut self) {
        self.escort.despawn_mut().start();
    }

    // ── Follow ────────────────────────────────────────────────────────────

    /// Follow `target`; `None` completes any current follow instead.
    #[allow(clippy::too_many_arguments)]
    pub fn set_follow(
        &mut self,
        ctx:           &mut AiContext<'_>,
        target:        Option<ActorId>,
        distance:      f32,
        angle:         f32,
        credit:        u32,
        arrival_entry: CreatureEntry,
        credit_kind:   CreditKind,
    ) {
        let Some(target) = target else {
            self.stop_follow(ctx);
            return;
        };
        ctx.motion.set_move_mode(MoveMode::from_run(self.escort.run()));
        self.follow.start(ctx.motion, &self.config, target, distance, angle, credit, arrival_entry, credit_kind);
    }

    /// Complete the follow: credit the followed player, then despawn after
    /// `follow_despawn_ms`.
    pub fn stop_follow(&mut self, ctx: &mut AiContext<'_>) {
        let creature = ctx.creature();
        if let Some(session) = self.follow.take() {
            grant_follow_credit(ctx.world, &session, creature);
        }

        let despawn = self.escort.despawn_mut();
        despawn.set(self.config.follow_despawn_ms);
        ctx.motion.stop();
        ctx.motion.move_idle();
        despawn.start();

        debug!(creature = %creature, "follow_completed");
        ctx.script.process_event(SmartEvent::FollowCompleted, EventArgs::default());
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Per-tick update: script timers, escort, despawn, follow, then combat.
    pub fn update(&mut self, ctx: &mut AiContext<'_>, diff: u32) {
        ctx.script.on_update(diff);
        self.escort.update_path(ctx, diff);

        let fade_ms = self.config.despawn_fade_ms;
        if self.escort.despawn_mut().update(diff, fade_ms, ctx.unit) {
            return;
        }

        if self.follow.poll(diff, &*ctx.unit, &*ctx.world, &self.config) {
            self.stop_follow(ctx);
            return;
        }

        if !ctx.unit.update_victim() {
            return;
        }
        if self.can_auto_attack {
            ctx.unit.melee_attack_if_ready();
        }
    }

    /// A motion generator reported an arrival.
    pub fn movement_inform(&mut self, ctx: &mut AiContext<'_>, kind: MotionKind, point: Option<PointId>) {
        let at_origin = kind == MotionKind::Point && point == Some(PointId::ReturnToOrigin);
        if at_origin || kind == MotionKind::Follow {
            ctx.unit.set_evading(false);
        }

        trace!(creature = %ctx.creature(), %kind, point = point.map_or(0, PointId::raw), "movement_inform");
        ctx.script.process_event(
            SmartEvent::MovementInform,
            EventArgs::values(kind.code(), point.map_or(0, PointId::raw)),
        );

        match kind {
            MotionKind::Home => {
                ctx.unit.set_evading(false);
                self.just_reached_home(ctx);
            }
            MotionKind::Path | MotionKind::Point if self.escort.is_escorting() => {
                if let Some(point) = point {
                    self.escort.movepoint_reached(ctx, point);
                }
            }
            MotionKind::Path if self.patrol.is_patrolling() => {
                if let Some(point) = point {
                    self.patrol.point_reached(point, &*ctx.unit, ctx.motion, &self.config.spline_limits);
                }
            }
            _ => {}
        }
    }

    // ── Combat and lifecycle hooks ────────────────────────────────────────

    /// First spawn: reset the script, announce the spawn, and set off on
    /// the default path if the creature has one.
    pub fn initialize(&mut self, ctx: &mut AiContext<'_>) {
        if ctx.unit.is_alive() {
            self.just_reset = true;
        }
        self.just_reached_home(ctx);
        ctx.script.process_event(SmartEvent::Respawn, EventArgs::default());
        if ctx.unit.is_alive() && ctx.motion.current_kind() == MotionKind::Idle {
            self.start_patrol(ctx);
        }
    }

    pub fn enter_combat(&mut self, ctx: &mut AiContext<'_>, enemy: Option<ActorId>) {
        self.patrol.stop();
        ctx.script.process_event(SmartEvent::Aggro, EventArgs::default().with_actor(enemy));
        self.escort.snapshot_ooc_position(ctx.unit.position());
        ctx.motion.set_move_mode(MoveMode::from_run(self.escort.run()));
        if ctx.motion.active_slot_kind() == Some(MotionKind::Point) {
            ctx.motion.movement_expired();
        }
    }

    pub fn attack_start(&mut self, ctx: &mut AiContext<'_>, who: Option<ActorId>) {
        if ctx.unit.is_player_controlled() {
            if let Some(who) = who {
                if self.can_auto_attack {
                    ctx.unit.attack(who);
                }
            }
            return;
        }

        if !ctx.unit.is_in_combat() {
            self.enter_combat(ctx, who);
        }

        let Some(who) = who else {
            return;
        };
        if !ctx.unit.attack(who) || !self.can_combat_move {
            return;
        }

        ctx.motion.set_move_mode(MoveMode::from_run(self.escort.run()));
        if matches!(ctx.motion.active_slot_kind(), Some(MotionKind::Path | MotionKind::Point)) {
            ctx.motion.movement_expired();
            ctx.motion.stop();
        }
        ctx.motion.move_chase(who);
    }

    /// Leave combat and head back: to the out-of-combat position while
    /// escorting, behind the followed unit while following, home otherwise.
    pub fn enter_evade_mode(&mut self, ctx: &mut AiContext<'_>) {
        if !ctx.unit.is_alive() || ctx.unit.is_evading() {
            return;
        }

        ctx.unit.combat_stop();
        ctx.script.process_event(SmartEvent::Evade, EventArgs::default());
        ctx.motion.set_move_mode(MoveMode::from_run(self.escort.run()));

        if self.prevent_move_home {
            return;
        }

        let moving = if self.escort.begin_return(ctx) {
            true
        } else if self.follow.is_following() {
            self.follow.resume_motion(ctx.motion, &*ctx.world)
        } else {
            ctx.motion.move_home();
            true
        };
        if moving {
            ctx.unit.set_evading(true);
        }
        debug!(creature = %ctx.creature(), escorting = self.escort.is_escorting(), "evade");
    }

    pub fn just_died(&mut self, ctx: &mut AiContext<'_>, killer: Option<ActorId>) {
        self.patrol.stop();
        ctx.script.process_event(SmartEvent::Death, EventArgs::default().with_actor(killer));
        if self.escort.is_escorting() {
            self.escort.end_path(ctx, true);
            ctx.motion.stop();
            ctx.motion.move_idle();
        }
    }

    pub fn just_respawned(&mut self, ctx: &mut AiContext<'_>) {
        self.escort.reset();
        self.patrol.stop();
        ctx.unit.set_visible(true);
        ctx.script.process_event(SmartEvent::Respawn, EventArgs::default());
        self.just_reset = true;
        self.just_reached_home(ctx);
        self.follow.reset();
    }

    /// Back home after an evade.  An idle creature with nothing to fight
    /// picks its default path up again.
    pub fn just_reached_home(&mut self, ctx: &mut AiContext<'_>) {
        ctx.script.on_reset();
        if !self.just_reset {
            ctx.script.process_event(SmartEvent::ReachedHome, EventArgs::default());
            if !ctx.unit.update_victim() && ctx.motion.current_kind() == MotionKind::Idle {
                self.start_patrol(ctx);
            }
        }
        self.just_reset = false;
    }

    /// Walk the unit's default path, if it has one.
    fn start_patrol(&mut self, ctx: &mut AiContext<'_>) {
        if let Some(path) = ctx.unit.waypoint_path_id() {
            self.patrol.start(&self.store, path, &*ctx.unit, ctx.motion, &self.config.spline_limits);
        }
    }

    /// Report incoming damage; returns the damage to actually apply.
    pub fn damage_taken(&mut self, ctx: &mut AiContext<'_>, attacker: Option<ActorId>, damage: u32) -> u32 {
        ctx.script.process_event(SmartEvent::Damaged, EventArgs::values(damage, 0).with_actor(attacker));
        let floor = self.invincibility_hp;
        if floor > 0 && damage >= ctx.unit.health().saturating_sub(floor) {
            ctx.unit.set_health(floor);
            return 0;
        }
        damage
    }

    pub fn killed_unit(&mut self, ctx: &mut AiContext<'_>, victim: ActorId) {
        ctx.script.process_event(SmartEvent::Kill, EventArgs::default().with_actor(Some(victim)));
    }

    pub fn set_data(&mut self, ctx: &mut AiContext<'_>, id: u32, value: u32) {
        ctx.script.process_event(SmartEvent::DataSet, EventArgs::values(id, value));
    }

    /// Forward any other event (gossip, emotes, spell hits, quest hooks)
    /// straight to the script.
    pub fn dispatch(&mut self, ctx: &mut AiContext<'_>, event: SmartEvent, actor: Option<ActorId>, a: u32, b: u32) {
        ctx.script.process_event(event, EventArgs::values(a, b).with_actor(actor));
    }

    // ── Settings ──────────────────────────────────────────────────────────

    pub fn set_run(&mut self, ctx: &mut AiContext<'_>, run: bool) {
        self.escort.set_run(ctx.motion, run);
    }

    /// Toggle chasing in combat.  Escorts keep their own motion either way.
    pub fn set_combat_move(&mut self, ctx: &mut AiContext<'_>, on: bool) {
        if self.can_combat_move == on {
            return;
        }
        self.can_combat_move = on;
        if self.escort.is_escorting() {
            return;
        }

        if on {
            if let Some(victim) = ctx.unit.victim() {
                if ctx.motion.current_kind() == MotionKind::Idle {
                    ctx.motion.set_move_mode(MoveMode::from_run(self.escort.run()));
                    ctx.motion.move_chase(victim);
                }
            }
        } else if ctx.motion.current_kind() != MotionKind::Path {
            ctx.motion.movement_expired();
            ctx.motion.stop();
            ctx.motion.move_idle();
        }
    }

    pub fn set_auto_attack(&mut self, on: bool) {
        self.can_auto_attack = on;
    }

    /// Health never drops below `hp` from a single hit; `0` disables.
    pub fn set_invincibility_hp_level(&mut self, hp: u32) {
        self.invincibility_hp = hp;
    }

    /// Evade without walking anywhere.
    pub fn set_prevent_move_home(&mut self, prevent: bool) {
        self.prevent_move_home = prevent;
    }
}
