//! The escort state machine.
//!
//! # Tick model
//!
//! Two entry points move an escort forward:
//!
//! * [`EscortController::movepoint_reached`] runs when the motion subsystem
//!   reports an arrival.  While a path spline is driving the unit it advances
//!   the cursor immediately.
//! * [`EscortController::update_path`] runs once per tick.  It owns the
//!   invoker check, pause expiry, the end of a return-to-origin, and any
//!   advance the arrival callback left pending (paused arrivals, point
//!   motions).
//!
//! Both share one advance step: on the final waypoint the escort ends,
//! otherwise the cursor moves on and point motion is requested unless a
//! spline segment is still carrying the unit.

use std::sync::Arc;

use tracing::{debug, info, warn};

use sai_core::{ActorId, AiConfig, MoveMode, PathId, Position, QuestId};
use sai_motion::{MotionKind, MotionMaster, PointId, generate_path_points};
use sai_script::{EventArgs, SmartEvent};
use sai_waypoint::{Waypoint, WaypointPath, WaypointStore};

use crate::reward::settle_escort_quest;
use crate::state::{EscortSession, EscortState, Pause, Phase};
use crate::{AiContext, DespawnCountdown, EscortError, EscortResult, InvokerRangeMonitor};

/// Owns the escort session and everything that outlives it: the loaded path,
/// the out-of-combat position, the escort quest and targets, and the despawn
/// countdown.
#[derive(Debug)]
pub struct EscortController {
    store:   Arc<WaypointStore>,
    config:  AiConfig,
    loaded:  Option<Arc<WaypointPath>>,
    path_id: Option<PathId>,
    session: Option<EscortSession>,
    run:     bool,
    ooc_pos: Position,
    quest:   Option<QuestId>,
    targets: Vec<ActorId>,
    invoker: InvokerRangeMonitor,
    despawn: DespawnCountdown,
}

impl EscortController {
    pub fn new(store: Arc<WaypointStore>, config: AiConfig) -> Self {
        let invoker = InvokerRangeMonitor::new(config.invoker_check_interval_ms);
        Self {
            store,
            config,
            loaded: None,
            path_id: None,
            session: None,
            run: false,
            ooc_pos: Position::ORIGIN,
            quest: None,
            targets: Vec::new(),
            invoker,
            despawn: DespawnCountdown::default(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> EscortState {
        self.session.as_ref().map_or(EscortState::empty(), |s| s.phase.flags())
    }

    #[inline]
    pub fn is_escorting(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    pub fn session(&self) -> Option<&EscortSession> {
        self.session.as_ref()
    }

    /// Path id kept for the next `start_path` without an explicit id.
    #[inline]
    pub fn path_id(&self) -> Option<PathId> {
        self.path_id
    }

    #[inline]
    pub fn run(&self) -> bool {
        self.run
    }

    #[inline]
    pub fn ooc_position(&self) -> Position {
        self.ooc_pos
    }

    pub fn snapshot_ooc_position(&mut self, pos: Position) {
        self.ooc_pos = pos;
    }

    #[inline]
    pub fn escort_quest(&self) -> Option<QuestId> {
        self.quest
    }

    pub fn set_escort_quest(&mut self, quest: Option<QuestId>) {
        self.quest = quest;
    }

    #[inline]
    pub fn escort_targets(&self) -> &[ActorId] {
        &self.targets
    }

    pub fn set_escort_targets(&mut self, targets: Vec<ActorId>) {
        self.targets = targets;
    }

    #[inline]
    pub fn despawn(&self) -> &DespawnCountdown {
        &self.despawn
    }

    #[inline]
    pub fn despawn_mut(&mut self) -> &mut DespawnCountdown {
        &mut self.despawn
    }

    #[inline]
    pub fn invoker_check_remaining(&self) -> u32 {
        self.invoker.remaining()
    }

    pub fn set_run(&mut self, motion: &mut dyn MotionMaster, run: bool) {
        self.run = run;
        motion.set_move_mode(MoveMode::from_run(run));
    }

    // ── Operations ────────────────────────────────────────────────────────

    /// Start walking `path` (or the loaded path).
    ///
    /// A running escort is stopped first; its repeat flag does not fire.
    /// `invoker` becomes the escorted actor when none is tracked yet.
    pub fn start_path(
        &mut self,
        ctx:     &mut AiContext<'_>,
        run:     bool,
        path:    Option<PathId>,
        repeat:  bool,
        invoker: Option<ActorId>,
    ) -> EscortResult<()> {
        if ctx.unit.is_in_combat() {
            warn!(creature = %ctx.creature(), "escort_start_in_combat");
            return Err(EscortError::InCombat);
        }

        if let Some(session) = self.session.as_mut() {
            session.repeat = false;
            self.stop_path(ctx, 0, None, false);
        }

        self.begin(ctx, run, path, repeat, invoker)
    }

    fn begin(
        &mut self,
        ctx:     &mut AiContext<'_>,
        run:     bool,
        path:    Option<PathId>,
        repeat:  bool,
        invoker: Option<ActorId>,
    ) -> EscortResult<()> {
        if let Some(path) = path {
            self.load_path(ctx, path)?;
        }

        let creature = ctx.creature();
        let (Some(waypoints), Some(path_id)) = (self.loaded.clone(), self.path_id) else {
            warn!(creature = %creature, "escort_start_without_path");
            return Err(EscortError::EmptyPath);
        };

        let mut session = EscortSession::new(path_id, waypoints, repeat);
        let Some(first) = session.next_waypoint(creature) else {
            warn!(creature = %creature, path = %path_id, "escort_start_without_path");
            return Err(EscortError::EmptyPath);
        };

        self.set_run(ctx.motion, run);
        self.ooc_pos = ctx.unit.position();
        if let Some(invoker) = invoker {
            if self.targets.is_empty() {
                self.targets.push(invoker);
            }
        }

        let remaining: Vec<Position> = session
            .path
            .remaining_from(session.cursor)
            .iter()
            .map(|w| w.position)
            .collect();
        let segment = generate_path_points(
            ctx.unit.position(),
            &remaining,
            ctx.unit.can_fly(),
            &self.config.spline_limits,
        );
        ctx.motion.move_path(&segment.points, first.id);

        info!(
            creature = %creature,
            path = %path_id,
            waypoints = session.path.len(),
            segment = segment.waypoint_count(),
            repeat,
            run,
            "escort_started"
        );
        self.session = Some(session);
        ctx.script.process_event(SmartEvent::WaypointStart, EventArgs::values(first.id, path_id.raw()));
        Ok(())
    }

    /// Make `path` the path the next `start_path` walks.
    pub fn load_path(&mut self, ctx: &mut AiContext<'_>, path: PathId) -> EscortResult<()> {
        if self.is_escorting() {
            warn!(creature = %ctx.creature(), path = %path, "escort_load_while_escorting");
            return Err(EscortError::AlreadyEscorting);
        }
        match self.store.path(path) {
            Some(waypoints) => {
                debug!(creature = %ctx.creature(), path = %path, waypoints = waypoints.len(), "waypoint_path_loaded");
                self.loaded = Some(waypoints);
                self.path_id = Some(path);
                Ok(())
            }
            None => {
                warn!(creature = %ctx.creature(), path = %path, "waypoint_path_not_found");
                self.loaded = None;
                self.path_id = None;
                Err(EscortError::PathNotFound(path))
            }
        }
    }

    /// Hold position for `delay_ms`.
    ///
    /// A forced pause issued before the targeted waypoint was reached cuts
    /// motion immediately, except on the way back after an evade.  Not
    /// escorting is a silent no-op.
    pub fn pause_path(&mut self, ctx: &mut AiContext<'_>, delay_ms: u32, forced: bool) -> EscortResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.phase.is_paused() {
            warn!(creature = %ctx.creature(), path = %session.path_id, "escort_already_paused");
            return Err(EscortError::AlreadyPaused);
        }

        self.ooc_pos = ctx.unit.position();
        let mut pause = Pause::new(delay_ms);
        // A pause during the return never cuts the walk back to the origin.
        if forced && !session.waypoint_reached && !session.phase.is_returning() {
            pause.forced = true;
            ctx.motion.set_move_mode(MoveMode::from_run(self.run));
            halt(ctx.motion);
        }

        session.phase = match session.phase {
            Phase::Returning { origin_reached, .. } => Phase::Returning { pause: Some(pause), origin_reached },
            _ => Phase::Paused(pause),
        };

        debug!(
            creature = %ctx.creature(),
            path = %session.path_id,
            waypoint = session.last_wp_id(),
            delay_ms,
            forced = pause.forced,
            "escort_paused"
        );
        ctx.script.process_event(
            SmartEvent::WaypointPaused,
            EventArgs::values(session.last_wp_id(), session.path_id.raw()),
        );
        Ok(())
    }

    /// Abort the escort, optionally recording the quest to settle and a
    /// despawn delay.
    pub fn stop_path(&mut self, ctx: &mut AiContext<'_>, despawn_ms: u32, quest: Option<QuestId>, fail: bool) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let args = EventArgs::values(session.last_wp_id(), session.path_id.raw());

        if quest.is_some() {
            self.quest = quest;
        }
        self.despawn.set(despawn_ms);

        self.ooc_pos = ctx.unit.position();
        halt(ctx.motion);

        debug!(creature = %ctx.creature(), path = %session.path_id, fail, "escort_stopped");
        ctx.script.process_event(SmartEvent::WaypointStopped, args);
        self.end_path(ctx, fail);
    }

    /// Finish the escort: notify, restart if repeating, settle the quest and
    /// start an armed despawn.  Does nothing without a session.
    pub fn end_path(&mut self, ctx: &mut AiContext<'_>, fail: bool) {
        let Some(session) = self.session.take() else {
            return;
        };
        let creature = ctx.creature();

        ctx.script.process_event(
            SmartEvent::WaypointEnded,
            EventArgs::values(session.last_wp_id(), session.path_id.raw()),
        );
        info!(creature = %creature, path = %session.path_id, waypoint = session.cursor, fail, "escort_ended");

        self.loaded = None;
        if session.repeat {
            self.path_id = Some(session.path_id);
            if let Err(err) = self.begin(ctx, self.run, Some(session.path_id), true, None) {
                warn!(creature = %creature, path = %session.path_id, error = %err, "escort_repeat_failed");
            }
        } else {
            self.path_id = None;
        }

        if let Some(quest) = self.quest {
            if !self.targets.is_empty() {
                settle_escort_quest(ctx.world, &self.targets, quest, creature, ctx.unit.position(), fail);
            }
        }

        if self.despawn.state() == crate::DespawnState::Armed {
            self.despawn.start();
        }
    }

    /// Head for the targeted waypoint again.
    pub fn resume_path(&mut self, ctx: &mut AiContext<'_>) {
        let wp = self.session.as_ref().and_then(|s| s.last_wp);
        if let Some(wp) = wp {
            move_to_waypoint(ctx.motion, self.run, wp);
        }
    }

    /// Head for the position saved when combat began.
    pub fn return_to_last_ooc_pos(&mut self, ctx: &mut AiContext<'_>) {
        ctx.motion.set_move_mode(MoveMode::from_run(self.run));
        ctx.motion.move_point(PointId::ReturnToOrigin, self.ooc_pos);
    }

    /// Enter the returning phase after an evade and walk back.  Returns
    /// `false` when not escorting.
    pub fn begin_return(&mut self, ctx: &mut AiContext<'_>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let pause = match session.phase {
            Phase::Travelling => None,
            Phase::Paused(p) => Some(p),
            Phase::Returning { pause, .. } => pause,
        };
        session.phase = Phase::Returning { pause, origin_reached: false };
        debug!(creature = %ctx.creature(), path = %session.path_id, "escort_returning");
        self.return_to_last_ooc_pos(ctx);
        true
    }

    /// Per-tick escort processing.
    pub fn update_path(&mut self, ctx: &mut AiContext<'_>, diff: u32) {
        if !self.is_escorting() {
            return;
        }
        let creature = ctx.creature();

        if self.invoker.due(diff, self.config.invoker_check_interval_ms)
            && !InvokerRangeMonitor::in_range(
                &self.targets,
                ctx.unit.position(),
                self.config.max_invoker_distance,
                &*ctx.world,
            )
        {
            info!(creature = %creature, targets = self.targets.len(), "escort_invoker_lost");
            let despawn_ms = self.despawn.remaining();
            let quest = self.quest;
            self.stop_path(ctx, despawn_ms, quest, true);
            return;
        }

        let in_combat = ctx.unit.is_in_combat();
        let run = self.run;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        // Pause expiry.
        let returning = session.phase.is_returning();
        let back_at_origin = session.last_reached == Some(PointId::ReturnToOrigin);
        let reached = session.waypoint_reached;
        let mut resume: Option<bool> = None;
        if let Some(pause) = session.phase.pause_mut() {
            if pause.remaining.tick(diff) {
                if !in_combat && !returning && (reached || back_at_origin || pause.forced) {
                    resume = Some(pause.forced);
                }
                pause.remaining.reset(0);
            }
        }
        if let Some(forced) = resume {
            session.phase = Phase::Travelling;
            debug!(creature = %creature, path = %session.path_id, forced, "escort_resumed");
            ctx.script.process_event(
                SmartEvent::WaypointResumed,
                EventArgs::values(session.last_wp_id(), session.path_id.raw()),
            );
            if forced {
                if let Some(wp) = session.last_wp {
                    move_to_waypoint(ctx.motion, run, wp);
                }
                session.waypoint_reached = false;
            } else if back_at_origin {
                // Forced resumes walk to the current waypoint before advancing.
                session.waypoint_reached = true;
            }
        }

        // Return-to-origin completion.
        if let Phase::Returning { pause, origin_reached: true } = session.phase {
            match pause {
                Some(p) => session.phase = Phase::Paused(p),
                None => {
                    session.phase = Phase::Travelling;
                    if let Some(wp) = session.last_wp {
                        move_to_waypoint(ctx.motion, run, wp);
                    }
                }
            }
        }

        let fighting = in_combat && !ctx.unit.is_passive();
        if fighting || session.phase != Phase::Travelling {
            return;
        }

        if session.waypoint_reached {
            session.waypoint_reached = false;
            self.advance(ctx);
        }
    }

    /// Motion reached `point`.  Ignored when no escort is running.
    pub fn movepoint_reached(&mut self, ctx: &mut AiContext<'_>, point: PointId) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let PointId::Waypoint(id) = point else {
            session.last_reached = Some(point);
            if let Phase::Returning { origin_reached, .. } = &mut session.phase {
                *origin_reached = true;
            }
            return;
        };

        session.last_reached = Some(point);
        session.waypoint_reached = true;
        ctx.script.process_event(SmartEvent::WaypointReached, EventArgs::values(id, session.path_id.raw()));
        debug!(creature = %ctx.creature(), path = %session.path_id, waypoint = id, "waypoint_reached");

        if let Some(wp) = session.last_wp {
            ctx.unit.set_position(wp.position);
            ctx.unit.set_home_position(wp.position);
        }

        if session.phase.is_paused() {
            halt(ctx.motion);
        } else if ctx.motion.current_kind() == MotionKind::Path {
            session.waypoint_reached = false;
            self.advance(ctx);
        }
    }

    /// End on the final waypoint, otherwise move the cursor on.
    fn advance(&mut self, ctx: &mut AiContext<'_>) {
        let creature = ctx.creature();
        let next = match self.session.as_mut() {
            None => return,
            Some(s) if s.at_final_waypoint() => None,
            Some(s) => match s.next_waypoint(creature) {
                Some(wp) => Some(wp),
                None => return,
            },
        };

        let Some(wp) = next else {
            self.end_path(ctx, false);
            return;
        };

        ctx.motion.set_move_mode(MoveMode::from_run(self.run));
        let carried = ctx.motion.current_kind() == MotionKind::Path && !ctx.motion.spline_finalized();
        if !carried {
            ctx.motion.move_point(PointId::Waypoint(wp.id), wp.position);
        }
    }

    /// Forget the session and any pending despawn (respawn).
    pub fn reset(&mut self) {
        self.session = None;
        self.loaded = None;
        self.path_id = None;
        self.despawn.reset();
        self.invoker = InvokerRangeMonitor::new(self.config.invoker_check_interval_ms);
    }
}

/// Cut path motion and stand still.
fn halt(motion: &mut dyn MotionMaster) {
    if motion.active_slot_kind() == Some(MotionKind::Path) {
        motion.movement_expired();
    }
    motion.stop();
    motion.move_idle();
}

fn move_to_waypoint(motion: &mut dyn MotionMaster, run: bool, wp: Waypoint) {
    motion.set_move_mode(MoveMode::from_run(run));
    motion.move_point(PointId::Waypoint(wp.id), wp.position);
}
