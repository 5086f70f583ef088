//! Reference motion engine: straight-line movement between points.

use tracing::{debug, trace};

use sai_core::{ActorId, MoveMode, Position};

use crate::{MotionError, MotionInform, MotionKind, MotionMaster, MotionResult, PointId};

/// Distance under which a moving unit counts as arrived.
const ARRIVAL_EPSILON: f32 = 0.05;

/// Chase stops this close to its target.
const MELEE_REACH: f32 = 1.0;

/// Movement speeds in world units per second.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    pub walk_speed: f32,
    pub run_speed:  f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { walk_speed: 2.5, run_speed: 7.0 }
    }
}

impl MotionConfig {
    #[inline]
    pub fn speed(&self, mode: MoveMode) -> f32 {
        match mode {
            MoveMode::Walk => self.walk_speed,
            MoveMode::Run  => self.run_speed,
        }
    }

    /// Reject speeds that would freeze or teleport units.
    pub fn validate(&self) -> MotionResult<()> {
        for mode in [MoveMode::Walk, MoveMode::Run] {
            let speed = self.speed(mode);
            if !(speed.is_finite() && speed > 0.0) {
                return Err(MotionError::InvalidSpeed { mode, speed });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum Active {
    Path { points: Vec<Position>, next: usize, first_point: u32 },
    Point { point: PointId, target: Position },
    Follow { target: ActorId, distance: f32, angle: f32, arrived: bool },
    Chase { target: ActorId },
    Home,
}

impl Active {
    fn kind(&self) -> MotionKind {
        match self {
            Active::Path { .. }   => MotionKind::Path,
            Active::Point { .. }  => MotionKind::Point,
            Active::Follow { .. } => MotionKind::Follow,
            Active::Chase { .. }  => MotionKind::Chase,
            Active::Home          => MotionKind::Home,
        }
    }
}

/// Single-unit [`MotionMaster`] that moves in straight lines.
///
/// The host owns the unit's position and calls [`advance`][Self::advance]
/// once per tick; the engine never reads global state on its own.
#[derive(Clone, Debug, Default)]
pub struct MotionEngine {
    config: MotionConfig,
    mode:   MoveMode,
    active: Option<Active>,
    /// A path or point spline is still playing.
    moving: bool,
}

impl MotionEngine {
    pub fn new(config: MotionConfig) -> Self {
        Self { config, ..Self::default() }
    }

    /// Like [`new`][Self::new] but validates `config` first.
    pub fn try_new(config: MotionConfig) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    #[inline]
    pub fn mode(&self) -> MoveMode {
        self.mode
    }

    /// Advance by `diff` milliseconds.
    ///
    /// `position` is moved in place.  `locate` resolves actors for follow
    /// and chase; an unresolvable target expires the generator.  Returns the
    /// point reached this advance, if any.  Movement stops at a reached point
    /// for the rest of the advance.
    pub fn advance(
        &mut self,
        diff:     u32,
        position: &mut Position,
        home:     Position,
        locate:   &dyn Fn(ActorId) -> Option<Position>,
    ) -> Option<MotionInform> {
        let step = self.config.speed(self.mode) * diff as f32 / 1000.0;
        let active = self.active.as_mut()?;

        match active {
            Active::Path { points, next, first_point } => {
                if !self.moving {
                    return None;
                }
                let target = *points.get(*next)?;
                *position = position.step_toward(target, step);
                if !position.within(target, ARRIVAL_EPSILON) {
                    return None;
                }
                let point = PointId::Waypoint(*first_point + *next as u32 - 1);
                *next += 1;
                if *next >= points.len() {
                    self.moving = false;
                }
                trace!(%point, "path_point_reached");
                Some(MotionInform::new(MotionKind::Path, Some(point)))
            }
            Active::Point { point, target } => {
                if !self.moving {
                    return None;
                }
                *position = position.step_toward(*target, step);
                if !position.within(*target, ARRIVAL_EPSILON) {
                    return None;
                }
                let point = *point;
                self.active = None;
                self.moving = false;
                trace!(%point, "point_reached");
                Some(MotionInform::new(MotionKind::Point, Some(point)))
            }
            Active::Follow { target, distance, angle, arrived } => {
                let Some(leader) = locate(*target) else {
                    debug!(target = %target, "follow_target_lost");
                    self.active = None;
                    return None;
                };
                let slot = leader.polar_offset(*distance, *angle);
                *position = position.step_toward(slot, step);
                let at_slot = position.within(slot, ARRIVAL_EPSILON);
                let newly = at_slot && !*arrived;
                *arrived = at_slot;
                newly.then(|| MotionInform::new(MotionKind::Follow, None))
            }
            Active::Chase { target } => {
                let Some(victim) = locate(*target) else {
                    self.active = None;
                    return None;
                };
                if !position.within(victim, MELEE_REACH) {
                    let reach = (position.distance(victim) - MELEE_REACH).max(0.0);
                    *position = position.step_toward(victim, step.min(reach));
                }
                None
            }
            Active::Home => {
                *position = position.step_toward(home, step);
                if !position.within(home, ARRIVAL_EPSILON) {
                    return None;
                }
                self.active = None;
                Some(MotionInform::new(MotionKind::Home, None))
            }
        }
    }

    fn replace(&mut self, active: Active, moving: bool) {
        trace!(kind = %active.kind(), "motion_replaced");
        self.active = Some(active);
        self.moving = moving;
    }
}

impl MotionMaster for MotionEngine {
    fn move_path(&mut self, points: &[Position], first_point: u32) {
        if points.len() < 2 {
            self.active = None;
            self.moving = false;
            return;
        }
        self.replace(Active::Path { points: points.to_vec(), next: 1, first_point }, true);
    }

    fn move_point(&mut self, point: PointId, target: Position) {
        self.replace(Active::Point { point, target }, true);
    }

    fn move_follow(&mut self, target: ActorId, distance: f32, angle: f32) {
        self.replace(Active::Follow { target, distance, angle, arrived: false }, false);
    }

    fn move_chase(&mut self, target: ActorId) {
        self.replace(Active::Chase { target }, false);
    }

    fn move_home(&mut self) {
        self.replace(Active::Home, false);
    }

    fn move_idle(&mut self) {
        self.active = None;
        self.moving = false;
    }

    fn stop(&mut self) {
        self.moving = false;
    }

    fn movement_expired(&mut self) {
        self.active = None;
        self.moving = false;
    }

    fn set_move_mode(&mut self, mode: MoveMode) {
        self.mode = mode;
    }

    fn current_kind(&self) -> MotionKind {
        self.active.as_ref().map_or(MotionKind::Idle, Active::kind)
    }

    fn active_slot_kind(&self) -> Option<MotionKind> {
        self.active.as_ref().map(Active::kind)
    }

    fn spline_finalized(&self) -> bool {
        !self.moving
    }
}
