//! Default waypoint movement: the path a creature walks on its own when it
//! is neither escorting nor fighting.
//!
//! The patrol loops.  Each request covers one wire-safe spline segment; the
//! arrival at a segment's last point requests the next one, and the final
//! waypoint wraps back to the first.

use std::sync::Arc;

use tracing::{debug, trace};

use sai_core::{PathId, Position, SplineLimits};
use sai_motion::{MotionMaster, PointId, generate_path_points};
use sai_waypoint::{WaypointPath, WaypointStore};

use crate::Unit;

#[derive(Clone, Debug)]
struct Patrol {
    path_id:     PathId,
    path:        Arc<WaypointPath>,
    /// Slot of the last waypoint in the segment currently requested.
    segment_end: u32,
}

/// Walks a creature's default path between escorts and fights.
#[derive(Clone, Debug, Default)]
pub struct PatrolController {
    patrol: Option<Patrol>,
}

impl PatrolController {
    #[inline]
    pub fn is_patrolling(&self) -> bool {
        self.patrol.is_some()
    }

    pub fn path_id(&self) -> Option<PathId> {
        self.patrol.as_ref().map(|p| p.path_id)
    }

    /// Start walking `path_id` from its first waypoint.  `false` when the
    /// path is unknown or empty.
    pub fn start(
        &mut self,
        store:   &WaypointStore,
        path_id: PathId,
        unit:    &dyn Unit,
        motion:  &mut dyn MotionMaster,
        limits:  &SplineLimits,
    ) -> bool {
        let Some(path) = store.path(path_id).filter(|p| !p.is_empty()) else {
            debug!(creature = %unit.id(), path = %path_id, "patrol_path_missing");
            self.patrol = None;
            return false;
        };
        let mut patrol = Patrol { path_id, path, segment_end: 0 };
        request_segment(&mut patrol, 1, unit, motion, limits);
        debug!(creature = %unit.id(), path = %path_id, "patrol_started");
        self.patrol = Some(patrol);
        true
    }

    /// A path arrival while patrolling.  Requests the next segment when
    /// `point` closes the current one.
    pub fn point_reached(
        &mut self,
        point:  PointId,
        unit:   &dyn Unit,
        motion: &mut dyn MotionMaster,
        limits: &SplineLimits,
    ) {
        let Some(patrol) = self.patrol.as_mut() else {
            return;
        };
        let Some(end) = patrol.path.get(patrol.segment_end) else {
            return;
        };
        if point != PointId::Waypoint(end.id) {
            return;
        }

        let next = if patrol.path.is_last(patrol.segment_end) { 1 } else { patrol.segment_end + 1 };
        trace!(creature = %unit.id(), path = %patrol.path_id, next, "patrol_segment_done");
        request_segment(patrol, next, unit, motion, limits);
    }

    pub fn stop(&mut self) {
        self.patrol = None;
    }
}

fn request_segment(
    patrol: &mut Patrol,
    from:   u32,
    unit:   &dyn Unit,
    motion: &mut dyn MotionMaster,
    limits: &SplineLimits,
) {
    let remaining: Vec<Position> = patrol.path.remaining_from(from).iter().map(|w| w.position).collect();
    let Some(first) = patrol.path.get(from) else {
        return;
    };
    let segment = generate_path_points(unit.position(), &remaining, unit.can_fly(), limits);
    motion.move_path(&segment.points, first.id);
    patrol.segment_end = from + segment.waypoint_count() as u32 - 1;
}
