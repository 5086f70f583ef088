//! The `MotionMaster` trait: the motion requests the controller may issue.

use sai_core::{ActorId, MoveMode, Position};

use crate::{MotionKind, PointId};

/// Motion subsystem as seen from the controller.
///
/// Requests take effect immediately and replace whatever occupied the active
/// slot; there is no queue.  Arrival is reported asynchronously as
/// [`MotionInform`][crate::MotionInform] values that the host delivers back.
///
/// The trait is object safe so hosts can hand out `&mut dyn MotionMaster`.
pub trait MotionMaster {
    /// Follow `points` as one spline.  `points[0]` is the unit's current
    /// position; `points[i]` for `i ≥ 1` is reported as
    /// `PointId::Waypoint(first_point + i - 1)` when reached.
    fn move_path(&mut self, points: &[Position], first_point: u32);

    /// Move straight to `target`, reporting `point` on arrival.
    fn move_point(&mut self, point: PointId, target: Position);

    /// Keep `distance` away from `target` at `angle` radians.
    fn move_follow(&mut self, target: ActorId, distance: f32, angle: f32);

    /// Pursue `target` into melee range.
    fn move_chase(&mut self, target: ActorId);

    /// Walk back to the home position.
    fn move_home(&mut self);

    /// Occupy the active slot with nothing; the unit stands still.
    fn move_idle(&mut self);

    /// Halt the running spline on the spot.  The active generator stays.
    fn stop(&mut self);

    /// Discard the generator in the active slot.
    fn movement_expired(&mut self);

    /// Walk or run for every following request.
    fn set_move_mode(&mut self, mode: MoveMode);

    /// Kind of the generator currently driving the unit (`Idle` if none).
    fn current_kind(&self) -> MotionKind;

    /// Kind of the generator in the active slot, `None` if the slot is empty.
    fn active_slot_kind(&self) -> Option<MotionKind>;

    /// `true` once the last spline segment has finished playing (or was
    /// stopped).
    fn spline_finalized(&self) -> bool;
}
