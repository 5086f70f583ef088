//! A single waypoint path.

use sai_core::Position;

/// One point of a path.
///
/// `id` is the id stored with the point in the catalog.  For a well-formed
/// path it equals the point's 1-based slot in the sequence; the controller
/// logs when the two disagree.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Waypoint {
    pub id:       u32,
    pub position: Position,
}

impl Waypoint {
    #[inline]
    pub fn new(id: u32, position: Position) -> Self {
        Self { id, position }
    }
}

/// An ordered, immutable waypoint sequence addressed by 1-based slot.
///
/// Slot 0 is reserved and never resolves.  Do not construct directly; use
/// [`WaypointStoreBuilder`][crate::WaypointStoreBuilder].
#[derive(Clone, Debug, PartialEq)]
pub struct WaypointPath {
    points: Vec<Waypoint>,
}

impl WaypointPath {
    pub(crate) fn new(points: Vec<Waypoint>) -> Self {
        Self { points }
    }

    /// Number of waypoints; also the slot of the final waypoint.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Waypoint at 1-based `slot`, or `None` past the end (and for slot 0).
    #[inline]
    pub fn get(&self, slot: u32) -> Option<&Waypoint> {
        if slot == 0 {
            return None;
        }
        self.points.get(slot as usize - 1)
    }

    /// `true` if `slot` is the final waypoint.
    #[inline]
    pub fn is_last(&self, slot: u32) -> bool {
        slot as usize == self.points.len()
    }

    /// Every waypoint from `slot` (inclusive) to the end, in order.
    pub fn remaining_from(&self, slot: u32) -> &[Waypoint] {
        let start = (slot.max(1) as usize - 1).min(self.points.len());
        &self.points[start..]
    }

    /// All waypoints in order.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.points
    }
}
