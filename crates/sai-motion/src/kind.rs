//! Motion kinds and point tags.

/// Which motion generator is driving a unit.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionKind {
    /// Standing still (default state).
    #[default]
    Idle,
    /// Following a multi-point spline along an escort path.
    Path,
    /// Moving to a single tagged point.
    Point,
    /// Keeping formation behind another unit.
    Follow,
    /// Pursuing a combat target.
    Chase,
    /// Walking back to the home position.
    Home,
}

impl MotionKind {
    /// Numeric code used in event payloads.
    pub fn code(self) -> u32 {
        match self {
            MotionKind::Idle   => 0,
            MotionKind::Path   => 1,
            MotionKind::Point  => 2,
            MotionKind::Follow => 3,
            MotionKind::Chase  => 4,
            MotionKind::Home   => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MotionKind::Idle   => "idle",
            MotionKind::Path   => "path",
            MotionKind::Point  => "point",
            MotionKind::Follow => "follow",
            MotionKind::Chase  => "chase",
            MotionKind::Home   => "home",
        }
    }
}

impl std::fmt::Display for MotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag of a point-motion target.
///
/// Waypoint ids and the synthetic "back to where combat started" point live in
/// separate variants, so no waypoint id can ever be mistaken for it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointId {
    Waypoint(u32),
    ReturnToOrigin,
}

impl PointId {
    /// Numeric form for event payloads.  `ReturnToOrigin` maps above any
    /// id a waypoint catalog hands out.
    pub const RETURN_TO_ORIGIN_RAW: u32 = 0x00FF_FFFF;

    pub fn raw(self) -> u32 {
        match self {
            PointId::Waypoint(id)   => id,
            PointId::ReturnToOrigin => Self::RETURN_TO_ORIGIN_RAW,
        }
    }

    #[inline]
    pub fn is_origin(self) -> bool {
        matches!(self, PointId::ReturnToOrigin)
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointId::Waypoint(id)   => write!(f, "wp{id}"),
            PointId::ReturnToOrigin => f.write_str("origin"),
        }
    }
}

/// Notification that a motion generator reached a point.
///
/// `point` is `None` for generators without tagged points (follow, home).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MotionInform {
    pub kind:  MotionKind,
    pub point: Option<PointId>,
}

impl MotionInform {
    #[inline]
    pub fn new(kind: MotionKind, point: Option<PointId>) -> Self {
        Self { kind, point }
    }
}
