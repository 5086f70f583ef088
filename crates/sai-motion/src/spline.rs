//! Path-array generation for escort splines.
//!
//! # Wire-format constraint
//!
//! A spline segment is sent to clients as its endpoints plus every interior
//! point packed as a small offset from the midpoint of the endpoints.  The
//! packed offsets cannot reach 255 on x or y or 127 on z.  A long path that
//! violates this must be sent as a shorter prefix; the rest is requested
//! point by point as the unit arrives.
//!
//! # Halving search
//!
//! ```text
//! fraction = 1.0
//! loop:
//!   take = floor((remaining - 1) * fraction) + 1      (≥ 1 waypoint)
//!   candidate = [current position] + remaining[..take]
//!   if candidate has ≤ 2 points or every interior offset fits → accept
//!   fraction *= 0.5
//! ```
//!
//! The first accepted candidate is the longest prefix the search visits, and
//! a two-point candidate always fits, so the loop terminates.  Units that can
//! fly skip the search entirely.

use tracing::trace;

use sai_core::{Position, SplineLimits};

/// A generated segment and the fraction of the remaining path it covers.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    /// `points[0]` is the unit's real position.
    pub points:   Vec<Position>,
    /// 1.0 when no split was needed; halved once per rejected candidate.
    pub fraction: f32,
}

impl PathSegment {
    /// Waypoints in the segment (excluding the starting position).
    #[inline]
    pub fn waypoint_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Build the point array for a spline from `origin` along `remaining`.
///
/// `remaining` holds the positions of the current target waypoint and every
/// waypoint after it.
pub fn generate_path_points(
    origin:    Position,
    remaining: &[Position],
    can_fly:   bool,
    limits:    &SplineLimits,
) -> PathSegment {
    if can_fly {
        let mut points = Vec::with_capacity(remaining.len() + 1);
        points.push(origin);
        points.extend_from_slice(remaining);
        return PathSegment { points, fraction: 1.0 };
    }

    let span = remaining.len().saturating_sub(1);
    let mut fraction = 1.0f32;

    loop {
        let take = ((span as f32 * fraction) as usize + 1).min(remaining.len());

        let mut candidate = Vec::with_capacity(take + 1);
        candidate.push(origin);
        candidate.extend_from_slice(&remaining[..take]);

        if candidate.len() <= 2 || fits_limits(&candidate, limits) {
            return PathSegment { points: candidate, fraction };
        }

        trace!(take, fraction, "spline_segment_split");
        fraction *= 0.5;
    }
}

/// `true` if every interior point of `points` can be packed relative to the
/// midpoint of the first and last points.
pub fn fits_limits(points: &[Position], limits: &SplineLimits) -> bool {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return true;
    };
    if points.len() <= 2 {
        return true;
    }

    let middle = first.midpoint(last);
    points[1..points.len() - 1].iter().all(|&p| {
        let off = middle.offset_from(p);
        off.x.abs() < limits.max_dx && off.y.abs() < limits.max_dy && off.z.abs() < limits.max_dz
    })
}
