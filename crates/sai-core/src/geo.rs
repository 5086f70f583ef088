//! World-space coordinate type.
//!
//! `Position` uses `f32` like the rest of the server's world model.  All
//! distances are plain Euclidean in world units.

/// A point in world space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 3-D Euclidean distance.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance, for range comparisons.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx * dx + dy * dy + dz * dz
    }

    /// `true` if `other` lies within `range` (inclusive).
    #[inline]
    pub fn within(self, other: Position, range: f32) -> bool {
        self.distance_sq(other) <= range * range
    }

    /// Component-wise midpoint of `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Position) -> Position {
        Position {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
        }
    }

    /// Component-wise `self - other`.
    #[inline]
    pub fn offset_from(self, other: Position) -> Position {
        Position {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Step from `self` toward `target` by at most `step` units.
    ///
    /// Returns the target itself once it is within reach.
    pub fn step_toward(self, target: Position, step: f32) -> Position {
        let dist = self.distance(target);
        if dist <= step || dist <= f32::EPSILON {
            return target;
        }
        let t = step / dist;
        Position {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }

    /// Point `dist` units away from `self` at `angle` radians (x/y plane).
    #[inline]
    pub fn polar_offset(self, dist: f32, angle: f32) -> Position {
        Position {
            x: self.x + dist * angle.cos(),
            y: self.y + dist * angle.sin(),
            z: self.z,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
