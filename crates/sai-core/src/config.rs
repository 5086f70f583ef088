//! Controller tuning constants.
//!
//! Typically deserialized from the server's configuration by the host and
//! shared by every controller in a zone.  `Default` reproduces the stock
//! values the scripts were authored against.

/// Largest offset of an interior spline point from the segment midpoint the
/// movement wire format can encode.
///
/// A segment whose interior points reach any of these bounds must be split.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplineLimits {
    pub max_dx: f32,
    pub max_dy: f32,
    pub max_dz: f32,
}

impl Default for SplineLimits {
    fn default() -> Self {
        Self {
            max_dx: 255.0,
            max_dy: 255.0,
            max_dz: 127.0,
        }
    }
}

/// Top-level controller configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// How often the escort checks that its invoker is still nearby.
    pub invoker_check_interval_ms: u32,

    /// An escort fails once no tracked player (or group member) is within
    /// this distance.
    pub max_invoker_distance: f32,

    /// Radius for "has the followed unit arrived next to X" checks.
    pub interaction_distance: f32,

    /// Follow distance used when a script passes a negative one.
    pub default_follow_distance: f32,

    /// Follow angle (radians) used when a script passes a negative one.
    pub default_follow_angle: f32,

    /// Poll period of the follow arrival check.
    pub follow_poll_interval_ms: u32,

    /// Time between going invisible and being removed.
    pub despawn_fade_ms: u32,

    /// Despawn delay armed when a follow completes.
    pub follow_despawn_ms: u32,

    pub spline_limits: SplineLimits,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            invoker_check_interval_ms: 1_000,
            max_invoker_distance:      60.0,
            interaction_distance:      5.0,
            default_follow_distance:   1.0,
            default_follow_angle:      std::f32::consts::FRAC_PI_2,
            follow_poll_interval_ms:   1_000,
            despawn_fade_ms:           1_000,
            follow_despawn_ms:         5_000,
            spline_limits:             SplineLimits::default(),
        }
    }
}
