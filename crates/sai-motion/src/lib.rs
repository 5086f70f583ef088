//! `sai-motion` — the motion contract consumed by the controller, spline path
//! sharding, and a reference motion engine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`kind`]    | `MotionKind`, `PointId`, `MotionInform`                           |
//! | [`master`]  | `MotionMaster` trait — what the controller may ask of motion      |
//! | [`spline`]  | `generate_path_points` — wire-format-safe path segments           |
//! | [`engine`]  | `MotionEngine`, `MotionConfig` — a straight-line implementation   |
//! | [`error`]   | `MotionError`, `MotionResult<T>`                                  |
//!
//! # Movement model
//!
//! The controller never moves a unit itself.  It requests motion through
//! [`MotionMaster`] and learns about arrivals through [`MotionInform`]
//! notifications that the host delivers back on a later tick:
//!
//! 1. `move_path` / `move_point` / `move_follow` replace the active motion.
//! 2. The host advances motion by the tick delta.
//! 3. Every point reached produces one `MotionInform` (at most one per
//!    advance, so notifications never outrun the controller's cursor).
//! 4. The host feeds each notification to the controller.

pub mod engine;
pub mod error;
pub mod kind;
pub mod master;
pub mod spline;

#[cfg(test)]
mod tests;

pub use engine::{MotionConfig, MotionEngine};
pub use error::{MotionError, MotionResult};
pub use kind::{MotionInform, MotionKind, PointId};
pub use master::MotionMaster;
pub use spline::{PathSegment, generate_path_points};
