//! `sai-core` — foundational types for the `smart_ai` creature controller.
//!
//! This crate is a dependency of every other `sai-*` crate.  It intentionally
//! has no `sai-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `CreatureId`, `ActorId`, `PathId`, `QuestId`, `CreatureEntry` |
//! | [`geo`]         | `Position` (x, y, z), distances                            |
//! | [`time`]        | `Countdown` delta timer                                    |
//! | [`movement`]    | `MoveMode` (walk / run)                                    |
//! | [`config`]      | `AiConfig` tuning constants                                |
//! | [`error`]       | `SaiError`, `SaiResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod movement;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AiConfig, SplineLimits};
pub use error::{SaiError, SaiResult};
pub use geo::Position;
pub use ids::{ActorId, CreatureEntry, CreatureId, GameObjectId, PathId, QuestId};
pub use movement::MoveMode;
pub use time::Countdown;
