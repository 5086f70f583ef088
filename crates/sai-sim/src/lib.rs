//! `sai-sim` — an in-memory zone that hosts `SmartAi` creatures.
//!
//! The zone supplies concrete implementations of every host capability the
//! controller needs: [`CreatureBody`] is the [`Unit`][sai_ai::Unit],
//! [`ZoneWorld`] is the [`World`][sai_ai::World] (players, groups, quest
//! logs, creature sightings), and each creature carries its own
//! [`MotionEngine`][sai_motion::MotionEngine].
//!
//! # Tick loop
//!
//! ```text
//! for creature in ascending id order:
//!   ① motion.advance(diff)       — move the body; at most one arrival
//!   ② ai.movement_inform(..)     — only when ① reported an arrival
//!   ③ ai.update(diff)            — escort, despawn, follow, combat
//!   ④ world sighting refreshed   — position and liveness for lookups
//! remove creatures that despawned this tick
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sai_sim::{CreatureSpec, NoopObserver, ZoneBuilder, ZoneConfig};
//!
//! let mut zone = ZoneBuilder::new(store, ZoneConfig::default())
//!     .spawn(CreatureSpec::new(CreatureId(1), CreatureEntry(100), start), NoopScript)
//!     .player(PLAYER, start)
//!     .build()?;
//! zone.start_escort(CreatureId(1), PathId(1), false, PLAYER, None)?;
//! zone.run_for(30_000, 100, &mut NoopObserver);
//! ```

pub mod body;
pub mod builder;
pub mod error;
pub mod observer;
pub mod world;
pub mod zone;

#[cfg(test)]
mod tests;

pub use body::{CreatureBody, CreatureSpec};
pub use builder::{ZoneBuilder, ZoneConfig};
pub use error::{ZoneError, ZoneResult};
pub use observer::{NoopObserver, ZoneObserver};
pub use world::{PlayerState, ZoneWorld};
pub use zone::{Creature, Zone};
