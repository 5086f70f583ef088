//! `sai-waypoint` — the read-only waypoint path catalog.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`path`]    | `Waypoint`, `WaypointPath` (dense 1-based sequence)           |
//! | [`store`]   | `WaypointStore` (`PathId → Arc<WaypointPath>`), `WaypointStoreBuilder` |
//! | [`loader`]  | `load_waypoints_csv`, `load_waypoints_reader`                 |
//! | [`error`]   | `WaypointError`, `WaypointResult<T>`                          |
//!
//! # Sharing model
//!
//! A store is built once at server start and never mutated afterwards.  Every
//! controller escorting along the same path holds an `Arc` to the same
//! `WaypointPath`, so a path stays alive for as long as any escort uses it.

pub mod error;
pub mod loader;
pub mod path;
pub mod store;


pub use error::{WaypointError, WaypointResult};
pub use loader::{load_waypoints_csv, load_waypoints_reader};
pub use path::{Waypoint, WaypointPath};
pub use store::{WaypointStore, WaypointStoreBuilder};
