//! `sai-ai` — the scripted creature controller.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`host`]    | `Unit`, `World` capability traits, `AiContext`, `QuestStatus`    |
//! | [`state`]   | `EscortState` flags, escort `Phase`, `EscortSession`            |
//! | [`escort`]  | `EscortController` — the waypoint escort state machine          |
//! | [`invoker`] | `InvokerRangeMonitor` — are the escorted players still near?    |
//! | [`despawn`] | `DespawnCountdown` — delayed, fading despawn                     |
//! | [`follow`]  | `FollowController`, `CreditKind`                                |
//! | [`gameobject`] | `SmartGameObjectAi`: scripted static objects          |
//! | [`patrol`]  | `PatrolController`: the default path walked between escorts     |
//! | [`reward`]  | quest settlement when an escort ends                            |
//! | [`ai`]      | `SmartAi` — per-creature composite and combat/lifecycle hooks   |
//! | [`error`]   | `EscortError`, `EscortResult<T>`                                |
//!
//! # Per-tick order
//!
//! ```text
//! host: motion.advance(diff) ──▶ SmartAi::movement_inform(kind, point)
//! host: SmartAi::update(diff)
//!         1. script.on_update
//!         2. escort: invoker check, pause expiry, return completion, advance
//!         3. despawn countdown      (stops here once removed)
//!         4. follow arrival poll    (stops here on arrival)
//!         5. combat target + melee
//! ```
//!
//! Rejected requests return an [`EscortError`] and leave every field as it
//! was; they are also logged at `warn`.

pub mod ai;
pub mod despawn;
pub mod error;
pub mod escort;
pub mod follow;
pub mod gameobject;
pub mod host;
pub mod invoker;
pub mod patrol;
pub mod reward;
pub mod state;


pub use ai::SmartAi;
pub use despawn::{DespawnCountdown, DespawnState};
pub use error::{EscortError, EscortResult};
pub use escort::EscortController;
pub use follow::{CreditKind, FollowController, FollowSession};
pub use gameobject::SmartGameObjectAi;
pub use host::{AiContext, QuestStatus, Unit, World};
pub use invoker::InvokerRangeMonitor;
pub use patrol::PatrolController;
pub use reward::settle_escort_quest;
pub use state::{EscortSession, EscortState, Pause, Phase};
