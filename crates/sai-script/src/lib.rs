//! `sai-script` — the event contract between the controller and the rule
//! engine that actually reacts to events.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`event`]  | `SmartEvent` enum, `EventArgs` payload                        |
//! | [`script`] | `SmartScript` trait                                           |
//! | [`noop`]   | `NoopScript` — ignores every event                            |
//! | [`log`]    | `EventLog` — records events for tests and demos               |
//! | [`error`]  | `ScriptError`, `ScriptResult<T>`                              |
//!
//! The controller only ever *raises* events; it never inspects what a script
//! does with them.  Scripts that want to change the controller's state do so
//! through their host on a later call, never re-entrantly.

pub mod error;
pub mod event;
pub mod log;
pub mod noop;
pub mod script;


pub use error::{ScriptError, ScriptResult};
pub use event::{EventArgs, SmartEvent};
pub use log::EventLog;
pub use noop::NoopScript;
pub use script::SmartScript;
