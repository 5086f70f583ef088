//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SaiError` via `From`
//! where a lookup or configuration failure has to propagate.

use thiserror::Error;

use crate::{ActorId, CreatureId};

/// Lookup and configuration failures shared by the `sai-*` crates.
#[derive(Debug, Error, PartialEq)]
pub enum SaiError {
    #[error("creature {0} not found")]
    CreatureNotFound(CreatureId),

    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `sai-*` crates.
pub type SaiResult<T> = Result<T, SaiError>;
