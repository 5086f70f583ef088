use sai_ai::EscortError;
use sai_core::{ActorId, CreatureId, SaiError};
use sai_motion::MotionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error(transparent)]
    Core(#[from] SaiError),

    #[error("creature {0} spawned twice")]
    DuplicateCreature(CreatureId),

    #[error("player {0} added twice")]
    DuplicatePlayer(ActorId),

    #[error("player {0} is already in a group")]
    AlreadyGrouped(ActorId),

    #[error("motion configuration error: {0}")]
    Motion(#[from] MotionError),

    #[error("escort request rejected: {0}")]
    Escort(#[from] EscortError),
}

pub type ZoneResult<T> = Result<T, ZoneError>;
