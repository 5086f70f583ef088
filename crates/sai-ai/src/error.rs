use sai_core::PathId;
use thiserror::Error;

/// Rejected escort requests.  None of these change controller state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EscortError {
    #[error("cannot start an escort while in combat")]
    InCombat,

    #[error("cannot load a path while escorting")]
    AlreadyEscorting,

    #[error("waypoint path {0} not found")]
    PathNotFound(PathId),

    #[error("no waypoints loaded")]
    EmptyPath,

    #[error("escort is already paused")]
    AlreadyPaused,
}

pub type EscortResult<T> = Result<T, EscortError>;
