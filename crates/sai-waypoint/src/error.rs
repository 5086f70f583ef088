//! Waypoint-catalog error type.

use thiserror::Error;

use sai_core::PathId;

/// Errors produced by `sai-waypoint`.
#[derive(Debug, Error)]
pub enum WaypointError {
    #[error("waypoint parse error: {0}")]
    Parse(String),

    #[error("path {path} uses reserved point id 0")]
    ReservedPointId { path: PathId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WaypointResult<T> = Result<T, WaypointError>;
