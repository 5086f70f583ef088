use sai_core::MoveMode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("{mode} speed must be positive and finite, got {speed}")]
    InvalidSpeed { mode: MoveMode, speed: f32 },
}

pub type MotionResult<T> = Result<T, MotionError>;
