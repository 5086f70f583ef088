use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("unknown event name {0:?}")]
    UnknownEvent(String),
}

pub type ScriptResult<T> = Result<T, ScriptError>;
