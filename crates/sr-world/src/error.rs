use sr_core::{ActorId, SignalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("signal {0} not found")]
    SignalNotFound(SignalId),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
