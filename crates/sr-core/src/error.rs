//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` with
//! `#[from]` where they surface it.

use thiserror::Error;

use crate::{ActorId, SignalId, WaypointId};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("waypoint {0} not found")]
    WaypointNotFound(WaypointId),

    #[error("signal {0} not found")]
    SignalNotFound(SignalId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
