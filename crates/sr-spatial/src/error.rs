//! Spatial-subsystem error type.

use thiserror::Error;

use sr_core::WaypointId;

/// Errors produced by `sr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("waypoint {0} not found in lane map")]
    WaypointNotFound(WaypointId),

    #[error("lane map has no waypoints")]
    EmptyMap,

    #[error("no junction ahead of {from}")]
    NoJunctionAhead { from: WaypointId },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
