use thiserror::Error;

use sr_core::{ActorId, CoreError};
use sr_spatial::SpatialError;
use sr_world::WorldError;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario configuration error: {0}")]
    Config(String),

    #[error("scenario {0:?} has no behavior tree")]
    MissingBehavior(String),

    #[error("no traffic signal governs the approach of {0}")]
    NoSignalNearActor(ActorId),

    #[error("{0} is not on the lane map")]
    ActorNotOnMap(ActorId),

    #[error("the lane of {0} never reaches a junction")]
    NoIntersection(ActorId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("spatial query failed: {0}")]
    Spatial(#[from] SpatialError),

    #[error("simulation error: {0}")]
    World(#[from] WorldError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
