//! `sr-spatial` — lane map, successor walks, and junction geometry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`waypoint`]    | `Waypoint`, `LaneInfo`                                  |
//! | [`map`]         | `LaneMap` (CSR + R-tree), `LaneMapBuilder`              |
//! | [`successors`]  | `Successors` walk, `Step`, `StopReason`                 |
//! | [`plan`]        | `TrajectoryPlan`, `PlanEntry`, `plan_until_branch`      |
//! | [`query`]       | intersection / junction helpers used by scenarios       |
//! | [`synthetic`]   | `cross_junction` — a generated four-arm junction        |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod map;
pub mod plan;
pub mod query;
pub mod successors;
pub mod synthetic;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use map::{LaneMap, LaneMapBuilder};
pub use plan::{plan_until_branch, PlanEntry, TrajectoryPlan};
pub use successors::{Step, StopReason, Successors};
pub use synthetic::{cross_junction, ArmSide, CrossJunction, CrossJunctionParams};
pub use waypoint::{LaneInfo, Waypoint};
