//! `sr-core` — foundational types for the scenario runner.
//!
//! Every other `sr-*` crate depends on this one.  It has no `sr-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module            | Contents                                            |
//! |-------------------|-----------------------------------------------------|
//! | [`ids`]           | `ActorId`, `WaypointId`, `SignalId`                 |
//! | [`geo`]           | `Location`, `Vector3`, heading helpers              |
//! | [`time`]          | `Tick`, `SimClock`, `ScenarioConfig`                |
//! | [`rng`]           | `ScenarioRng` (parameter randomisation)             |
//! | [`road_option`]   | `RoadOption` enum                                   |
//! | [`error`]         | `CoreError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod road_option;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{normalize_angle_deg, Location, Vector3};
pub use ids::{ActorId, SignalId, WaypointId};
pub use rng::ScenarioRng;
pub use road_option::RoadOption;
pub use time::{ScenarioConfig, SimClock, Tick};
