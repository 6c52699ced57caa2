//! `sr-world` — what the scenario engine sees of the simulation, and how it
//! talks back.
//!
//! The engine never owns actors.  It reads a per-tick [`ActorStore`]
//! snapshot through the [`SpatialQuery`] adapter, emits [`Command`]s, and
//! has them applied through the [`Actuation`] sink after the tick.  Scenario
//! setup pre-positions signals through [`Environment`].  [`Simulation`]
//! bundles all of that for the tick loop; [`KinematicWorld`] is a small
//! deterministic implementation for tests and demos.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`store`]       | `ActorStore` (SoA), `ActorRole`, `ActorState`           |
//! | [`builder`]     | `ActorStoreBuilder`, `ActorSpawn`                       |
//! | [`loader`]      | `load_spawns_csv`, `load_spawns_reader`                 |
//! | [`query`]       | `SpatialQuery` adapter trait, `WorldView`               |
//! | [`context`]     | `TickContext` — the read-only per-tick snapshot         |
//! | [`actuation`]   | `Command`, `Actuation`                                  |
//! | [`environment`] | `Environment`, `SignalState`, `Simulation`              |
//! | [`kinematic`]   | `KinematicWorld`, `VehicleLimits`, `Signal`             |
//! | [`error`]       | `WorldError`, `WorldResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash for the kinematic world's contact set.            |
//! | `serde`   | Propagates serde derives to `sr-core`/`sr-spatial`.      |

pub mod actuation;
pub mod builder;
pub mod context;
pub mod environment;
pub mod error;
pub mod kinematic;
pub mod loader;
pub mod query;
pub mod store;


pub use actuation::{Actuation, Command};
pub use builder::{ActorSpawn, ActorStoreBuilder};
pub use context::TickContext;
pub use environment::{Environment, SignalState, Simulation};
pub use error::{WorldError, WorldResult};
pub use kinematic::{KinematicWorld, Signal, VehicleLimits};
pub use loader::{load_spawns_csv, load_spawns_reader};
pub use query::{SpatialQuery, WorldView};
pub use store::{ActorRole, ActorState, ActorStore};
