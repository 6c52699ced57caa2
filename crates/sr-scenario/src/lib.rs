//! `sr-scenario` — runs a behavior tree and its criteria against a
//! simulation until the tree finishes or the timeout elapses.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`scenario`] | `Scenario` — the tick loop                                 |
//! | [`builder`]  | `ScenarioBuilder` — validation and environment setup       |
//! | [`observer`] | `ScenarioObserver`, `NoopObserver`                         |
//! | [`outcome`]  | `Outcome`, `ScenarioReport`                                |
//! | [`catalog`]  | the junction scenarios, `ScenarioKind`, their parameters   |
//! | [`error`]    | `ScenarioError`, `ScenarioResult<T>`                       |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let world = KinematicWorld::new(junction.map, actors);
//! let mut scenario = ScenarioKind::TurningRightAtSignal
//!     .build(world, ScenarioActors { ego, other }, config)?;
//! let outcome = scenario.run(&mut NoopObserver)?;
//! println!("{}", scenario.report().unwrap());
//! ```

pub mod builder;
pub mod catalog;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod scenario;


pub use builder::ScenarioBuilder;
pub use catalog::{
    turning_right_at_signal, turning_right_at_signalized_junction, ScenarioActors, ScenarioKind,
    TurningRightAtSignalParams, TurningRightAtSignalizedJunctionParams,
};
pub use error::{ScenarioError, ScenarioResult};
pub use observer::{NoopObserver, ScenarioObserver};
pub use outcome::{Outcome, ScenarioReport};
pub use scenario::Scenario;
