//! `sr-behavior` — the behavior tree that drives scenario actors.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`status`]    | `Status` (`Running`, `Success`, `Failure`)                    |
//! | [`node`]      | `Behavior` trait, `Node` lifecycle wrapper                    |
//! | [`composite`] | `Sequence`, `Parallel`, `ParallelPolicy`                      |
//! | [`trigger`]   | distance, intersection-proximity, drive-distance, timeout     |
//! | [`control`]   | `WaypointFollower`, `TurnVehicle`, `StopVehicle`, `AccelerateToVelocity` |
//! | [`sync`]      | `SyncArrival`, `required_speed`                               |
//!
//! # Design notes
//!
//! Every tick runs in two phases:
//!
//! 1. **Intent phase**: the scenario ticks the root [`Node`].  Behaviors
//!    read the world through the [`TickContext`](sr_world::TickContext)
//!    snapshot and push [`Command`](sr_world::Command)s into a buffer.
//!
//! 2. **Apply phase**: after the criteria have seen the same snapshot, the
//!    scenario hands the buffer to the simulation's actuation sink.
//!
//! Behaviors never block and never touch the simulation directly.  Terminal
//! statuses are sticky: a `Node` that has returned `Success` or `Failure`
//! is never ticked again.

pub mod composite;
pub mod control;
pub mod node;
pub mod status;
pub mod sync;
pub mod trigger;

#[cfg(test)]
mod tests;

pub use composite::{Parallel, ParallelPolicy, Sequence};
pub use control::{
    AccelerateToVelocity, ManeuverCorridor, StopVehicle, TurnDirection, TurnVehicle, WaypointFollower,
};
pub use node::{Behavior, Node};
pub use status::Status;
pub use sync::{required_speed, SyncArrival, SyncState};
pub use trigger::{
    DriveDistance, InTriggerDistanceToLocation, InTriggerDistanceToNextIntersection, TargetLocation, TimeOut,
};
