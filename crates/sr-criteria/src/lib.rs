//! `sr-criteria` — measurements that decide whether a scenario run passed.
//!
//! Criteria are updated every tick, against the same snapshot the behavior
//! tree saw, whatever state the tree is in.  They never end the run and
//! never fail with an error; they only accumulate a [`CriterionRecord`].
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`record`]    | `TestStatus`, `Verdict`, `CriterionRecord`                |
//! | [`criterion`] | `Criterion` trait, `CriterionState` shared bookkeeping    |
//! | [`safety`]    | `CollisionTest`, `KeepLaneTest`, `MaxVelocityTest`        |
//! | [`progress`]  | `DrivenDistanceTest`, `AverageVelocityTest`, `InRouteTest`, `RouteCompletionTest` |
//! | [`region`]    | `ReachedRegionTest`, `InRadiusRegionTest`                 |
//! | [`set`]       | `CriteriaSet` — update, report, aggregate                 |

pub mod criterion;
pub mod progress;
pub mod record;
pub mod region;
pub mod safety;
pub mod set;


pub use criterion::{Criterion, CriterionState};
pub use progress::{AverageVelocityTest, DrivenDistanceTest, InRouteTest, RouteCompletionTest};
pub use record::{CriterionRecord, TestStatus, Verdict};
pub use region::{InRadiusRegionTest, ReachedRegionTest};
pub use safety::{CollisionTest, KeepLaneTest, MaxVelocityTest};
pub use set::CriteriaSet;
