//! Read-only per-tick snapshot passed to behaviors and criteria.

use sr_core::Tick;

use crate::query::SpatialQuery;

/// Everything a behavior or criterion may look at during one tick.
///
/// Built by the scenario once per tick; the tree and the criteria see the
/// same instance, so they observe the same world state.
pub struct TickContext<'a> {
    pub tick: Tick,

    /// Simulated seconds per tick.
    pub delta_secs: f32,

    /// Simulated seconds since the scenario started.
    pub elapsed_secs: f64,

    pub world: &'a dyn SpatialQuery,
}

impl<'a> TickContext<'a> {
    pub fn new(tick: Tick, delta_secs: f32, elapsed_secs: f64, world: &'a dyn SpatialQuery) -> Self {
        Self { tick, delta_secs, elapsed_secs, world }
    }
}
