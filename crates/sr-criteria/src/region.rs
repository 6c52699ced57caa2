//! Criteria that succeed once an actor reaches an area.  Success is sticky.

use sr_core::{ActorId, Location};
use sr_world::TickContext;

use crate::criterion::criterion_accessors;
use crate::{Criterion, CriterionState, TestStatus};

/// Success once the actor is strictly inside an axis-aligned rectangle.
pub struct ReachedRegionTest {
    state: CriterionState,
    min:   Location,
    max:   Location,
}

impl ReachedRegionTest {
    pub fn new(actor: ActorId, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            state: CriterionState::new("ReachedRegionTest", actor, 0.0),
            min:   Location::xy(min_x.min(max_x), min_y.min(max_y)),
            max:   Location::xy(min_x.max(max_x), min_y.max(max_y)),
        }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for ReachedRegionTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        if self.state.status == TestStatus::Success {
            return;
        }
        let Some(l) = ctx.world.location(self.state.actor) else { return };
        let inside = l.x > self.min.x && l.x < self.max.x && l.y > self.min.y && l.y < self.max.y;
        self.state.status = if inside { TestStatus::Success } else { TestStatus::Running };
    }
}

/// Success once the actor is within `radius_m` of a point (in the ground
/// plane).
pub struct InRadiusRegionTest {
    state:    CriterionState,
    center:   Location,
    radius_m: f32,
}

impl InRadiusRegionTest {
    pub fn new(actor: ActorId, center: Location, radius_m: f32) -> Self {
        Self {
            state: CriterionState::new("InRadiusRegionTest", actor, radius_m as f64),
            center,
            radius_m,
        }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for InRadiusRegionTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        if self.state.status == TestStatus::Success {
            return;
        }
        let Some(location) = ctx.world.location(self.state.actor) else { return };
        let d = location.distance_2d(self.center);
        self.state.actual_value = d as f64;
        if d < self.radius_m {
            self.state.status = TestStatus::Success;
            self.state.message = Some("destination reached".into());
        } else {
            self.state.status = TestStatus::Running;
            self.state.message = Some("destination not reached".into());
        }
    }
}
