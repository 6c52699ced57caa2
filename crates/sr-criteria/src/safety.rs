//! Criteria that fail on an unsafe event and never recover.

use sr_core::ActorId;
use sr_world::TickContext;

use crate::criterion::criterion_accessors;
use crate::{Criterion, CriterionState, TestStatus};

// ── CollisionTest ─────────────────────────────────────────────────────────────

/// Passes while the actor has not collided.  Once a collision has been
/// seen the status is `Failure` for good, even after the actors separate.
pub struct CollisionTest {
    state: CriterionState,
}

impl CollisionTest {
    pub fn new(actor: ActorId) -> Self {
        Self { state: CriterionState::new("CollisionTest", actor, 0.0) }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for CollisionTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        let count = ctx.world.collision_count(self.state.actor) as f64;
        self.state.actual_value = self.state.actual_value.max(count);
        if self.state.actual_value > 0.0 {
            self.state.status = TestStatus::Failure;
            self.state.message = Some(format!("{} collision(s)", self.state.actual_value));
        } else if self.state.status != TestStatus::Failure {
            self.state.status = TestStatus::Success;
        }
    }
}

// ── KeepLaneTest ──────────────────────────────────────────────────────────────

/// Fails once the actor has left its lane.
pub struct KeepLaneTest {
    state: CriterionState,
}

impl KeepLaneTest {
    pub fn new(actor: ActorId) -> Self {
        Self { state: CriterionState::new("KeepLaneTest", actor, 0.0) }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for KeepLaneTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        let count = ctx.world.lane_invasion_count(self.state.actor) as f64;
        self.state.actual_value = self.state.actual_value.max(count);
        self.state.status = if self.state.actual_value > 0.0 {
            TestStatus::Failure
        } else {
            TestStatus::Success
        };
    }
}

// ── MaxVelocityTest ───────────────────────────────────────────────────────────

/// Fails once the actor exceeds `max_speed` (m/s).  The peak speed is kept
/// as the actual value.
pub struct MaxVelocityTest {
    state: CriterionState,
}

impl MaxVelocityTest {
    pub fn new(actor: ActorId, max_speed: f32) -> Self {
        Self { state: CriterionState::new("MaxVelocityTest", actor, max_speed as f64) }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for MaxVelocityTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        let speed = ctx.world.speed(self.state.actor) as f64;
        self.state.actual_value = self.state.actual_value.max(speed);
        if speed > self.state.expected_success {
            self.state.status = TestStatus::Failure;
            self.state.message = Some(format!("peak speed {:.2} m/s", self.state.actual_value));
        } else if self.state.status != TestStatus::Failure {
            self.state.status = TestStatus::Success;
        }
    }
}
