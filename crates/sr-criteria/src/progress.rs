//! Criteria measuring how far an actor got.

use sr_core::{ActorId, Location};
use sr_spatial::TrajectoryPlan;
use sr_world::TickContext;

use crate::criterion::criterion_accessors;
use crate::{Criterion, CriterionState, TestStatus};

/// Success/acceptable thresholds shared by the accumulating criteria.
fn graded(actual: f64, success: f64, acceptable: Option<f64>) -> TestStatus {
    if actual > success {
        TestStatus::Success
    } else if acceptable.is_some_and(|a| actual > a) {
        TestStatus::Acceptable
    } else {
        TestStatus::Running
    }
}

// ── DrivenDistanceTest ────────────────────────────────────────────────────────

/// Path length the actor drove, in metres.
pub struct DrivenDistanceTest {
    state: CriterionState,
    last:  Option<Location>,
}

impl DrivenDistanceTest {
    pub fn new(actor: ActorId, success_m: f32) -> Self {
        Self {
            state: CriterionState::new("DrivenDistanceTest", actor, success_m as f64),
            last:  None,
        }
    }

    pub fn with_acceptable(mut self, acceptable_m: f32) -> Self {
        self.state.expected_acceptable = Some(acceptable_m as f64);
        self
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for DrivenDistanceTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        let Some(location) = ctx.world.location(self.state.actor) else { return };
        if let Some(last) = self.last {
            self.state.actual_value += last.distance(location) as f64;
        }
        self.last = Some(location);
        let s = &mut self.state;
        s.status = graded(s.actual_value, s.expected_success, s.expected_acceptable);
    }
}

// ── AverageVelocityTest ───────────────────────────────────────────────────────

/// Mean speed (m/s) over the run: path length over elapsed simulated time.
pub struct AverageVelocityTest {
    state:      CriterionState,
    last:       Option<Location>,
    start_secs: f64,
    distance_m: f64,
}

impl AverageVelocityTest {
    pub fn new(actor: ActorId, success_speed: f32) -> Self {
        Self {
            state:      CriterionState::new("AverageVelocityTest", actor, success_speed as f64),
            last:       None,
            start_secs: 0.0,
            distance_m: 0.0,
        }
    }

    pub fn with_acceptable(mut self, acceptable_speed: f32) -> Self {
        self.state.expected_acceptable = Some(acceptable_speed as f64);
        self
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for AverageVelocityTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        let Some(location) = ctx.world.location(self.state.actor) else { return };
        let Some(last) = self.last.replace(location) else {
            self.start_secs = ctx.elapsed_secs;
            return;
        };
        self.distance_m += last.distance(location) as f64;
        let elapsed = ctx.elapsed_secs - self.start_secs;
        if elapsed > 0.0 {
            self.state.actual_value = self.distance_m / elapsed;
        }
        let s = &mut self.state;
        s.status = graded(s.actual_value, s.expected_success, s.expected_acceptable);
    }
}

// ── InRouteTest ───────────────────────────────────────────────────────────────

/// Fails once the actor has spent more than `offroad_max` ticks further than
/// `radius_m` from every route point.  The actual value is the off-route
/// tick count.
pub struct InRouteTest {
    state:       CriterionState,
    route:       Vec<Location>,
    radius_m:    f32,
    offroad_max: u32,
    off_route:   u32,
}

impl InRouteTest {
    pub fn new(actor: ActorId, route: &TrajectoryPlan, radius_m: f32, offroad_max: u32) -> Self {
        Self {
            state: CriterionState::new("InRouteTest", actor, offroad_max as f64),
            route: route.locations().collect(),
            radius_m,
            offroad_max,
            off_route: 0,
        }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }
}

impl Criterion for InRouteTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        if self.state.status == TestStatus::Failure {
            return;
        }
        let Some(location) = ctx.world.location(self.state.actor) else { return };

        let on_route = self.route.iter().any(|p| p.distance_2d(location) < self.radius_m);
        if !on_route {
            self.off_route += 1;
        }
        self.state.actual_value = self.off_route as f64;
        if self.off_route > self.offroad_max {
            self.state.status = TestStatus::Failure;
            self.state.message = Some("actor deviated from the route".into());
        } else {
            self.state.status = TestStatus::Success;
        }
    }
}

// ── RouteCompletionTest ───────────────────────────────────────────────────────

/// Percentage of the route reached, judged by the route point nearest the
/// actor (never moving backwards).  `Success` at 100 %.
pub struct RouteCompletionTest {
    state:   CriterionState,
    route:   Vec<Location>,
    current: usize,
}

impl RouteCompletionTest {
    pub fn new(actor: ActorId, route: &TrajectoryPlan) -> Self {
        Self {
            state:   CriterionState::new("RouteCompletionTest", actor, 100.0),
            route:   route.locations().collect(),
            current: 0,
        }
    }

    pub fn into_optional(mut self) -> Self {
        self.state.optional = true;
        self
    }

    pub fn completion_percent(&self) -> f64 {
        self.state.actual_value
    }
}

impl Criterion for RouteCompletionTest {
    criterion_accessors!();

    fn update(&mut self, ctx: &TickContext<'_>) {
        if self.route.is_empty() || self.state.status == TestStatus::Success {
            return;
        }
        let Some(location) = ctx.world.location(self.state.actor) else { return };

        let nearest = self.route[self.current..]
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.distance_2d(location).total_cmp(&b.1.distance_2d(location)))
            .map_or(0, |(i, _)| i);
        self.current += nearest;

        let s = &mut self.state;
        s.actual_value = 100.0 * (self.current + 1) as f64 / self.route.len() as f64;
        s.message = Some(format!("{:.2}% of the route completed", s.actual_value));
        s.status = if self.current + 1 == self.route.len() {
            TestStatus::Success
        } else {
            TestStatus::Running
        };
    }
}
