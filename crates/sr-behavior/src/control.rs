//! Vehicle controllers: behaviors that command actors.

use std::collections::VecDeque;

use tracing::warn;

use sr_core::{normalize_angle_deg, ActorId, Location, Vector3};
use sr_spatial::{PlanEntry, TrajectoryPlan};
use sr_world::{Command, SpatialQuery, TickContext};

use crate::{Behavior, Status};

/// Pure-pursuit steering angle (degrees, positive left) that brings a
/// vehicle at `location` heading `yaw_deg` onto `target`.
fn pursuit_steer_deg(location: Location, yaw_deg: f32, target: Location, wheelbase_m: f32, max_steer_deg: f32) -> f32 {
    let heading = Vector3::from_yaw(yaw_deg);
    let to_target = target - location;
    let lookahead = to_target.length().max(0.5);
    let mut alpha = heading.angle_deg(to_target).to_radians();
    if heading.cross_z(to_target) < 0.0 {
        alpha = -alpha;
    }
    let steer = (2.0 * wheelbase_m * alpha.sin()).atan2(lookahead).to_degrees();
    steer.clamp(-max_steer_deg, max_steer_deg)
}

// ── WaypointFollower ──────────────────────────────────────────────────────────

/// Drives an actor along a plan at a constant target speed.
///
/// Entries closer than `reach_m` or behind the vehicle are dropped.  Once
/// the plan is used up (or when none was given) the follower tracks a
/// waypoint `lookahead_m` ahead on the current lane.  Never finishes.
pub struct WaypointFollower {
    name:          String,
    actor:         ActorId,
    target_speed:  f32,
    plan:          VecDeque<PlanEntry>,
    reach_m:       f32,
    lookahead_m:   f32,
    wheelbase_m:   f32,
    max_steer_deg: f32,
}

impl WaypointFollower {
    pub fn new(actor: ActorId, target_speed: f32) -> Self {
        Self {
            name: "WaypointFollower".into(),
            actor,
            target_speed: target_speed.max(0.0),
            plan: VecDeque::new(),
            reach_m: 2.0,
            lookahead_m: 5.0,
            wheelbase_m: 2.8,
            max_steer_deg: 35.0,
        }
    }

    /// Follow a private copy of `plan`.
    pub fn with_plan(mut self, plan: &TrajectoryPlan) -> Self {
        self.plan = plan.iter().copied().collect();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Plan entries not yet reached.
    pub fn remaining(&self) -> usize {
        self.plan.len()
    }

    fn lane_lookahead(&self, world: &dyn SpatialQuery, location: Location) -> Option<Location> {
        let wp = world.waypoint_at(location)?;
        let &id = world.map().next(wp.id, self.lookahead_m).first()?;
        world.map().waypoint(id).map(|w| w.location)
    }
}

impl Behavior for WaypointFollower {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        let world = ctx.world;
        let (Some(location), Some(yaw)) = (world.location(self.actor), world.yaw_deg(self.actor)) else {
            return Status::Running;
        };

        let heading = Vector3::from_yaw(yaw);
        while let Some(front) = self.plan.front() {
            let to = front.waypoint.location - location;
            if to.length() < self.reach_m || heading.dot(to) < 0.0 {
                self.plan.pop_front();
            } else {
                break;
            }
        }

        let target = match self.plan.front() {
            Some(entry) => Some(entry.waypoint.location),
            None => self.lane_lookahead(world, location),
        };
        let steer = target.map_or(0.0, |t| {
            pursuit_steer_deg(location, yaw, t, self.wheelbase_m, self.max_steer_deg)
        });

        commands.push(Command::TargetVelocity { actor: self.actor, speed: self.target_speed });
        commands.push(Command::Steer { actor: self.actor, angle_deg: steer });
        Status::Running
    }
}

// ── TurnVehicle ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Sign of the yaw change and of the steering angle.
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Left => 1.0,
            TurnDirection::Right => -1.0,
        }
    }
}

/// Limits a maneuver must stay within; `None` disables a limit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ManeuverCorridor {
    /// Maximum straight-line distance from where the maneuver started.
    pub radius_m: Option<f32>,
    pub max_duration_secs: Option<f64>,
}

impl Default for ManeuverCorridor {
    fn default() -> Self {
        Self { radius_m: Some(30.0), max_duration_secs: Some(20.0) }
    }
}

impl ManeuverCorridor {
    pub fn unbounded() -> Self {
        Self { radius_m: None, max_duration_secs: None }
    }
}

#[derive(Copy, Clone, Debug)]
struct TurnStart {
    location:     Location,
    elapsed_secs: f64,
}

/// Holds a fixed steering angle and speed until the heading has changed by
/// `turn_angle_deg` in `direction`.
///
/// Fails if the actor leaves the corridor, turns the wrong way by more than
/// half the turn angle, or disappears.
pub struct TurnVehicle {
    name:           String,
    actor:          ActorId,
    direction:      TurnDirection,
    speed:          f32,
    steer_deg:      f32,
    turn_angle_deg: f32,
    tolerance_deg:  f32,
    corridor:       ManeuverCorridor,
    start:          Option<TurnStart>,
    last_yaw:       Option<f32>,
    turned_deg:     f32,
}

impl TurnVehicle {
    pub fn new(actor: ActorId, direction: TurnDirection, speed: f32) -> Self {
        Self {
            name: "TurnVehicle".into(),
            actor,
            direction,
            speed: speed.max(0.0),
            steer_deg: 20.0,
            turn_angle_deg: 90.0,
            tolerance_deg: 1.0,
            corridor: ManeuverCorridor::default(),
            start: None,
            last_yaw: None,
            turned_deg: 0.0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_steer_deg(mut self, steer_deg: f32) -> Self {
        self.steer_deg = steer_deg.abs();
        self
    }

    pub fn with_turn_angle_deg(mut self, turn_angle_deg: f32) -> Self {
        self.turn_angle_deg = turn_angle_deg.abs();
        self
    }

    pub fn with_corridor(mut self, corridor: ManeuverCorridor) -> Self {
        self.corridor = corridor;
        self
    }

    /// Heading change so far, positive in the requested direction.
    pub fn turned_deg(&self) -> f32 {
        self.turned_deg
    }

    fn left_corridor(&self, start: TurnStart, location: Location, elapsed_secs: f64) -> bool {
        let too_far = self.corridor.radius_m.is_some_and(|r| location.distance(start.location) > r);
        let too_long = self
            .corridor
            .max_duration_secs
            .is_some_and(|d| elapsed_secs - start.elapsed_secs > d);
        too_far || too_long
    }
}

impl Behavior for TurnVehicle {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self, ctx: &TickContext<'_>) {
        self.turned_deg = 0.0;
        self.last_yaw = ctx.world.yaw_deg(self.actor);
        self.start = ctx
            .world
            .location(self.actor)
            .map(|location| TurnStart { location, elapsed_secs: ctx.elapsed_secs });
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        let world = ctx.world;
        let (Some(location), Some(yaw), Some(start)) =
            (world.location(self.actor), world.yaw_deg(self.actor), self.start)
        else {
            warn!(node = %self.name, actor = %self.actor, "turning actor not found");
            return Status::Failure;
        };

        if let Some(last) = self.last_yaw {
            self.turned_deg += normalize_angle_deg(yaw - last) * self.direction.sign();
        }
        self.last_yaw = Some(yaw);

        if self.turned_deg >= self.turn_angle_deg - self.tolerance_deg {
            commands.push(Command::Steer { actor: self.actor, angle_deg: 0.0 });
            return Status::Success;
        }
        if self.turned_deg < -0.5 * self.turn_angle_deg || self.left_corridor(start, location, ctx.elapsed_secs) {
            return Status::Failure;
        }

        commands.push(Command::TargetVelocity { actor: self.actor, speed: self.speed });
        commands.push(Command::Steer { actor: self.actor, angle_deg: self.direction.sign() * self.steer_deg });
        Status::Running
    }
}

// ── StopVehicle ───────────────────────────────────────────────────────────────

/// Brakes until the actor is at rest.
pub struct StopVehicle {
    name:      String,
    actor:     ActorId,
    max_brake: f32,
    epsilon:   f32,
}

impl StopVehicle {
    pub fn new(actor: ActorId, max_brake: f32) -> Self {
        Self { name: "StopVehicle".into(), actor, max_brake: max_brake.clamp(0.0, 1.0), epsilon: 0.001 }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Behavior for StopVehicle {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        if ctx.world.location(self.actor).is_none() {
            warn!(node = %self.name, actor = %self.actor, "stopping actor not found");
            return Status::Failure;
        }
        commands.push(Command::Stop { actor: self.actor, max_brake: self.max_brake });
        if ctx.world.speed(self.actor) <= self.epsilon { Status::Success } else { Status::Running }
    }
}

// ── AccelerateToVelocity ──────────────────────────────────────────────────────

/// Commands a target speed and succeeds once the actor has reached it.
pub struct AccelerateToVelocity {
    name:         String,
    actor:        ActorId,
    target_speed: f32,
}

impl AccelerateToVelocity {
    const TOLERANCE: f32 = 0.01;

    pub fn new(actor: ActorId, target_speed: f32) -> Self {
        Self { name: "AccelerateToVelocity".into(), actor, target_speed: target_speed.max(0.0) }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Behavior for AccelerateToVelocity {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        if ctx.world.location(self.actor).is_none() {
            warn!(node = %self.name, actor = %self.actor, "accelerating actor not found");
            return Status::Failure;
        }
        commands.push(Command::TargetVelocity { actor: self.actor, speed: self.target_speed });
        if ctx.world.speed(self.actor) >= self.target_speed - Self::TOLERANCE {
            Status::Success
        } else {
            Status::Running
        }
    }
}
