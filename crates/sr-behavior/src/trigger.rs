//! Conditions that succeed once the world reaches some state.
//!
//! Triggers emit no commands and never fail; they stay `Running` until
//! their condition holds, including while the actor they watch is unknown.

use sr_core::{ActorId, Location};
use sr_world::{Command, SpatialQuery, TickContext};

use crate::{Behavior, Status};

// ── Distance to a location ────────────────────────────────────────────────────

/// What a distance trigger measures against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TargetLocation {
    Fixed(Location),
    /// Another actor's current location, re-read every tick.
    Actor(ActorId),
}

impl TargetLocation {
    pub fn resolve(&self, world: &dyn SpatialQuery) -> Option<Location> {
        match *self {
            TargetLocation::Fixed(location) => Some(location),
            TargetLocation::Actor(actor) => world.location(actor),
        }
    }
}

impl From<Location> for TargetLocation {
    fn from(location: Location) -> Self {
        TargetLocation::Fixed(location)
    }
}

impl From<ActorId> for TargetLocation {
    fn from(actor: ActorId) -> Self {
        TargetLocation::Actor(actor)
    }
}

/// `Success` once `actor` is strictly closer than `radius` to the target.
pub struct InTriggerDistanceToLocation {
    name:   String,
    actor:  ActorId,
    target: TargetLocation,
    radius: f32,
}

impl InTriggerDistanceToLocation {
    pub fn new(actor: ActorId, target: impl Into<TargetLocation>, radius: f32) -> Self {
        Self {
            name: "InTriggerDistanceToLocation".into(),
            actor,
            target: target.into(),
            radius,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Behavior for InTriggerDistanceToLocation {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &TickContext<'_>, _commands: &mut Vec<Command>) -> Status {
        let distance = self
            .target
            .resolve(ctx.world)
            .and_then(|target| ctx.world.distance(self.actor, target));
        match distance {
            Some(d) if d < self.radius => Status::Success,
            _ => Status::Running,
        }
    }
}

// ── Distance to the next intersection ─────────────────────────────────────────

/// `Success` once `actor` is strictly closer than `distance` to the next
/// junction on its lane.
pub struct InTriggerDistanceToNextIntersection {
    name:     String,
    actor:    ActorId,
    distance: f32,
}

impl InTriggerDistanceToNextIntersection {
    pub fn new(actor: ActorId, distance: f32) -> Self {
        Self { name: "InTriggerDistanceToNextIntersection".into(), actor, distance }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Behavior for InTriggerDistanceToNextIntersection {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &TickContext<'_>, _commands: &mut Vec<Command>) -> Status {
        match ctx.world.next_intersection_distance(self.actor) {
            Some(d) if d < self.distance => Status::Success,
            _ => Status::Running,
        }
    }
}

// ── Driven distance ───────────────────────────────────────────────────────────

/// `Success` on the tick the path length `actor` has covered since this
/// behavior started reaches `distance_m`.
pub struct DriveDistance {
    name:       String,
    actor:      ActorId,
    distance_m: f32,
    travelled:  f32,
    last:       Option<Location>,
}

impl DriveDistance {
    pub fn new(actor: ActorId, distance_m: f32) -> Self {
        Self {
            name: "DriveDistance".into(),
            actor,
            distance_m,
            travelled: 0.0,
            last: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn travelled(&self) -> f32 {
        self.travelled
    }
}

impl Behavior for DriveDistance {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self, ctx: &TickContext<'_>) {
        self.travelled = 0.0;
        self.last = ctx.world.location(self.actor);
    }

    fn update(&mut self, ctx: &TickContext<'_>, _commands: &mut Vec<Command>) -> Status {
        if let Some(location) = ctx.world.location(self.actor) {
            if let Some(last) = self.last {
                self.travelled += last.distance(location);
            }
            self.last = Some(location);
        }
        if self.travelled >= self.distance_m { Status::Success } else { Status::Running }
    }
}

// ── Timeout ───────────────────────────────────────────────────────────────────

/// `Success` once `duration_secs` of simulated time have passed since the
/// first tick.
pub struct TimeOut {
    name:          String,
    duration_secs: f64,
    started_secs:  f64,
}

impl TimeOut {
    pub fn new(duration_secs: f64) -> Self {
        Self { name: "TimeOut".into(), duration_secs, started_secs: 0.0 }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Behavior for TimeOut {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self, ctx: &TickContext<'_>) {
        self.started_secs = ctx.elapsed_secs;
    }

    fn update(&mut self, ctx: &TickContext<'_>, _commands: &mut Vec<Command>) -> Status {
        if ctx.elapsed_secs - self.started_secs >= self.duration_secs {
            Status::Success
        } else {
            Status::Running
        }
    }
}
