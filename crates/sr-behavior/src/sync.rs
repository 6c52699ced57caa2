//! Arrival synchronization.
//!
//! [`SyncArrival`] keeps re-targeting a secondary actor's speed so that it
//! reaches a location at the same moment as a primary actor would at the
//! primary's current speed.  It never finishes by itself; pair it with a
//! trigger in a `Parallel` to end it.

use sr_core::{ActorId, Location, Vector3};
use sr_world::{Command, TickContext};

use crate::{Behavior, Status};

/// Primary speeds below this (m/s) count as stalled.
pub const MIN_REFERENCE_SPEED: f32 = 1e-3;

/// Time-to-target assumed for a stalled primary.  Large but finite, so the
/// secondary is commanded a near-zero, non-negative speed.
pub const STALLED_TIME_SECS: f32 = 1e6;

/// A primary this close to the target (m) has arrived.
pub const ARRIVAL_EPSILON_M: f32 = 0.1;

/// Speed the secondary needs to cover `secondary_distance` in the time the
/// primary takes to cover `primary_distance` at `primary_speed`, limited to
/// `[0, max_speed]`.
pub fn required_speed(primary_distance: f32, primary_speed: f32, secondary_distance: f32, max_speed: f32) -> f32 {
    let max_speed = max_speed.max(0.0);
    if primary_distance <= ARRIVAL_EPSILON_M {
        return max_speed;
    }
    let time_to_target = if primary_speed < MIN_REFERENCE_SPEED {
        STALLED_TIME_SECS
    } else {
        primary_distance / primary_speed
    };
    (secondary_distance / time_to_target).min(max_speed).max(0.0)
}

/// State recomputed every tick; exposed for observation and tests.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SyncState {
    pub target:     Location,
    /// Last speed commanded to the secondary.
    pub last_speed: Option<f32>,
}

pub struct SyncArrival {
    name:      String,
    secondary: ActorId,
    primary:   ActorId,
    max_speed: f32,
    state:     SyncState,
}

impl SyncArrival {
    /// Drive `secondary` so it reaches `target` together with `primary`.
    pub fn new(secondary: ActorId, primary: ActorId, target: Location, max_speed: f32) -> Self {
        Self {
            name: "SyncArrival".into(),
            secondary,
            primary,
            max_speed: max_speed.max(0.0),
            state: SyncState { target, last_speed: None },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn state(&self) -> SyncState {
        self.state
    }
}

impl Behavior for SyncArrival {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        let world = ctx.world;
        let target = self.state.target;
        let (Some(primary_loc), Some(secondary_loc)) =
            (world.location(self.primary), world.location(self.secondary))
        else {
            return Status::Running;
        };

        let primary_distance = primary_loc.distance(target);
        let heading = Vector3::from_yaw(world.yaw_deg(self.primary).unwrap_or(0.0));
        let passed = primary_distance <= ARRIVAL_EPSILON_M || heading.dot(target - primary_loc) < 0.0;

        let speed = if passed {
            self.max_speed
        } else {
            required_speed(
                primary_distance,
                world.speed(self.primary),
                secondary_loc.distance(target),
                self.max_speed,
            )
        };
        self.state.last_speed = Some(speed);
        commands.push(Command::TargetVelocity { actor: self.secondary, speed });
        Status::Running
    }
}
