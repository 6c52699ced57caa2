//! Ready-made junction scenarios.
//!
//! Both put an ego vehicle on one approach and a second vehicle on the
//! approach to the ego's right, time the second vehicle to reach the
//! crossing point together with the ego, and then have it turn right in
//! front of the ego.  The ego itself carries no behavior here: it is the
//! system under test and keeps whatever control the simulation gives it.
//!
//! Speeds are m/s.

use std::fmt;
use std::str::FromStr;

use sr_behavior::{
    DriveDistance, InTriggerDistanceToLocation, InTriggerDistanceToNextIntersection, Parallel, ParallelPolicy,
    Sequence, StopVehicle, SyncArrival, TurnDirection, TurnVehicle, WaypointFollower,
};
use sr_core::{ActorId, Location, RoadOption, ScenarioConfig, ScenarioRng};
use sr_criteria::{CollisionTest, DrivenDistanceTest};
use sr_spatial::{plan_until_branch, query::target_waypoint, TrajectoryPlan};
use sr_world::{ActorRole, ActorStore, SignalState, Simulation, SpatialQuery};

use crate::{Scenario, ScenarioBuilder, ScenarioError, ScenarioResult};

/// Fraction by which randomized speeds may deviate from their defaults.
pub const SPEED_JITTER: f32 = 0.1;

// ── Kinds ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ScenarioKind {
    TurningRightAtSignal,
    TurningRightAtSignalizedJunction,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 2] =
        [ScenarioKind::TurningRightAtSignal, ScenarioKind::TurningRightAtSignalizedJunction];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::TurningRightAtSignal             => "turning_right_at_signal",
            ScenarioKind::TurningRightAtSignalizedJunction => "turning_right_at_signalized_junction",
        }
    }

    pub fn default_timeout_secs(self) -> f32 {
        match self {
            ScenarioKind::TurningRightAtSignal             => 80.0,
            ScenarioKind::TurningRightAtSignalizedJunction => 120.0,
        }
    }

    /// Default configuration with this scenario's timeout.
    pub fn default_config(self) -> ScenarioConfig {
        ScenarioConfig { timeout_secs: self.default_timeout_secs(), ..ScenarioConfig::default() }
    }

    /// Build the scenario with default parameters, jittered from
    /// `config.seed` when `config.randomize` is set.
    pub fn build<S: Simulation>(
        self,
        sim:    S,
        actors: ScenarioActors,
        config: ScenarioConfig,
    ) -> ScenarioResult<Scenario<S>> {
        let mut rng = ScenarioRng::new(config.seed);
        match self {
            ScenarioKind::TurningRightAtSignal => {
                let mut params = TurningRightAtSignalParams::default();
                if config.randomize {
                    params = params.randomized(&mut rng);
                }
                turning_right_at_signal(sim, actors, config, &params)
            }
            ScenarioKind::TurningRightAtSignalizedJunction => {
                let mut params = TurningRightAtSignalizedJunctionParams::default();
                if config.randomize {
                    params = params.randomized(&mut rng);
                }
                turning_right_at_signalized_junction(sim, actors, config, &params)
            }
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ScenarioError::Config(format!("unknown scenario {s:?}")))
    }
}

/// The two vehicles a catalog scenario needs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ScenarioActors {
    pub ego:   ActorId,
    pub other: ActorId,
}

impl ScenarioActors {
    /// The first ego and the first other actor in `actors`.
    pub fn from_roles(actors: &ActorStore) -> ScenarioResult<Self> {
        let ego = actors
            .with_role(ActorRole::Ego)
            .next()
            .ok_or_else(|| ScenarioError::Config("no ego actor spawned".into()))?;
        let other = actors
            .with_role(ActorRole::Other)
            .next()
            .ok_or_else(|| ScenarioError::Config("no other actor spawned".into()))?;
        Ok(Self { ego, other })
    }
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct TurningRightAtSignalParams {
    /// The run starts once the ego is within `start_radius_m` of the point
    /// this far ahead of its spawn.
    pub start_distance_m:     f32,
    pub start_radius_m:       f32,
    pub sync_max_speed:       f32,
    /// Synchronisation stops once the other vehicle is this close to the
    /// junction.
    pub sync_release_m:       f32,
    pub turn_speed:           f32,
    pub follow_speed:         f32,
    /// The run ends once the ego has driven this far after the turn.
    pub end_drive_distance_m: f32,
}

impl Default for TurningRightAtSignalParams {
    fn default() -> Self {
        Self {
            start_distance_m:     2.0,
            start_radius_m:       1.0,
            sync_max_speed:       15.0,
            sync_release_m:       10.0,
            turn_speed:           8.33,
            follow_speed:         5.56,
            end_drive_distance_m: 30.0,
        }
    }
}

impl TurningRightAtSignalParams {
    pub fn randomized(mut self, rng: &mut ScenarioRng) -> Self {
        self.sync_max_speed = rng.jitter(self.sync_max_speed, SPEED_JITTER);
        self.turn_speed = rng.jitter(self.turn_speed, SPEED_JITTER);
        self.follow_speed = rng.jitter(self.follow_speed, SPEED_JITTER);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TurningRightAtSignalizedJunctionParams {
    pub start_distance_m:          f32,
    pub start_radius_m:            f32,
    pub sync_max_speed:            f32,
    pub sync_release_m:            f32,
    pub follow_speed:              f32,
    /// The other vehicle follows its plan for this far, then brakes.
    pub follow_distance_m:         f32,
    pub max_brake:                 f32,
    /// The run ends once the ego has driven this far after the other
    /// vehicle stopped.
    pub ego_drive_distance_m:      f32,
    pub ego_success_distance_m:    f32,
    pub ego_acceptable_distance_m: f32,
}

impl Default for TurningRightAtSignalizedJunctionParams {
    fn default() -> Self {
        Self {
            start_distance_m:          10.0,
            start_radius_m:            15.0,
            sync_max_speed:            15.0,
            sync_release_m:            10.0,
            follow_speed:              6.94,
            follow_distance_m:         40.0,
            max_brake:                 1.0,
            ego_drive_distance_m:      20.0,
            ego_success_distance_m:    100.0,
            ego_acceptable_distance_m: 90.0,
        }
    }
}

impl TurningRightAtSignalizedJunctionParams {
    pub fn randomized(mut self, rng: &mut ScenarioRng) -> Self {
        self.sync_max_speed = rng.jitter(self.sync_max_speed, SPEED_JITTER);
        self.follow_speed = rng.jitter(self.follow_speed, SPEED_JITTER);
        self
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

/// The other vehicle turns right at a signalised junction into the ego's
/// lane, timed to meet the ego at the crossing point.
pub fn turning_right_at_signal<S: Simulation>(
    sim:    S,
    actors: ScenarioActors,
    config: ScenarioConfig,
    params: &TurningRightAtSignalParams,
) -> ScenarioResult<Scenario<S>> {
    let setup = junction_setup(&sim.view(), actors, params.start_distance_m)?;
    let ScenarioActors { ego, other } = actors;

    let sync = Parallel::new("sync arrival", ParallelPolicy::SuccessOnOne)
        .with_child(SyncArrival::new(other, ego, setup.crossing, params.sync_max_speed))
        .with_child(InTriggerDistanceToNextIntersection::new(other, params.sync_release_m).with_name("pass through"));
    let leave = Parallel::new("leave junction", ParallelPolicy::SuccessOnOne)
        .with_child(WaypointFollower::new(other, params.follow_speed))
        .with_child(DriveDistance::new(ego, params.end_drive_distance_m).with_name("end condition"));
    let root = Sequence::new("turning right at signal")
        .with_child(InTriggerDistanceToLocation::new(ego, setup.start, params.start_radius_m).with_name("start trigger"))
        .with_child(sync)
        .with_child(TurnVehicle::new(other, TurnDirection::Right, params.turn_speed))
        .with_child(leave);

    let green_secs = config.timeout_secs;
    ScenarioBuilder::new(ScenarioKind::TurningRightAtSignal.as_str(), config, sim)
        .behavior(root)
        .criterion(CollisionTest::new(ego))
        .criterion(CollisionTest::new(other))
        .signal(ego, SignalState::Green, green_secs)
        .build()
}

/// The other vehicle turns right across the ego's path on a planned route,
/// drives on, and brakes to a halt while the ego continues.
pub fn turning_right_at_signalized_junction<S: Simulation>(
    sim:    S,
    actors: ScenarioActors,
    config: ScenarioConfig,
    params: &TurningRightAtSignalizedJunctionParams,
) -> ScenarioResult<Scenario<S>> {
    let view = sim.view();
    let setup = junction_setup(&view, actors, params.start_distance_m)?;
    let plan = right_turn_plan(&view, actors.other)?;
    let ScenarioActors { ego, other } = actors;

    let sync = Parallel::new("sync arrival", ParallelPolicy::SuccessOnOne)
        .with_child(SyncArrival::new(other, ego, setup.crossing, params.sync_max_speed))
        .with_child(InTriggerDistanceToNextIntersection::new(other, params.sync_release_m).with_name("pass through"));
    let follow = Parallel::new("follow plan", ParallelPolicy::SuccessOnOne)
        .with_child(WaypointFollower::new(other, params.follow_speed).with_plan(&plan))
        .with_child(DriveDistance::new(other, params.follow_distance_m));
    let root = Sequence::new("turning right at signalized junction")
        .with_child(InTriggerDistanceToLocation::new(ego, setup.start, params.start_radius_m).with_name("start trigger"))
        .with_child(sync)
        .with_child(follow)
        .with_child(StopVehicle::new(other, params.max_brake))
        .with_child(DriveDistance::new(ego, params.ego_drive_distance_m).with_name("end condition"));

    let distance = DrivenDistanceTest::new(ego, params.ego_success_distance_m)
        .with_acceptable(params.ego_acceptable_distance_m)
        .into_optional();

    let green_secs = config.timeout_secs;
    ScenarioBuilder::new(ScenarioKind::TurningRightAtSignalizedJunction.as_str(), config, sim)
        .behavior(root)
        .criterion(CollisionTest::new(ego))
        .criterion(distance)
        .signal(ego, SignalState::Green, green_secs)
        .build()
}

// ── Setup queries ─────────────────────────────────────────────────────────────

struct JunctionSetup {
    start:    Location,
    crossing: Location,
}

fn junction_setup(world: &dyn SpatialQuery, actors: ScenarioActors, start_distance_m: f32) -> ScenarioResult<JunctionSetup> {
    for actor in [actors.ego, actors.other] {
        let on_map = world.location(actor).and_then(|l| world.waypoint_at(l)).is_some();
        if !on_map {
            return Err(ScenarioError::ActorNotOnMap(actor));
        }
    }
    if world.next_intersection_distance(actors.other).is_none() {
        return Err(ScenarioError::NoIntersection(actors.other));
    }
    let (start, _) = world
        .location_in_distance(actors.ego, start_distance_m)
        .ok_or(ScenarioError::ActorNotOnMap(actors.ego))?;
    let crossing = world
        .intersection_point(actors.ego, actors.other)
        .ok_or(ScenarioError::NoIntersection(actors.ego))?;
    Ok(JunctionSetup { start, crossing })
}

/// Lane-follow plan starting where `actor` comes out of a right turn at its
/// next junction.
fn right_turn_plan(world: &dyn SpatialQuery, actor: ActorId) -> ScenarioResult<TrajectoryPlan> {
    let from = world
        .location(actor)
        .and_then(|l| world.waypoint_at(l))
        .ok_or(ScenarioError::ActorNotOnMap(actor))?
        .id;
    let after_turn = target_waypoint(world.map(), from, RoadOption::Right)?;
    Ok(plan_until_branch(world.map(), after_turn, 1.0, 5.0))
}
