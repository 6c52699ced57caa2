//! A small deterministic simulation for tests and demos.
//!
//! Each actor is a kinematic bicycle that tracks a target speed with bounded
//! acceleration and holds a commanded steering angle.  Collisions are
//! counted when two actor discs start touching; lane invasions when an
//! actor leaves its lane.  Signals cycle green → yellow → red on their own
//! once set to a lit state.

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashSet as ContactSet;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashSet as ContactSet;

use tracing::debug;

use sr_core::{normalize_angle_deg, ActorId, Location, SignalId};
use sr_spatial::query::last_waypoint_before_intersection;
use sr_spatial::LaneMap;

use crate::actuation::Actuation;
use crate::environment::{Environment, SignalState, Simulation};
use crate::error::{WorldError, WorldResult};
use crate::store::ActorStore;

// ── Vehicle limits ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleLimits {
    /// m/s².
    pub max_accel: f32,

    /// Deceleration at full brake, m/s².
    pub max_decel: f32,

    pub wheelbase_m: f32,

    /// Commanded steering is clamped to ±this.
    pub max_steer_deg: f32,

    /// Actors are discs of this radius for contact detection.
    pub radius_m: f32,

    /// An actor further than this from its nearest waypoint is off its lane.
    pub lane_half_width_m: f32,
}

impl Default for VehicleLimits {
    fn default() -> Self {
        Self {
            max_accel:         3.0,
            max_decel:         8.0,
            wheelbase_m:       2.8,
            max_steer_deg:     35.0,
            radius_m:          1.8,
            lane_half_width_m: 1.75,
        }
    }
}

// ── Signals ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    pub id:          SignalId,
    pub location:    Location,
    pub state:       SignalState,
    pub green_secs:  f32,
    pub yellow_secs: f32,
    pub red_secs:    f32,
    /// Seconds spent in the current state.
    pub in_state_secs: f32,
}

impl Signal {
    fn new(id: SignalId, location: Location) -> Self {
        Self {
            id,
            location,
            state:         SignalState::Off,
            green_secs:    10.0,
            yellow_secs:   3.0,
            red_secs:      10.0,
            in_state_secs: 0.0,
        }
    }

    fn step(&mut self, dt: f32) {
        self.in_state_secs += dt;
        let (limit, next) = match self.state {
            SignalState::Green  => (self.green_secs, SignalState::Yellow),
            SignalState::Yellow => (self.yellow_secs, SignalState::Red),
            SignalState::Red    => (self.red_secs, SignalState::Green),
            SignalState::Off    => return,
        };
        if self.in_state_secs >= limit {
            debug!(signal = %self.id, from = %self.state, to = %next, "signal changed");
            self.state = next;
            self.in_state_secs = 0.0;
        }
    }
}

// ── Per-actor control ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
struct Control {
    target_speed: f32,
    steer_deg:    f32,
    /// `Some(fraction)` while a stop is in progress.
    brake:        Option<f32>,
}

// ── KinematicWorld ────────────────────────────────────────────────────────────

pub struct KinematicWorld {
    actors:   ActorStore,
    map:      LaneMap,
    limits:   VehicleLimits,
    controls: Vec<Control>,
    signals:  Vec<Signal>,
    contacts: ContactSet<(ActorId, ActorId)>,
    off_lane: Vec<bool>,
}

impl KinematicWorld {
    /// Every actor starts out holding its spawn speed.
    pub fn new(map: LaneMap, actors: ActorStore) -> Self {
        let controls = actors
            .speed
            .iter()
            .map(|&s| Control { target_speed: s, ..Control::default() })
            .collect();
        let off_lane = vec![false; actors.count];
        Self {
            actors,
            map,
            limits: VehicleLimits::default(),
            controls,
            signals: Vec::new(),
            contacts: ContactSet::default(),
            off_lane,
        }
    }

    pub fn with_limits(mut self, limits: VehicleLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &VehicleLimits {
        &self.limits
    }

    /// Direct write access, for placing actors in tests.
    pub fn actors_mut(&mut self) -> &mut ActorStore {
        &mut self.actors
    }

    /// Place an unlit signal.
    pub fn add_signal(&mut self, location: Location) -> SignalId {
        let id = SignalId(self.signals.len() as u32);
        self.signals.push(Signal::new(id, location));
        id
    }

    pub fn signal(&self, id: SignalId) -> Option<&Signal> {
        self.signals.get(id.index())
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Speed the actor is currently tracking.
    pub fn target_speed(&self, actor: ActorId) -> Option<f32> {
        self.controls.get(actor.index()).map(|c| c.target_speed)
    }

    pub fn steering_deg(&self, actor: ActorId) -> Option<f32> {
        self.controls.get(actor.index()).map(|c| c.steer_deg)
    }

    pub fn is_braking(&self, actor: ActorId) -> bool {
        self.controls.get(actor.index()).is_some_and(|c| c.brake.is_some())
    }

    fn control_mut(&mut self, actor: ActorId) -> WorldResult<&mut Control> {
        self.controls.get_mut(actor.index()).ok_or(WorldError::ActorNotFound(actor))
    }

    fn signal_mut(&mut self, id: SignalId) -> WorldResult<&mut Signal> {
        self.signals.get_mut(id.index()).ok_or(WorldError::SignalNotFound(id))
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    fn step_actor(&mut self, i: usize, dt: f32) {
        let lim = &self.limits;
        let c = self.controls[i];
        let speed = self.actors.speed[i];

        let new_speed = match c.brake {
            Some(b) => (speed - lim.max_decel * b.clamp(0.0, 1.0) * dt).max(0.0),
            None => {
                let target = c.target_speed.max(0.0);
                if target > speed {
                    (speed + lim.max_accel * dt).min(target)
                } else {
                    (speed - lim.max_decel * dt).max(target)
                }
            }
        };

        let avg_speed = 0.5 * (speed + new_speed);
        let steer = c.steer_deg.clamp(-lim.max_steer_deg, lim.max_steer_deg).to_radians();
        let yaw_rate_deg = (avg_speed * steer.tan() / lim.wheelbase_m).to_degrees();
        let yaw = normalize_angle_deg(self.actors.yaw_deg[i] + yaw_rate_deg * dt);

        self.actors.location[i] = self.actors.location[i].project(yaw, avg_speed * dt);
        self.actors.yaw_deg[i] = yaw;
        self.actors.speed[i] = new_speed;
    }

    fn update_contacts(&mut self) {
        let reach = 2.0 * self.limits.radius_m;
        let n = self.actors.count;
        for i in 0..n {
            for j in (i + 1)..n {
                let key = (ActorId(i as u32), ActorId(j as u32));
                let touching = self.actors.location[i].distance(self.actors.location[j]) < reach;
                if !touching {
                    self.contacts.remove(&key);
                } else if self.contacts.insert(key) {
                    self.actors.collisions[i] += 1;
                    self.actors.collisions[j] += 1;
                    debug!(a = %key.0, b = %key.1, "collision");
                }
            }
        }
    }

    fn update_lane_invasions(&mut self) {
        if self.map.is_empty() {
            return;
        }
        for i in 0..self.actors.count {
            let loc = self.actors.location[i];
            let off = self
                .map
                .waypoint_at(loc)
                .is_some_and(|wp| wp.location.distance_2d(loc) > self.limits.lane_half_width_m);
            if off && !self.off_lane[i] {
                self.actors.lane_invasions[i] += 1;
                debug!(actor = i, "lane invasion");
            }
            self.off_lane[i] = off;
        }
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl Actuation for KinematicWorld {
    fn set_target_velocity(&mut self, actor: ActorId, speed: f32) -> WorldResult<()> {
        let c = self.control_mut(actor)?;
        c.target_speed = speed.max(0.0);
        c.brake = None;
        Ok(())
    }

    fn set_steering(&mut self, actor: ActorId, angle_deg: f32) -> WorldResult<()> {
        self.control_mut(actor)?.steer_deg = angle_deg;
        Ok(())
    }

    fn stop(&mut self, actor: ActorId, max_brake: f32) -> WorldResult<()> {
        let c = self.control_mut(actor)?;
        c.target_speed = 0.0;
        c.brake = Some(max_brake);
        Ok(())
    }
}

impl Environment for KinematicWorld {
    /// The lit or unlit signal nearest to the last waypoint before the
    /// actor's next junction.
    fn next_signal(&self, actor: ActorId) -> Option<SignalId> {
        let loc = self.actors.location(actor)?;
        let stop = last_waypoint_before_intersection(&self.map, loc)?.location;
        self.signals
            .iter()
            .min_by(|a, b| a.location.distance(stop).total_cmp(&b.location.distance(stop)))
            .map(|s| s.id)
    }

    fn set_signal_state(&mut self, signal: SignalId, state: SignalState) -> WorldResult<()> {
        let s = self.signal_mut(signal)?;
        s.state = state;
        s.in_state_secs = 0.0;
        Ok(())
    }

    fn set_signal_green_duration(&mut self, signal: SignalId, secs: f32) -> WorldResult<()> {
        self.signal_mut(signal)?.green_secs = secs.max(0.0);
        Ok(())
    }
}

impl Simulation for KinematicWorld {
    fn actors(&self) -> &ActorStore {
        &self.actors
    }

    fn map(&self) -> &LaneMap {
        &self.map
    }

    fn advance(&mut self, delta_secs: f32) {
        for i in 0..self.actors.count {
            self.step_actor(i, delta_secs);
        }
        self.update_contacts();
        self.update_lane_invasions();
        for s in &mut self.signals {
            s.step(delta_secs);
        }
    }
}
