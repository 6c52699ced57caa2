//! The spatial query adapter.
//!
//! Behaviors and criteria never touch the simulation directly.  They ask a
//! [`SpatialQuery`] for actor pose and for lane-map geometry.  The trait
//! needs only the two accessors; every query has a default built on the
//! actor snapshot and the lane map, which a bridge to a live simulator can
//! override with native calls.
//!
//! Unknown actors have no location and zero speed.  Queries depending on a
//! location return `None` for them instead of failing.

use sr_core::{ActorId, Location, Vector3, WaypointId};
use sr_spatial::query as lanes;
use sr_spatial::{LaneMap, Successors, Waypoint};

use crate::store::ActorStore;

pub trait SpatialQuery {
    fn actors(&self) -> &ActorStore;
    fn map(&self) -> &LaneMap;

    // ── Actor state ───────────────────────────────────────────────────────

    fn location(&self, actor: ActorId) -> Option<Location> {
        self.actors().location(actor)
    }

    fn yaw_deg(&self, actor: ActorId) -> Option<f32> {
        self.actors().yaw_deg(actor)
    }

    fn speed(&self, actor: ActorId) -> f32 {
        self.actors().speed(actor)
    }

    fn velocity(&self, actor: ActorId) -> Vector3 {
        self.actors().velocity(actor)
    }

    fn collision_count(&self, actor: ActorId) -> u32 {
        self.actors().collisions(actor)
    }

    fn lane_invasion_count(&self, actor: ActorId) -> u32 {
        self.actors().lane_invasions(actor)
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    /// Straight-line distance from `actor` to `location`.
    fn distance(&self, actor: ActorId, location: Location) -> Option<f32> {
        self.location(actor).map(|l| l.distance(location))
    }

    /// Distance to the next junction along `actor`'s lane.
    fn next_intersection_distance(&self, actor: ActorId) -> Option<f32> {
        lanes::distance_to_next_intersection(self.map(), self.location(actor)?)
    }

    /// Where `a`'s lane passes closest to `b`'s position.
    fn intersection_point(&self, a: ActorId, b: ActorId) -> Option<Location> {
        lanes::intersection_point(self.map(), self.location(a)?, self.location(b)?)
    }

    fn waypoint_at(&self, location: Location) -> Option<&Waypoint> {
        self.map().waypoint_at(location)
    }

    fn successors(&self, from: WaypointId, step: f32) -> Successors<'_> {
        self.map().successors(from, step)
    }

    /// Location `distance` metres ahead on `actor`'s lane (stopping at a
    /// junction), with the distance actually covered.
    fn location_in_distance(&self, actor: ActorId, distance: f32) -> Option<(Location, f32)> {
        lanes::location_in_distance(self.map(), self.location(actor)?, distance)
    }
}

/// The standard adapter: an actor snapshot plus a lane map.
#[derive(Clone, Copy)]
pub struct WorldView<'a> {
    actors: &'a ActorStore,
    map:    &'a LaneMap,
}

impl<'a> WorldView<'a> {
    pub fn new(actors: &'a ActorStore, map: &'a LaneMap) -> Self {
        Self { actors, map }
    }
}

impl SpatialQuery for WorldView<'_> {
    fn actors(&self) -> &ActorStore {
        self.actors
    }

    fn map(&self) -> &LaneMap {
        self.map
    }
}
