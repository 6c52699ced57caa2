//! Junction geometry computed by walking the lane map.
//!
//! These are the building blocks scenarios use at construction time (where
//! is the crossing point of two actors' paths, which waypoint lies past the
//! next right turn) and triggers use every tick (how far is the next
//! junction).  All walks are bounded by the map's waypoint count.

use sr_core::{Location, RoadOption, WaypointId};

use crate::error::{SpatialError, SpatialResult};
use crate::map::LaneMap;
use crate::waypoint::Waypoint;

/// Step used when walking toward junctions.
const WALK_STEP_M: f32 = 1.0;

/// Step used when searching for the waypoint before a junction.
const SIGNAL_SEARCH_STEP_M: f32 = 2.0;

/// How far into each branch to look when classifying it as left/right.
const JUNCTION_LOOKAHEAD_M: f32 = 10.0;

/// Slack when deciding a walk has covered the requested distance.
const DISTANCE_TOLERANCE_M: f32 = 0.01;

/// Consecutive segments closer than this are considered straight.
const STRAIGHT_THRESHOLD_DEG: f32 = 0.1;

/// Walk `distance` metres forward from the lane at `from`, stopping early at
/// the first intersection waypoint.  Returns the location reached and the
/// distance actually travelled.
pub fn location_in_distance(map: &LaneMap, from: Location, distance: f32) -> Option<(Location, f32)> {
    let mut wp = map.waypoint_at(from)?;
    let mut travelled = 0.0_f32;
    for _ in 0..map.waypoint_count() {
        if wp.is_intersection || travelled + DISTANCE_TOLERANCE_M >= distance {
            break;
        }
        let Some(next) = map.next(wp.id, WALK_STEP_M).last().and_then(|&id| map.waypoint(id)) else {
            break;
        };
        travelled += next.location.distance(wp.location);
        wp = next;
    }
    Some((wp.location, travelled))
}

/// First intersection waypoint on the lane ahead of `from` (the waypoint
/// itself if already inside a junction).
pub fn next_intersection(map: &LaneMap, from: Location) -> Option<&Waypoint> {
    let mut wp = map.waypoint_at(from)?;
    for _ in 0..map.waypoint_count() {
        if wp.is_intersection {
            return Some(wp);
        }
        let &id = map.next(wp.id, WALK_STEP_M).last()?;
        wp = map.waypoint(id)?;
    }
    None
}

/// Straight-line distance from `from` to the next intersection waypoint.
/// `None` when the lane ends without reaching a junction.
pub fn distance_to_next_intersection(map: &LaneMap, from: Location) -> Option<f32> {
    next_intersection(map, from).map(|wp| from.distance(wp.location))
}

/// The last waypoint before the lane at `from` enters a junction.  `None`
/// if `from` is already inside one or the lane never reaches one.
pub fn last_waypoint_before_intersection(map: &LaneMap, from: Location) -> Option<&Waypoint> {
    let mut wp = map.waypoint_at(from)?;
    if wp.is_intersection {
        return None;
    }
    for _ in 0..map.waypoint_count() {
        let &id = map.next(wp.id, SIGNAL_SEARCH_STEP_M).first()?;
        let next = map.waypoint(id)?;
        if next.is_intersection {
            return Some(wp);
        }
        wp = next;
    }
    None
}

/// Candidate most aligned with `current`'s heading.
pub fn straightest(map: &LaneMap, current: &Waypoint, candidates: &[WaypointId]) -> Option<WaypointId> {
    let heading = current.forward();
    candidates
        .iter()
        .filter_map(|&id| map.waypoint(id))
        .map(|wp| (wp.id, heading.dot(wp.location - current.location)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Pick the branch matching `option` at a junction entry.
///
/// Each candidate is classified by the cross product of the current heading
/// with the vector to a point [`JUNCTION_LOOKAHEAD_M`] into the branch:
/// `Left` takes the most counter-clockwise, `Right` the most clockwise, any
/// other option the one closest to straight ahead.
pub fn choose_at_junction(
    map:        &LaneMap,
    current:    &Waypoint,
    candidates: &[WaypointId],
    option:     RoadOption,
) -> Option<WaypointId> {
    let heading = current.forward();
    let scored = candidates.iter().filter_map(|&id| {
        let ahead = map
            .next(id, JUNCTION_LOOKAHEAD_M)
            .first()
            .and_then(|&a| map.waypoint(a))
            .or_else(|| map.waypoint(id))?;
        Some((id, heading.cross_z(ahead.location - current.location)))
    });

    let picked = match option {
        RoadOption::Left => scored.max_by(|a, b| a.1.total_cmp(&b.1)),
        RoadOption::Right => scored.min_by(|a, b| a.1.total_cmp(&b.1)),
        _ => scored.min_by(|a, b| a.1.abs().total_cmp(&b.1.abs())),
    };
    picked.map(|(id, _)| id)
}

/// Where the lane of `a` passes closest to the lane position of `b`.
///
/// Walks forward from `a`'s waypoint, taking the straightest branch at
/// junctions, for as long as the distance to `b`'s waypoint does not grow.
pub fn intersection_point(map: &LaneMap, a: Location, b: Location) -> Option<Location> {
    let mut wp = map.waypoint_at(a)?;
    let other = map.waypoint_at(b)?.location;

    let mut best_location = wp.location;
    let mut best_distance = wp.location.distance(other);
    for _ in 0..map.waypoint_count() {
        let choices = map.next(wp.id, WALK_STEP_M);
        let next_id = match choices.as_slice() {
            [] => break,
            [only] => *only,
            many => match straightest(map, wp, many) {
                Some(id) => id,
                None => break,
            },
        };
        let Some(next) = map.waypoint(next_id) else { break };
        let d = next.location.distance(other);
        if d > best_distance {
            break;
        }
        wp = next;
        best_distance = d;
        best_location = next.location;
    }
    Some(best_location)
}

/// Waypoint just past the next junction when taking `option` there.
///
/// For turns the walk ends once three consecutive waypoints are collinear
/// again (the vehicle has straightened out); otherwise it ends at the first
/// waypoint outside the junction.
pub fn target_waypoint(map: &LaneMap, from: WaypointId, option: RoadOption) -> SpatialResult<WaypointId> {
    let mut wp = map.waypoint(from).ok_or(SpatialError::WaypointNotFound(from))?;
    let mut reached_junction = false;
    let mut trail: Vec<Location> = Vec::new();

    for _ in 0..map.waypoint_count() {
        let choices = map.next(wp.id, WALK_STEP_M);
        let next_id = match choices.as_slice() {
            [] => break,
            [only] => *only,
            many => {
                reached_junction = true;
                choose_at_junction(map, wp, many, option).ok_or(SpatialError::NoJunctionAhead { from })?
            }
        };
        wp = map.waypoint(next_id).ok_or(SpatialError::WaypointNotFound(next_id))?;
        trail.push(wp.location);

        if !reached_junction {
            continue;
        }
        if option.is_turn() {
            if let [.., p0, p1, p2] = trail.as_slice() {
                if (*p1 - *p0).angle_deg(*p2 - *p1) < STRAIGHT_THRESHOLD_DEG {
                    return Ok(wp.id);
                }
            }
        } else if !wp.is_intersection {
            return Ok(wp.id);
        }
    }
    Err(SpatialError::NoJunctionAhead { from })
}
