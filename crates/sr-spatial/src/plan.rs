//! Trajectory plans: ordered waypoints a follower steers through.

use sr_core::{Location, RoadOption, WaypointId};

use crate::map::LaneMap;
use crate::successors::Step;
use crate::waypoint::Waypoint;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanEntry {
    pub waypoint: Waypoint,
    pub option:   RoadOption,
}

/// Built once before a run and never mutated; followers consume their own
/// copy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPlan {
    entries: Vec<PlanEntry>,
}

impl TrajectoryPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanEntry> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&PlanEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&PlanEntry> {
        self.entries.last()
    }

    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.entries.iter().map(|e| e.waypoint.location)
    }

    /// Polyline length through all entries.
    pub fn length_m(&self) -> f32 {
        self.entries
            .windows(2)
            .map(|w| w[0].waypoint.location.distance(w[1].waypoint.location))
            .sum()
    }
}

impl FromIterator<PlanEntry> for TrajectoryPlan {
    fn from_iter<I: IntoIterator<Item = PlanEntry>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a TrajectoryPlan {
    type Item = &'a PlanEntry;
    type IntoIter = std::slice::Iter<'a, PlanEntry>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lane-follow plan from `start`: one `first_step` hop, then `step` hops,
/// for as long as the lane offers exactly one way forward.  `start` itself
/// is not included.
pub fn plan_until_branch(map: &LaneMap, start: WaypointId, first_step: f32, step: f32) -> TrajectoryPlan {
    let mut entries = Vec::new();
    let mut walk = map.successors(start, first_step);
    let Step::Next(first) = walk.advance() else {
        return TrajectoryPlan::default();
    };
    entries.push(PlanEntry { waypoint: *first, option: RoadOption::LaneFollow });

    entries.extend(
        map.successors(first.id, step)
            .map(|wp| PlanEntry { waypoint: *wp, option: RoadOption::LaneFollow }),
    );
    TrajectoryPlan::new(entries)
}
