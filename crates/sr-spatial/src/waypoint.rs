//! Lane-centre sample points.

use sr_core::{Location, Vector3, WaypointId};

/// A sample on a lane centreline.  Owned by a [`LaneMap`](crate::LaneMap);
/// copied freely by value.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub id:              WaypointId,
    pub location:        Location,
    /// Lane direction at this sample, degrees counter-clockwise from `+x`.
    pub yaw_deg:         f32,
    pub road_id:         u32,
    pub lane_id:         i32,
    /// `true` inside a junction.
    pub is_intersection: bool,
}

impl Waypoint {
    /// Unit vector along the lane direction.
    #[inline]
    pub fn forward(&self) -> Vector3 {
        Vector3::from_yaw(self.yaw_deg)
    }
}

/// Lane attributes shared by every waypoint of one lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneInfo {
    pub road_id:         u32,
    pub lane_id:         i32,
    pub is_intersection: bool,
}

impl LaneInfo {
    pub fn new(road_id: u32, lane_id: i32) -> Self {
        Self { road_id, lane_id, is_intersection: false }
    }

    /// The same lane, flagged as lying inside a junction.
    pub fn junction(self) -> Self {
        Self { is_intersection: true, ..self }
    }
}
