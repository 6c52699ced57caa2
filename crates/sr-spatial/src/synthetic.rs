//! Generated maps for tests and demos.
//!
//! [`cross_junction`] builds a right-hand-traffic four-arm junction centred
//! on the origin.  Every arm has an approach lane toward the junction and a
//! departure lane away from it; each approach connects to the three other
//! arms through left, straight and right connector lanes flagged as
//! intersection.  The south arm is built first and the others are exact
//! quarter-turn rotations of it.
//!
//! ```text
//!                  N
//!              |  ^ |
//!              |  | |
//!       -------+    +-------
//!     W  <---             ---> E   (eastbound lane at y = -lane_offset)
//!       -------+    +-------
//!              | |  |
//!              | v  |
//!                  S              (northbound lane at x = +lane_offset)
//! ```

use sr_core::{Location, WaypointId};

use crate::map::{LaneMap, LaneMapBuilder};
use crate::waypoint::LaneInfo;

/// Segments per quarter-circle connector.
const ARC_SEGMENTS: usize = 24;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArmSide {
    South,
    East,
    North,
    West,
}

impl ArmSide {
    pub const ALL: [ArmSide; 4] = [ArmSide::South, ArmSide::East, ArmSide::North, ArmSide::West];

    /// Counter-clockwise quarter turns from the south arm.
    fn quarter_turns(self) -> usize {
        match self {
            ArmSide::South => 0,
            ArmSide::East  => 1,
            ArmSide::North => 2,
            ArmSide::West  => 3,
        }
    }

    fn from_quarter_turns(k: usize) -> ArmSide {
        ArmSide::ALL[k % 4]
    }

    /// Heading of traffic on this arm's approach lane.
    pub fn approach_yaw_deg(self) -> f32 {
        let yaw = 90.0 + 90.0 * self.quarter_turns() as f32;
        sr_core::normalize_angle_deg(yaw)
    }

    /// Arm reached by turning right from this arm's approach.
    pub fn right_of(self) -> ArmSide {
        Self::from_quarter_turns(self.quarter_turns() + 1)
    }

    pub fn opposite(self) -> ArmSide {
        Self::from_quarter_turns(self.quarter_turns() + 2)
    }

    pub fn left_of(self) -> ArmSide {
        Self::from_quarter_turns(self.quarter_turns() + 3)
    }
}

#[derive(Clone, Debug)]
pub struct CrossJunctionParams {
    /// Distance from the junction centre to the far end of each arm.
    pub arm_length_m: f32,
    /// Half the side of the square junction box.
    pub half_size_m: f32,
    /// Lateral offset of each lane centre from the road axis.
    pub lane_offset_m: f32,
    pub spacing_m: f32,
}

impl Default for CrossJunctionParams {
    fn default() -> Self {
        Self {
            arm_length_m:  100.0,
            half_size_m:   10.0,
            lane_offset_m: 1.75,
            spacing_m:     1.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ArmLanes {
    pub approach:  Vec<WaypointId>,
    pub departure: Vec<WaypointId>,
    /// Connector lanes leaving this arm's approach: `[left, straight, right]`.
    pub connectors: [Vec<WaypointId>; 3],
}

pub struct CrossJunction {
    pub map:    LaneMap,
    pub params: CrossJunctionParams,
    arms:       [ArmLanes; 4],
}

impl CrossJunction {
    pub fn arm(&self, side: ArmSide) -> &ArmLanes {
        &self.arms[side.quarter_turns()]
    }

    /// A point on `side`'s approach lane, `before_junction` metres short of
    /// the junction box.
    pub fn approach_point(&self, side: ArmSide, before_junction: f32) -> Location {
        let p = &self.params;
        rotate(Location::xy(p.lane_offset_m, -p.half_size_m - before_junction), side.quarter_turns())
    }

    /// Where `side`'s approach lane meets the junction box.
    pub fn stop_line(&self, side: ArmSide) -> Location {
        self.approach_point(side, 0.0)
    }

    /// Kerb-side position for a signal controlling `side`'s approach.
    pub fn signal_position(&self, side: ArmSide) -> Location {
        let p = &self.params;
        rotate(Location::xy(2.0 * p.lane_offset_m + 1.0, -p.half_size_m - 1.0), side.quarter_turns())
    }
}

/// Build the junction described by `params`.
pub fn cross_junction(params: CrossJunctionParams) -> CrossJunction {
    let l = params.arm_length_m;
    let j = params.half_size_m;
    let w = params.lane_offset_m;
    let spacing = params.spacing_m;

    let mut b = LaneMapBuilder::new();
    let mut arms: [ArmLanes; 4] = Default::default();

    for (k, arm) in arms.iter_mut().enumerate() {
        let road = k as u32 + 1;
        arm.approach = b.add_lane(
            &[rotate(Location::xy(w, -l), k), rotate(Location::xy(w, -j), k)],
            spacing,
            LaneInfo::new(road, -1),
        );
        arm.departure = b.add_lane(
            &[rotate(Location::xy(-w, -j), k), rotate(Location::xy(-w, -l), k)],
            spacing,
            LaneInfo::new(road, 1),
        );
    }

    // Canonical connector shapes leaving the south approach at (w, -j).
    let left = arc(Location::xy(-j, -j), j + w, 0.0, 90.0);
    let straight = vec![Location::xy(w, -j), Location::xy(w, j)];
    let right = arc(Location::xy(j, -j), j - w, 180.0, 90.0);
    let shapes = [(left, 3), (straight, 2), (right, 1)];

    for k in 0..4 {
        let Some(&from) = arms[k].approach.last() else { continue };
        for (slot, (shape, turns)) in shapes.iter().enumerate() {
            let target_arm = (k + turns) % 4;
            let Some(&to) = arms[target_arm].departure.first() else { continue };
            let points: Vec<Location> = shape.iter().map(|&p| rotate(p, k)).collect();
            let lane = LaneInfo::new(100 + 10 * k as u32 + slot as u32, -1).junction();
            arms[k].connectors[slot] = b.add_connector(from, to, &points, spacing, lane);
        }
    }

    CrossJunction { map: b.build(), params, arms }
}

/// Rotate `p` about the origin by `k` counter-clockwise quarter turns.
fn rotate(p: Location, k: usize) -> Location {
    match k % 4 {
        0 => p,
        1 => Location::new(-p.y, p.x, p.z),
        2 => Location::new(-p.x, -p.y, p.z),
        _ => Location::new(p.y, -p.x, p.z),
    }
}

/// Polyline approximating a circular arc from `from_deg` to `to_deg`.
fn arc(center: Location, radius: f32, from_deg: f32, to_deg: f32) -> Vec<Location> {
    (0..=ARC_SEGMENTS)
        .map(|i| {
            let t = i as f32 / ARC_SEGMENTS as f32;
            let a = (from_deg + (to_deg - from_deg) * t).to_radians();
            Location::xy(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}
