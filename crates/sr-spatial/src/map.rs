//! Lane map representation and builder.
//!
//! # Data layout
//!
//! Waypoints are lane-centre samples.  Directed successor links use
//! **Compressed Sparse Row (CSR)** format: the links leaving waypoint `w`
//! occupy
//!
//! ```text
//! link_to[ succ_start[w] .. succ_start[w+1] ]
//! ```
//!
//! with the matching lengths in `link_length_m`.  A waypoint with more than
//! one successor is a branch point (junction entry); one with none is the
//! end of a lane.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(x, y)` to the nearest waypoint.  Used to
//! resolve actor locations to lanes.

use std::collections::VecDeque;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use sr_core::{Location, WaypointId};

use crate::successors::Successors;
use crate::waypoint::{LaneInfo, Waypoint};

/// Links shorter than this are stretched to it so every walk makes progress.
const MIN_LINK_LENGTH_M: f32 = 1e-3;

/// Slack when comparing accumulated walk length against a requested step.
const STEP_TOLERANCE_M: f32 = 0.01;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct WaypointEntry {
    point: [f32; 2], // [x, y]
    id:    WaypointId,
}

impl RTreeObject for WaypointEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for WaypointEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── LaneMap ───────────────────────────────────────────────────────────────────

/// Directed waypoint graph in CSR format plus a spatial index.
///
/// Do not construct directly; use [`LaneMapBuilder`].
pub struct LaneMap {
    /// Indexed by `WaypointId`.
    pub waypoints: Vec<Waypoint>,

    /// CSR row pointer.  Length = `waypoint_count + 1`.
    pub succ_start: Vec<u32>,

    /// Destination of each link, sorted by source waypoint.
    pub link_to: Vec<WaypointId>,

    /// Path length of each link in metres.
    pub link_length_m: Vec<f32>,

    spatial_idx: RTree<WaypointEntry>,
}

impl LaneMap {
    /// A map with no waypoints.  Every query on it returns `None`/empty.
    pub fn empty() -> Self {
        LaneMapBuilder::new().build()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.waypoints.get(id.index())
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Direct successors of `id` with the link length to each.
    #[inline]
    pub fn links(&self, id: WaypointId) -> impl Iterator<Item = (WaypointId, f32)> + '_ {
        let (start, end) = self.link_range(id);
        (start..end).map(|i| (self.link_to[i], self.link_length_m[i]))
    }

    #[inline]
    pub fn out_degree(&self, id: WaypointId) -> usize {
        let (start, end) = self.link_range(id);
        end - start
    }

    fn link_range(&self, id: WaypointId) -> (usize, usize) {
        match (self.succ_start.get(id.index()), self.succ_start.get(id.index() + 1)) {
            (Some(&s), Some(&e)) => (s as usize, e as usize),
            _ => (0, 0),
        }
    }

    /// Waypoints reached by walking at least `distance` metres forward from
    /// `from` along every link chain.
    ///
    /// More than one result means the walk crossed a branch point; an empty
    /// result means every lane ended first.  Results come back in link
    /// order without duplicates.  `distance <= 0` returns `from` itself.
    pub fn next(&self, from: WaypointId, distance: f32) -> Vec<WaypointId> {
        if self.waypoint(from).is_none() {
            return Vec::new();
        }
        if distance <= 0.0 {
            return vec![from];
        }

        let mut found = Vec::new();
        let mut frontier = VecDeque::from([(from, 0.0_f32)]);
        while let Some((wp, travelled)) = frontier.pop_front() {
            for (to, length) in self.links(wp) {
                let reach = travelled + length;
                if reach >= distance - STEP_TOLERANCE_M {
                    if !found.contains(&to) {
                        found.push(to);
                    }
                } else {
                    frontier.push_back((to, reach));
                }
            }
        }
        found
    }

    /// Lazy walk forward from `from` in `step`-metre increments.  See
    /// [`Successors`] for the branch/end contract.
    pub fn successors(&self, from: WaypointId, step: f32) -> Successors<'_> {
        Successors::new(self, from, step)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The waypoint nearest to `location` (ground plane).  `None` only for
    /// an empty map.
    pub fn waypoint_at(&self, location: Location) -> Option<&Waypoint> {
        self.spatial_idx
            .nearest_neighbor(&[location.x, location.y])
            .and_then(|e| self.waypoint(e.id))
    }

    /// Up to `k` nearest waypoints, sorted by ascending distance.
    pub fn k_nearest(&self, location: Location, k: usize) -> Vec<&Waypoint> {
        self.spatial_idx
            .nearest_neighbor_iter(&[location.x, location.y])
            .take(k)
            .filter_map(|e| self.waypoint(e.id))
            .collect()
    }
}

// ── LaneMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`LaneMap`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sr_core::Location;
/// use sr_spatial::{LaneInfo, LaneMapBuilder};
///
/// let mut b = LaneMapBuilder::new();
/// let lane = b.add_lane(
///     &[Location::xy(0.0, 0.0), Location::xy(10.0, 0.0)],
///     1.0,
///     LaneInfo::new(1, -1),
/// );
/// let map = b.build();
/// assert_eq!(lane.len(), 11);
/// assert_eq!(map.link_count(), 10);
/// ```
pub struct LaneMapBuilder {
    waypoints: Vec<Waypoint>,
    raw_links: Vec<RawLink>,
}

struct RawLink {
    from:     WaypointId,
    to:       WaypointId,
    length_m: f32,
}

impl LaneMapBuilder {
    pub fn new() -> Self {
        Self { waypoints: Vec::new(), raw_links: Vec::new() }
    }

    pub fn with_capacity(waypoints: usize, links: usize) -> Self {
        Self {
            waypoints: Vec::with_capacity(waypoints),
            raw_links: Vec::with_capacity(links),
        }
    }

    /// Add one waypoint and return its id (sequential from 0).
    pub fn add_waypoint(&mut self, location: Location, yaw_deg: f32, lane: LaneInfo) -> WaypointId {
        let id = WaypointId(self.waypoints.len() as u32);
        self.waypoints.push(Waypoint {
            id,
            location,
            yaw_deg,
            road_id: lane.road_id,
            lane_id: lane.lane_id,
            is_intersection: lane.is_intersection,
        });
        id
    }

    /// Directed link whose length is the straight-line distance between the
    /// two waypoints.  Unknown ids are ignored.
    pub fn link(&mut self, from: WaypointId, to: WaypointId) {
        let (Some(a), Some(b)) = (self.location(from), self.location(to)) else {
            return;
        };
        self.link_with_length(from, to, a.distance(b));
    }

    pub fn link_with_length(&mut self, from: WaypointId, to: WaypointId, length_m: f32) {
        self.raw_links.push(RawLink {
            from,
            to,
            length_m: length_m.max(MIN_LINK_LENGTH_M),
        });
    }

    /// Densify the polyline `points` into waypoints `spacing` metres apart
    /// (first and last point included) and chain them.  Each waypoint takes
    /// the heading of the segment it lies on.
    pub fn add_lane(&mut self, points: &[Location], spacing: f32, lane: LaneInfo) -> Vec<WaypointId> {
        let ids: Vec<WaypointId> = densify(points, spacing)
            .into_iter()
            .map(|(loc, yaw)| self.add_waypoint(loc, yaw, lane))
            .collect();
        for pair in ids.windows(2) {
            self.link(pair[0], pair[1]);
        }
        ids
    }

    /// Connect two existing waypoints through the interior of `points`.
    /// The polyline's end points are expected to coincide with `from` and
    /// `to`; they are not duplicated.
    pub fn add_connector(
        &mut self,
        from:    WaypointId,
        to:      WaypointId,
        points:  &[Location],
        spacing: f32,
        lane:    LaneInfo,
    ) -> Vec<WaypointId> {
        let samples = densify(points, spacing);
        let interior = if samples.len() > 2 { &samples[1..samples.len() - 1] } else { &[][..] };
        let ids: Vec<WaypointId> = interior
            .iter()
            .map(|&(loc, yaw)| self.add_waypoint(loc, yaw, lane))
            .collect();

        let mut prev = from;
        for &id in &ids {
            self.link(prev, id);
            prev = id;
        }
        self.link(prev, to);
        ids
    }

    pub fn location(&self, id: WaypointId) -> Option<Location> {
        self.waypoints.get(id.index()).map(|w| w.location)
    }

    pub fn waypoint_count(&self) -> usize { self.waypoints.len() }
    pub fn link_count(&self) -> usize { self.raw_links.len() }

    /// Consume the builder and produce a [`LaneMap`].
    pub fn build(self) -> LaneMap {
        let count = self.waypoints.len();

        // Stable sort keeps links of one waypoint in insertion order.
        let mut raw = self.raw_links;
        raw.retain(|l| l.from.index() < count && l.to.index() < count);
        raw.sort_by_key(|l| l.from.0);

        let link_to:       Vec<WaypointId> = raw.iter().map(|l| l.to).collect();
        let link_length_m: Vec<f32>        = raw.iter().map(|l| l.length_m).collect();

        let mut succ_start = vec![0u32; count + 1];
        for l in &raw {
            succ_start[l.from.index() + 1] += 1;
        }
        for i in 1..=count {
            succ_start[i] += succ_start[i - 1];
        }
        debug_assert_eq!(succ_start[count] as usize, link_to.len());

        let entries: Vec<WaypointEntry> = self
            .waypoints
            .iter()
            .map(|w| WaypointEntry { point: [w.location.x, w.location.y], id: w.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        LaneMap {
            waypoints: self.waypoints,
            succ_start,
            link_to,
            link_length_m,
            spatial_idx,
        }
    }
}

impl Default for LaneMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample `points` every `spacing` metres of path length, returning each
/// sample with the heading of its segment.  The final point is always
/// included; a trailing sample closer than half a spacing is replaced by it.
fn densify(points: &[Location], spacing: f32) -> Vec<(Location, f32)> {
    let spacing = spacing.max(MIN_LINK_LENGTH_M);
    let mut out: Vec<(Location, f32)> = Vec::new();
    let Some(&last) = points.last() else {
        return out;
    };
    if points.len() == 1 {
        out.push((last, 0.0));
        return out;
    }

    let mut next_at = 0.0_f32;
    let mut last_yaw = 0.0_f32;
    for seg in points.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }
        let yaw = a.yaw_to(b);
        last_yaw = yaw;
        while next_at <= len + STEP_TOLERANCE_M {
            out.push((a.lerp(b, (next_at / len).min(1.0)), yaw));
            next_at += spacing;
        }
        next_at -= len;
    }

    match out.last() {
        Some(&(p, _)) if p.distance(last) <= STEP_TOLERANCE_M => {}
        Some(&(p, _)) => {
            if p.distance(last) < 0.5 * spacing && out.len() > 1 {
                out.pop();
            }
            out.push((last, last_yaw));
        }
        None => out.push((last, last_yaw)),
    }
    out
}
