//! Unit tests for sr-spatial.
//!
//! Everything runs against hand-built lanes or the generated cross junction
//! (default params: 100 m arms, 10 m junction half-size, 1.75 m lane
//! offset, 1 m spacing).

#[cfg(test)]
mod helpers {
    use sr_core::Location;

    use crate::{cross_junction, CrossJunction, CrossJunctionParams, LaneInfo, LaneMap, LaneMapBuilder};

    pub fn junction() -> CrossJunction {
        cross_junction(CrossJunctionParams::default())
    }

    /// A straight 10 m eastbound lane that forks at x = 10 into a northeast
    /// and a southeast spur (5 m each).
    pub fn fork() -> LaneMap {
        let mut b = LaneMapBuilder::new();
        let trunk = b.add_lane(
            &[Location::xy(0.0, 0.0), Location::xy(10.0, 0.0)],
            1.0,
            LaneInfo::new(1, -1),
        );
        let up = b.add_lane(
            &[Location::xy(11.0, 1.0), Location::xy(14.0, 4.0)],
            1.0,
            LaneInfo::new(2, -1),
        );
        let down = b.add_lane(
            &[Location::xy(11.0, -1.0), Location::xy(14.0, -4.0)],
            1.0,
            LaneInfo::new(3, -1),
        );
        let end = *trunk.last().unwrap();
        b.link(end, up[0]);
        b.link(end, down[0]);
        b.build()
    }

    pub fn near(a: Location, b: Location, tol: f32) -> bool {
        a.distance(b) <= tol
    }
}

// ── Builder & map structure ────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sr_core::{Location, WaypointId};

    use super::helpers::{fork, near};
    use crate::{LaneInfo, LaneMap, LaneMapBuilder};

    #[test]
    fn empty_build() {
        let map = LaneMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.link_count(), 0);
        assert!(map.waypoint_at(Location::xy(0.0, 0.0)).is_none());
        assert!(map.next(WaypointId(0), 1.0).is_empty());
    }

    #[test]
    fn lane_is_densified_with_headings() {
        let mut b = LaneMapBuilder::new();
        let ids = b.add_lane(
            &[Location::xy(0.0, 0.0), Location::xy(0.0, 4.4)],
            1.0,
            LaneInfo::new(7, 1),
        );
        let map = b.build();
        // 0,1,2,3 then the end point replaces the sample at 4 (0.4 short).
        assert_eq!(ids.len(), 5);
        let last = map.waypoint(*ids.last().unwrap()).unwrap();
        assert!(near(last.location, Location::xy(0.0, 4.4), 1e-4));
        assert!((last.yaw_deg - 90.0).abs() < 1e-3);
        assert_eq!(last.road_id, 7);
        assert_eq!(map.out_degree(ids[0]), 1);
        assert_eq!(map.out_degree(*ids.last().unwrap()), 0);
    }

    #[test]
    fn connector_skips_shared_endpoints() {
        let mut b = LaneMapBuilder::new();
        let a = b.add_waypoint(Location::xy(0.0, 0.0), 0.0, LaneInfo::new(1, -1));
        let z = b.add_waypoint(Location::xy(5.0, 0.0), 0.0, LaneInfo::new(1, -1));
        let inner = b.add_connector(
            a,
            z,
            &[Location::xy(0.0, 0.0), Location::xy(5.0, 0.0)],
            1.0,
            LaneInfo::new(9, -1).junction(),
        );
        let map = b.build();
        assert_eq!(inner.len(), 4);
        assert!(inner.iter().all(|&id| map.waypoint(id).unwrap().is_intersection));
        assert_eq!(map.next(a, 5.0), vec![z]);
    }

    #[test]
    fn snapping_finds_nearest_waypoint() {
        let map = fork();
        let wp = map.waypoint_at(Location::xy(3.2, 0.4)).unwrap();
        assert!(near(wp.location, Location::xy(3.0, 0.0), 1e-4));
        let nearest = map.k_nearest(Location::xy(3.2, 0.4), 2);
        assert_eq!(nearest.len(), 2);
        assert!(near(nearest[1].location, Location::xy(4.0, 0.0), 1e-4));
    }
}

// ── next() and successor walks ─────────────────────────────────────────────────

#[cfg(test)]
mod walks {
    use sr_core::{Location, WaypointId};

    use super::helpers::{fork, near};
    use crate::{Step, StopReason};

    #[test]
    fn next_on_a_straight_lane() {
        let map = fork();
        assert_eq!(map.next(WaypointId(2), 1.0), vec![WaypointId(3)]);
        assert_eq!(map.next(WaypointId(2), 3.0), vec![WaypointId(5)]);
        assert_eq!(map.next(WaypointId(2), 0.0), vec![WaypointId(2)]);
    }

    #[test]
    fn next_reports_every_branch_and_lane_end() {
        let map = fork();
        let end = WaypointId(10);
        assert_eq!(map.next(end, 1.0).len(), 2);
        let spur_end = map.waypoint_at(Location::xy(14.0, 4.0)).unwrap().id;
        assert!(map.next(spur_end, 1.0).is_empty());
    }

    #[test]
    fn successors_stop_at_branch() {
        let map = fork();
        let mut walk = map.successors(WaypointId(5), 1.0);
        let got: Vec<_> = walk.by_ref().map(|w| w.id).collect();
        assert_eq!(got, (6..=10).map(WaypointId).collect::<Vec<_>>());
        assert_eq!(walk.stop_reason(), Some(StopReason::Branch));
        match walk.advance() {
            Step::Branch(candidates) => assert_eq!(candidates.len(), 2),
            other => panic!("expected branch, got {other:?}"),
        }
    }

    #[test]
    fn successors_stop_at_end_and_restart() {
        let map = fork();
        let start = map.waypoint_at(Location::xy(11.0, 1.0)).unwrap().id;
        let mut walk = map.successors(start, 1.0);
        let first: Vec<_> = walk.by_ref().map(|w| w.id).collect();
        assert!(!first.is_empty());
        assert_eq!(walk.stop_reason(), Some(StopReason::End));
        assert_eq!(walk.next(), None);

        walk.restart();
        assert_eq!(walk.stop_reason(), None);
        let again: Vec<_> = walk.map(|w| w.id).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn successor_step_larger_than_spacing() {
        let map = fork();
        let got: Vec<_> = map.successors(WaypointId(0), 4.0).map(|w| w.location).collect();
        assert_eq!(got.len(), 2);
        assert!(near(got[0], Location::xy(4.0, 0.0), 1e-3));
        assert!(near(got[1], Location::xy(8.0, 0.0), 1e-3));
    }
}

// ── Plans ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plans {
    use sr_core::RoadOption;

    use super::helpers::junction;
    use crate::{plan_until_branch, ArmSide};

    #[test]
    fn plan_runs_to_lane_end() {
        let j = junction();
        let departure = &j.arm(ArmSide::South).departure;
        // 91 waypoints: one 1 m hop, then 5 m hops while the lane continues.
        let plan = plan_until_branch(&j.map, departure[0], 1.0, 5.0);
        assert_eq!(plan.len(), 18);
        assert!(plan.iter().all(|e| e.option == RoadOption::LaneFollow));
        assert!((plan.length_m() - 85.0).abs() < 0.05);
    }

    #[test]
    fn plan_stops_before_junction() {
        let j = junction();
        let approach = &j.arm(ArmSide::South).approach;
        let plan = plan_until_branch(&j.map, approach[70], 1.0, 1.0);
        assert_eq!(plan.len(), 20);
        assert!(plan.iter().all(|e| !e.waypoint.is_intersection));
    }
}

// ── Junction geometry ──────────────────────────────────────────────────────────

#[cfg(test)]
mod geometry {
    use sr_core::{Location, RoadOption};

    use super::helpers::{junction, near};
    use crate::query::{
        choose_at_junction, distance_to_next_intersection, intersection_point,
        last_waypoint_before_intersection, location_in_distance, target_waypoint,
    };
    use crate::{ArmSide, SpatialError};

    #[test]
    fn arms_are_rotations() {
        let j = junction();
        assert_eq!(ArmSide::West.approach_yaw_deg(), 0.0);
        assert_eq!(ArmSide::South.right_of(), ArmSide::East);
        assert_eq!(ArmSide::South.left_of(), ArmSide::West);
        assert!(near(j.approach_point(ArmSide::West, 40.0), Location::xy(-50.0, -1.75), 1e-4));
        let entry = j.map.waypoint_at(j.stop_line(ArmSide::West)).unwrap();
        assert!((entry.yaw_deg - 0.0).abs() < 1e-3);
        assert_eq!(j.map.out_degree(entry.id), 3);
    }

    #[test]
    fn location_in_distance_walks_the_lane() {
        let j = junction();
        let (loc, travelled) = location_in_distance(&j.map, Location::xy(1.75, -50.0), 10.0).unwrap();
        assert!(near(loc, Location::xy(1.75, -40.0), 1e-3));
        assert!((travelled - 10.0).abs() < 1e-3);
    }

    #[test]
    fn location_in_distance_stops_inside_junction() {
        let j = junction();
        let (loc, travelled) = location_in_distance(&j.map, Location::xy(1.75, -50.0), 100.0).unwrap();
        assert!((travelled - 41.0).abs() < 0.1, "travelled {travelled}");
        assert!(j.map.waypoint_at(loc).unwrap().is_intersection);
    }

    #[test]
    fn distance_to_junction() {
        let j = junction();
        let d = distance_to_next_intersection(&j.map, Location::xy(1.75, -50.0)).unwrap();
        assert!((d - 41.0).abs() < 0.2, "got {d}");
        let inside = distance_to_next_intersection(&j.map, Location::xy(1.75, 0.0)).unwrap();
        assert!(inside < 0.1);
    }

    #[test]
    fn crossing_point_of_perpendicular_paths() {
        let j = junction();
        let ego = j.approach_point(ArmSide::West, 40.0);
        let other = j.approach_point(ArmSide::South, 40.0);
        let p = intersection_point(&j.map, ego, other).unwrap();
        assert!(near(p, Location::xy(1.75, -1.75), 0.5), "got {p}");
    }

    #[test]
    fn signal_search_point() {
        let j = junction();
        let wp = last_waypoint_before_intersection(&j.map, Location::xy(1.75, -50.0)).unwrap();
        assert!(near(wp.location, Location::xy(1.75, -10.0), 1e-3));
        assert!(last_waypoint_before_intersection(&j.map, Location::xy(1.75, 0.0)).is_none());
    }

    #[test]
    fn junction_choice_by_direction() {
        let j = junction();
        let arm = j.arm(ArmSide::South);
        let entry = j.map.waypoint(*arm.approach.last().unwrap()).unwrap();
        let candidates = j.map.next(entry.id, 1.0);
        assert_eq!(candidates.len(), 3);

        let left = choose_at_junction(&j.map, entry, &candidates, RoadOption::Left).unwrap();
        let straight = choose_at_junction(&j.map, entry, &candidates, RoadOption::Straight).unwrap();
        let right = choose_at_junction(&j.map, entry, &candidates, RoadOption::Right).unwrap();
        assert_eq!(left, arm.connectors[0][0]);
        assert_eq!(straight, arm.connectors[1][0]);
        assert_eq!(right, arm.connectors[2][0]);
    }

    #[test]
    fn target_waypoint_after_turns() {
        let j = junction();
        let start = j.arm(ArmSide::South).approach[50];

        let right = j.map.waypoint(target_waypoint(&j.map, start, RoadOption::Right).unwrap()).unwrap();
        assert_eq!((right.road_id, right.lane_id), (2, 1));
        assert!(!right.is_intersection);
        assert!((right.location.y + 1.75).abs() < 1e-3);

        let straight = j.map.waypoint(target_waypoint(&j.map, start, RoadOption::Straight).unwrap()).unwrap();
        assert_eq!((straight.road_id, straight.lane_id), (3, 1));

        let left = j.map.waypoint(target_waypoint(&j.map, start, RoadOption::Left).unwrap()).unwrap();
        assert_eq!((left.road_id, left.lane_id), (4, 1));
    }

    #[test]
    fn target_waypoint_without_junction_errors() {
        let j = junction();
        let start = j.arm(ArmSide::South).departure[0];
        assert!(matches!(
            target_waypoint(&j.map, start, RoadOption::Right),
            Err(SpatialError::NoJunctionAhead { .. })
        ));
    }
}
