//! Unit tests for sr-behavior.
//!
//! Behaviors are ticked against hand-filled actor stores; a test "moves"
//! an actor by building the next tick's store itself.

#[cfg(test)]
mod helpers {
    use std::cell::Cell;
    use std::rc::Rc;

    use sr_core::{Location, Tick};
    use sr_world::{ActorRole, ActorSpawn, ActorStore, ActorStoreBuilder, Command, SpatialQuery, TickContext};

    use crate::{Behavior, Status};

    pub const DT: f32 = 0.05;

    /// `(location, yaw_deg, speed)` per actor.
    pub fn store(actors: &[(Location, f32, f32)]) -> ActorStore {
        ActorStoreBuilder::from_spawns(
            actors
                .iter()
                .map(|&(loc, yaw, speed)| ActorSpawn::new(ActorRole::Other, loc, yaw).with_speed(speed)),
        )
        .build()
    }

    pub fn ctx(tick: u64, world: &dyn SpatialQuery) -> TickContext<'_> {
        TickContext::new(Tick(tick), DT, tick as f64 * DT as f64, world)
    }

    /// Plays back a fixed status script (repeating the last entry) and
    /// counts its calls.
    pub struct Scripted {
        pub script: Vec<Status>,
        pub inits:  Rc<Cell<u32>>,
        pub ticks:  Rc<Cell<u32>>,
    }

    impl Scripted {
        pub fn new(script: &[Status]) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>) {
            let inits = Rc::new(Cell::new(0));
            let ticks = Rc::new(Cell::new(0));
            let s = Self { script: script.to_vec(), inits: inits.clone(), ticks: ticks.clone() };
            (s, inits, ticks)
        }
    }

    impl Behavior for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn initialise(&mut self, _ctx: &TickContext<'_>) {
            self.inits.set(self.inits.get() + 1);
        }

        fn update(&mut self, _ctx: &TickContext<'_>, _commands: &mut Vec<Command>) -> Status {
            let i = (self.ticks.get() as usize).min(self.script.len() - 1);
            self.ticks.set(self.ticks.get() + 1);
            self.script[i]
        }
    }
}

#[cfg(test)]
mod node {
    use sr_spatial::LaneMap;
    use sr_world::WorldView;

    use super::helpers::*;
    use crate::{Node, Status};

    #[test]
    fn initialise_runs_once() {
        let (b, inits, ticks) = Scripted::new(&[Status::Running]);
        let mut node = Node::new(b);
        assert_eq!(node.status(), None);

        let actors = store(&[]);
        let map = LaneMap::empty();
        let view = WorldView::new(&actors, &map);
        let mut cmds = Vec::new();
        for t in 0..3 {
            node.tick(&ctx(t, &view), &mut cmds);
        }
        assert_eq!(inits.get(), 1);
        assert_eq!(ticks.get(), 3);
        assert_eq!(node.ticks(), 3);
        assert_eq!(node.status(), Some(Status::Running));
    }

    #[test]
    fn terminal_status_is_sticky() {
        let (b, _, ticks) = Scripted::new(&[Status::Failure, Status::Success]);
        let mut node = Node::new(b);
        let actors = store(&[]);
        let map = LaneMap::empty();
        let view = WorldView::new(&actors, &map);
        let mut cmds = Vec::new();

        assert_eq!(node.tick(&ctx(0, &view), &mut cmds), Status::Failure);
        assert_eq!(node.tick(&ctx(1, &view), &mut cmds), Status::Failure);
        assert_eq!(ticks.get(), 1);
        assert!(node.is_terminal());
    }
}

#[cfg(test)]
mod composites {
    use sr_spatial::LaneMap;
    use sr_world::WorldView;

    use super::helpers::*;
    use crate::{Node, Parallel, ParallelPolicy, Sequence, Status};

    fn run(node: &mut Node, ticks: u64) -> Vec<Status> {
        let actors = store(&[]);
        let map = LaneMap::empty();
        let view = WorldView::new(&actors, &map);
        let mut cmds = Vec::new();
        (0..ticks).map(|t| node.tick(&ctx(t, &view), &mut cmds)).collect()
    }

    #[test]
    fn sequence_fails_fast() {
        let (a, _, a_ticks) = Scripted::new(&[Status::Success]);
        let (b, _, b_ticks) = Scripted::new(&[Status::Failure]);
        let (c, c_inits, c_ticks) = Scripted::new(&[Status::Success]);
        let mut root = Node::new(Sequence::new("seq").with_child(a).with_child(b).with_child(c));

        assert_eq!(run(&mut root, 3), vec![Status::Failure; 3]);
        assert_eq!(a_ticks.get(), 1);
        assert_eq!(b_ticks.get(), 1);
        assert_eq!(c_ticks.get(), 0);
        assert_eq!(c_inits.get(), 0);
    }

    #[test]
    fn sequence_advances_within_the_tick() {
        let (a, _, _) = Scripted::new(&[Status::Running, Status::Success]);
        let (b, _, b_ticks) = Scripted::new(&[Status::Running, Status::Success]);
        let mut root = Node::new(Sequence::new("seq").with_child(a).with_child(b));

        assert_eq!(run(&mut root, 3), vec![Status::Running, Status::Running, Status::Success]);
        // `b` was first ticked in the same tick `a` succeeded.
        assert_eq!(b_ticks.get(), 2);
    }

    #[test]
    fn empty_composites_succeed() {
        assert_eq!(run(&mut Node::new(Sequence::new("empty")), 1), vec![Status::Success]);
        let mut par = Node::new(Parallel::new("empty", ParallelPolicy::SuccessOnAll));
        assert_eq!(run(&mut par, 1), vec![Status::Success]);
        let mut par = Node::new(Parallel::new("empty", ParallelPolicy::SuccessOnOne));
        assert_eq!(run(&mut par, 1), vec![Status::Success]);
    }

    #[test]
    fn parallel_one_resolves_on_first_success() {
        let (slow, _, slow_ticks) = Scripted::new(&[Status::Running]);
        let (fast, _, _) = Scripted::new(&[Status::Running, Status::Success]);
        let mut root = Node::new(
            Parallel::new("par", ParallelPolicy::SuccessOnOne).with_child(slow).with_child(fast),
        );

        assert_eq!(run(&mut root, 4), vec![Status::Running, Status::Success, Status::Success, Status::Success]);
        // The loser is ticked alongside the winner, then never again.
        assert_eq!(slow_ticks.get(), 2);
    }

    #[test]
    fn parallel_all_waits_for_every_child() {
        let (a, _, a_ticks) = Scripted::new(&[Status::Success]);
        let (b, _, _) = Scripted::new(&[Status::Running, Status::Running, Status::Success]);
        let mut root = Node::new(Parallel::new("par", ParallelPolicy::SuccessOnAll).with_child(a).with_child(b));

        assert_eq!(run(&mut root, 3), vec![Status::Running, Status::Running, Status::Success]);
        // A finished child is not re-ticked while its siblings run.
        assert_eq!(a_ticks.get(), 1);
    }

    #[test]
    fn parallel_fails_on_any_failure() {
        let (a, _, _) = Scripted::new(&[Status::Success]);
        let (b, _, _) = Scripted::new(&[Status::Failure]);
        let mut root = Node::new(Parallel::new("par", ParallelPolicy::SuccessOnOne).with_child(a).with_child(b));
        assert_eq!(run(&mut root, 1), vec![Status::Failure]);
    }

    #[test]
    fn nested_tree() {
        let (a, _, _) = Scripted::new(&[Status::Running, Status::Success]);
        let (b, _, _) = Scripted::new(&[Status::Running]);
        let (c, _, c_ticks) = Scripted::new(&[Status::Success]);
        let par = Parallel::new("inner", ParallelPolicy::SuccessOnOne).with_child(a).with_child(b);
        let mut root = Node::new(Sequence::new("outer").with_child(par).with_child(c));

        assert_eq!(run(&mut root, 2), vec![Status::Running, Status::Success]);
        assert_eq!(c_ticks.get(), 1);
    }
}

#[cfg(test)]
mod triggers {
    use sr_core::{ActorId, Location};
    use sr_spatial::{cross_junction, CrossJunctionParams, LaneMap};
    use sr_world::WorldView;

    use super::helpers::*;
    use crate::{
        Behavior, DriveDistance, InTriggerDistanceToLocation, InTriggerDistanceToNextIntersection, Node, Status,
        TimeOut,
    };

    fn tick_at(node: &mut Node, tick: u64, actors: &[(Location, f32, f32)], map: &LaneMap) -> Status {
        let s = store(actors);
        let view = WorldView::new(&s, map);
        let mut cmds = Vec::new();
        let status = node.tick(&ctx(tick, &view), &mut cmds);
        assert!(cmds.is_empty(), "triggers never command actors");
        status
    }

    #[test]
    fn distance_trigger_is_strict() {
        let map = LaneMap::empty();
        let mut node = Node::new(InTriggerDistanceToLocation::new(ActorId(0), Location::xy(3.0, 4.0), 5.0));
        assert_eq!(tick_at(&mut node, 0, &[(Location::xy(0.0, 0.0), 0.0, 0.0)], &map), Status::Running);
        assert_eq!(tick_at(&mut node, 1, &[(Location::xy(0.5, 0.0), 0.0, 0.0)], &map), Status::Success);
    }

    #[test]
    fn distance_trigger_follows_an_actor() {
        let map = LaneMap::empty();
        let mut node = Node::new(InTriggerDistanceToLocation::new(ActorId(0), ActorId(1), 2.0));
        let far = [(Location::xy(0.0, 0.0), 0.0, 0.0), (Location::xy(10.0, 0.0), 0.0, 0.0)];
        let near = [(Location::xy(0.0, 0.0), 0.0, 0.0), (Location::xy(1.0, 0.0), 0.0, 0.0)];
        assert_eq!(tick_at(&mut node, 0, &far, &map), Status::Running);
        assert_eq!(tick_at(&mut node, 1, &near, &map), Status::Success);
    }

    #[test]
    fn unknown_actor_keeps_trigger_running() {
        let map = LaneMap::empty();
        let mut node = Node::new(InTriggerDistanceToLocation::new(ActorId(4), Location::default(), 100.0));
        assert_eq!(tick_at(&mut node, 0, &[(Location::default(), 0.0, 0.0)], &map), Status::Running);
    }

    #[test]
    fn intersection_trigger() {
        let map = cross_junction(CrossJunctionParams::default()).map;
        let mut node = Node::new(InTriggerDistanceToNextIntersection::new(ActorId(0), 20.0));
        assert_eq!(tick_at(&mut node, 0, &[(Location::xy(-40.0, -1.75), 0.0, 10.0)], &map), Status::Running);
        assert_eq!(tick_at(&mut node, 1, &[(Location::xy(-25.0, -1.75), 0.0, 10.0)], &map), Status::Success);
    }

    #[test]
    fn drive_distance_succeeds_on_the_exact_tick() {
        let map = LaneMap::empty();
        let mut node = Node::new(DriveDistance::new(ActorId(0), 3.0));
        for t in 0..3 {
            let status = tick_at(&mut node, t, &[(Location::xy(t as f32, 0.0), 0.0, 20.0)], &map);
            assert_eq!(status, Status::Running, "tick {t}");
        }
        assert_eq!(tick_at(&mut node, 3, &[(Location::xy(3.0, 0.0), 0.0, 20.0)], &map), Status::Success);
    }

    #[test]
    fn drive_distance_counts_from_start() {
        let map = LaneMap::empty();
        let mut d = DriveDistance::new(ActorId(0), 3.0);
        let s = store(&[(Location::xy(100.0, 0.0), 0.0, 0.0)]);
        let view = WorldView::new(&s, &map);
        let c = ctx(0, &view);
        d.initialise(&c);
        d.update(&c, &mut Vec::new());
        assert_eq!(d.travelled(), 0.0);
    }

    #[test]
    fn timeout_measures_simulated_time() {
        let map = LaneMap::empty();
        let mut node = Node::new(TimeOut::new(1.0));
        // Starts at tick 10, so 1 s later is tick 30.
        for t in 10..30 {
            assert_eq!(tick_at(&mut node, t, &[], &map), Status::Running, "tick {t}");
        }
        assert_eq!(tick_at(&mut node, 30, &[], &map), Status::Success);
    }
}

#[cfg(test)]
mod sync {
    use sr_core::{ActorId, Location};
    use sr_spatial::LaneMap;
    use sr_world::{Command, WorldView};

    use super::helpers::*;
    use crate::sync::{MIN_REFERENCE_SPEED, STALLED_TIME_SECS};
    use crate::{required_speed, Behavior, Status, SyncArrival};

    #[test]
    fn matches_arrival_time() {
        // 50 m at 10 m/s is 5 s; 30 m in 5 s is 6 m/s.
        let v = required_speed(50.0, 10.0, 30.0, 20.0);
        assert!((v - 6.0).abs() < 1e-5);
        assert!((v - 30.0 * 10.0 / 50.0).abs() < 1e-5);
    }

    #[test]
    fn clamped_to_max_speed() {
        assert_eq!(required_speed(10.0, 10.0, 500.0, 20.0), 20.0);
    }

    #[test]
    fn stalled_primary_gives_tiny_non_negative_speed() {
        for v1 in [0.0, MIN_REFERENCE_SPEED * 0.5] {
            let v = required_speed(50.0, v1, 100.0, 20.0);
            assert!(v >= 0.0);
            assert!(v <= 100.0 / STALLED_TIME_SECS + 1e-9);
        }
    }

    #[test]
    fn randomised_inputs_stay_in_range() {
        let mut rng = sr_core::ScenarioRng::new(7);
        for _ in 0..500 {
            let d1 = rng.gen_range(0.0_f32..200.0);
            let v1 = rng.gen_range(0.0_f32..30.0);
            let d2 = rng.gen_range(0.0_f32..200.0);
            let v = required_speed(d1, v1, d2, 15.0);
            assert!((0.0..=15.0).contains(&v), "d1={d1} v1={v1} d2={d2} -> {v}");
        }
    }

    #[test]
    fn commands_the_secondary_every_tick() {
        let map = LaneMap::empty();
        // Primary 50 m west of the target heading east at 10 m/s; secondary
        // 30 m south of it.
        let s = store(&[(Location::xy(-50.0, 0.0), 0.0, 10.0), (Location::xy(0.0, -30.0), 90.0, 0.0)]);
        let view = WorldView::new(&s, &map);
        let mut sync = SyncArrival::new(ActorId(1), ActorId(0), Location::xy(0.0, 0.0), 20.0);
        let mut cmds = Vec::new();

        assert_eq!(sync.update(&ctx(0, &view), &mut cmds), Status::Running);
        let [Command::TargetVelocity { actor, speed }] = cmds[..] else {
            panic!("unexpected commands {cmds:?}");
        };
        assert_eq!(actor, ActorId(1));
        assert!((speed - 6.0).abs() < 1e-4);
        assert_eq!(sync.state().last_speed, Some(speed));
    }

    #[test]
    fn passed_primary_releases_the_secondary() {
        let map = LaneMap::empty();
        let s = store(&[(Location::xy(5.0, 0.0), 0.0, 10.0), (Location::xy(0.0, -30.0), 90.0, 0.0)]);
        let view = WorldView::new(&s, &map);
        let mut sync = SyncArrival::new(ActorId(1), ActorId(0), Location::xy(0.0, 0.0), 12.0);
        let mut cmds = Vec::new();
        sync.update(&ctx(0, &view), &mut cmds);
        assert_eq!(cmds, vec![Command::TargetVelocity { actor: ActorId(1), speed: 12.0 }]);
    }

    #[test]
    fn missing_actor_emits_nothing() {
        let map = LaneMap::empty();
        let s = store(&[(Location::xy(-50.0, 0.0), 0.0, 10.0)]);
        let view = WorldView::new(&s, &map);
        let mut sync = SyncArrival::new(ActorId(1), ActorId(0), Location::default(), 12.0);
        let mut cmds = Vec::new();
        assert_eq!(sync.update(&ctx(0, &view), &mut cmds), Status::Running);
        assert!(cmds.is_empty());
    }
}

#[cfg(test)]
mod control {
    use sr_core::{ActorId, Location, RoadOption, WaypointId};
    use sr_spatial::{LaneMap, PlanEntry, TrajectoryPlan, Waypoint};
    use sr_world::{Command, WorldView};

    use super::helpers::*;
    use crate::{
        AccelerateToVelocity, ManeuverCorridor, Node, Status, StopVehicle, TurnDirection, TurnVehicle,
        WaypointFollower,
    };

    fn tick_at(node: &mut Node, tick: u64, actors: &[(Location, f32, f32)]) -> (Status, Vec<Command>) {
        let map = LaneMap::empty();
        let s = store(actors);
        let view = WorldView::new(&s, &map);
        let mut cmds = Vec::new();
        let status = node.tick(&ctx(tick, &view), &mut cmds);
        (status, cmds)
    }

    fn steer_of(cmds: &[Command]) -> f32 {
        cmds.iter()
            .find_map(|c| match *c {
                Command::Steer { angle_deg, .. } => Some(angle_deg),
                _ => None,
            })
            .unwrap()
    }

    fn plan(points: &[Location]) -> TrajectoryPlan {
        points
            .iter()
            .enumerate()
            .map(|(i, &location)| PlanEntry {
                waypoint: Waypoint {
                    id: WaypointId(i as u32),
                    location,
                    yaw_deg: 0.0,
                    road_id: 1,
                    lane_id: -1,
                    is_intersection: false,
                },
                option: RoadOption::LaneFollow,
            })
            .collect()
    }

    #[test]
    fn follower_steers_toward_the_next_entry() {
        let p = plan(&[Location::xy(1.0, 0.0), Location::xy(10.0, -5.0)]);
        let mut follower = WaypointFollower::new(ActorId(0), 8.0).with_plan(&p);
        let map = LaneMap::empty();
        let s = store(&[(Location::default(), 0.0, 8.0)]);
        let view = WorldView::new(&s, &map);
        let mut cmds = Vec::new();
        let status = crate::Behavior::update(&mut follower, &ctx(0, &view), &mut cmds);

        assert_eq!(status, Status::Running);
        assert_eq!(follower.remaining(), 1);
        assert!(cmds.contains(&Command::TargetVelocity { actor: ActorId(0), speed: 8.0 }));
        assert!(steer_of(&cmds) < 0.0);
    }

    #[test]
    fn follower_without_target_drives_straight() {
        let mut node = Node::new(WaypointFollower::new(ActorId(0), 5.0));
        let (status, cmds) = tick_at(&mut node, 0, &[(Location::default(), 0.0, 0.0)]);
        assert_eq!(status, Status::Running);
        assert_eq!(steer_of(&cmds), 0.0);
    }

    #[test]
    fn right_turn_completes() {
        let mut node = Node::new(TurnVehicle::new(ActorId(0), TurnDirection::Right, 5.0));
        let yaws = [0.0, -30.0, -60.0];
        for (t, yaw) in yaws.into_iter().enumerate() {
            let (status, cmds) = tick_at(&mut node, t as u64, &[(Location::default(), yaw, 5.0)]);
            assert_eq!(status, Status::Running);
            assert_eq!(steer_of(&cmds), -20.0);
        }
        let (status, _) = tick_at(&mut node, 3, &[(Location::default(), -89.5, 5.0)]);
        assert_eq!(status, Status::Success);
    }

    #[test]
    fn turn_across_the_wrap_point() {
        let mut node = Node::new(TurnVehicle::new(ActorId(0), TurnDirection::Left, 5.0));
        for (t, yaw) in [150.0, 179.0, -150.0, -120.0].into_iter().enumerate() {
            let (status, _) = tick_at(&mut node, t as u64, &[(Location::default(), yaw, 5.0)]);
            let expected = if t == 3 { Status::Success } else { Status::Running };
            assert_eq!(status, expected, "tick {t}");
        }
    }

    #[test]
    fn wrong_way_turn_fails() {
        let mut node = Node::new(TurnVehicle::new(ActorId(0), TurnDirection::Right, 5.0));
        tick_at(&mut node, 0, &[(Location::default(), 0.0, 5.0)]);
        let (status, _) = tick_at(&mut node, 1, &[(Location::default(), 50.0, 5.0)]);
        assert_eq!(status, Status::Failure);
    }

    #[test]
    fn leaving_the_corridor_fails() {
        let corridor = ManeuverCorridor { radius_m: Some(30.0), max_duration_secs: None };
        let mut node = Node::new(TurnVehicle::new(ActorId(0), TurnDirection::Left, 5.0).with_corridor(corridor));
        tick_at(&mut node, 0, &[(Location::default(), 0.0, 5.0)]);
        let (status, _) = tick_at(&mut node, 1, &[(Location::xy(31.0, 0.0), 0.0, 5.0)]);
        assert_eq!(status, Status::Failure);
    }

    #[test]
    fn overrunning_the_duration_fails() {
        let corridor = ManeuverCorridor { radius_m: None, max_duration_secs: Some(1.0) };
        let mut node = Node::new(TurnVehicle::new(ActorId(0), TurnDirection::Left, 5.0).with_corridor(corridor));
        tick_at(&mut node, 0, &[(Location::default(), 0.0, 5.0)]);
        let (status, _) = tick_at(&mut node, 21, &[(Location::default(), 10.0, 5.0)]);
        assert_eq!(status, Status::Failure);
    }

    #[test]
    fn stop_succeeds_at_rest() {
        let mut node = Node::new(StopVehicle::new(ActorId(0), 1.0));
        let (status, cmds) = tick_at(&mut node, 0, &[(Location::default(), 0.0, 4.0)]);
        assert_eq!(status, Status::Running);
        assert_eq!(cmds, vec![Command::Stop { actor: ActorId(0), max_brake: 1.0 }]);
        let (status, _) = tick_at(&mut node, 1, &[(Location::default(), 0.0, 0.0)]);
        assert_eq!(status, Status::Success);
    }

    #[test]
    fn unknown_actor_fails_instead_of_reading_as_stopped() {
        let mut node = Node::new(StopVehicle::new(ActorId(7), 1.0));
        let (status, cmds) = tick_at(&mut node, 0, &[(Location::default(), 0.0, 0.0)]);
        assert_eq!(status, Status::Failure);
        assert!(cmds.is_empty());

        let mut node = Node::new(AccelerateToVelocity::new(ActorId(7), 0.0));
        let (status, cmds) = tick_at(&mut node, 0, &[(Location::default(), 0.0, 0.0)]);
        assert_eq!(status, Status::Failure);
        assert!(cmds.is_empty());
    }

    #[test]
    fn accelerate_succeeds_at_target() {
        let mut node = Node::new(AccelerateToVelocity::new(ActorId(0), 10.0));
        let (status, cmds) = tick_at(&mut node, 0, &[(Location::default(), 0.0, 3.0)]);
        assert_eq!(status, Status::Running);
        assert_eq!(cmds, vec![Command::TargetVelocity { actor: ActorId(0), speed: 10.0 }]);
        let (status, _) = tick_at(&mut node, 1, &[(Location::default(), 0.0, 10.0)]);
        assert_eq!(status, Status::Success);
    }
}
