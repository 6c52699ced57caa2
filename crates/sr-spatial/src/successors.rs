//! Forward walk along a lane.
//!
//! [`Successors`] advances in fixed steps and tells the caller *why* it
//! stopped: each [`advance`](Successors::advance) yields either the single
//! next waypoint, the candidates of a branch point, or the end of the lane.
//! The `Iterator` impl yields waypoints only while exactly one candidate
//! exists, so `map.successors(wp, 5.0).collect()` is "everything up to the
//! next junction".

use sr_core::WaypointId;

use crate::map::LaneMap;
use crate::waypoint::Waypoint;

/// Outcome of one walk step.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<'a> {
    Next(&'a Waypoint),
    /// More than one way forward; the walk does not choose.
    Branch(Vec<&'a Waypoint>),
    End,
}

/// Why a walk stopped producing waypoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    Branch,
    End,
    /// The walk took as many steps as the map has waypoints (a loop).
    Limit,
}

pub struct Successors<'a> {
    map:     &'a LaneMap,
    origin:  WaypointId,
    current: WaypointId,
    step:    f32,
    taken:   usize,
    stopped: Option<StopReason>,
}

impl<'a> Successors<'a> {
    pub(crate) fn new(map: &'a LaneMap, origin: WaypointId, step: f32) -> Self {
        Self { map, origin, current: origin, step, taken: 0, stopped: None }
    }

    pub fn origin(&self) -> WaypointId {
        self.origin
    }

    /// The last waypoint reached (the origin before the first step).
    pub fn current(&self) -> Option<&'a Waypoint> {
        self.map.waypoint(self.current)
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stopped
    }

    /// Rewind to the origin.
    pub fn restart(&mut self) {
        self.current = self.origin;
        self.taken = 0;
        self.stopped = None;
    }

    /// Take one step.  Once stopped the walk keeps reporting the same
    /// branch or end.
    pub fn advance(&mut self) -> Step<'a> {
        match self.stopped {
            Some(StopReason::Branch) => return Step::Branch(self.candidates()),
            Some(_) => return Step::End,
            None => {}
        }
        if self.taken >= self.map.waypoint_count() {
            self.stopped = Some(StopReason::Limit);
            return Step::End;
        }

        let next = self.map.next(self.current, self.step);
        match next.as_slice() {
            [] => {
                self.stopped = Some(StopReason::End);
                Step::End
            }
            [only] => match self.map.waypoint(*only) {
                Some(wp) => {
                    self.current = *only;
                    self.taken += 1;
                    Step::Next(wp)
                }
                None => {
                    self.stopped = Some(StopReason::End);
                    Step::End
                }
            },
            _ => {
                self.stopped = Some(StopReason::Branch);
                Step::Branch(self.candidates())
            }
        }
    }

    fn candidates(&self) -> Vec<&'a Waypoint> {
        let map = self.map;
        map.next(self.current, self.step)
            .into_iter()
            .filter_map(|id| map.waypoint(id))
            .collect()
    }
}

impl<'a> Iterator for Successors<'a> {
    type Item = &'a Waypoint;

    fn next(&mut self) -> Option<&'a Waypoint> {
        match self.advance() {
            Step::Next(wp) => Some(wp),
            Step::Branch(_) | Step::End => None,
        }
    }
}

impl std::iter::FusedIterator for Successors<'_> {}
