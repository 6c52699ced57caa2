//! Actor state as the simulation reports it each tick.

use sr_core::{ActorId, Location, Vector3};

/// Whether an actor is the system under test or a scripted participant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ActorRole {
    Ego,
    #[default]
    Other,
}

impl ActorRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ActorRole::Ego   => "ego",
            ActorRole::Other => "other",
        }
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One actor's state, copied out of the store.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActorState {
    pub role:           ActorRole,
    pub location:       Location,
    pub yaw_deg:        f32,
    pub speed:          f32,
    pub collisions:     u32,
    pub lane_invasions: u32,
}

/// Structure-of-Arrays storage for actor state.
///
/// Every `Vec` has exactly `count` elements and `ActorId` is the index into
/// all of them.  The store is written by the simulation only; the engine
/// reads it through [`SpatialQuery`](crate::SpatialQuery).
pub struct ActorStore {
    pub count: usize,

    pub role: Vec<ActorRole>,

    // ── Pose ──────────────────────────────────────────────────────────────
    pub location: Vec<Location>,

    /// Heading in degrees counter-clockwise from `+x`.
    pub yaw_deg: Vec<f32>,

    /// Speed along the heading, m/s, never negative.
    pub speed: Vec<f32>,

    // ── Event counters (monotonic) ────────────────────────────────────────
    pub collisions: Vec<u32>,

    pub lane_invasions: Vec<u32>,
}

impl ActorStore {
    /// `count` actors at the origin, at rest, role `Other`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            role:           vec![ActorRole::Other; count],
            location:       vec![Location::default(); count],
            yaw_deg:        vec![0.0; count],
            speed:          vec![0.0; count],
            collisions:     vec![0; count],
            lane_invasions: vec![0; count],
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn contains(&self, actor: ActorId) -> bool {
        actor.index() < self.count
    }

    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.count as u32).map(ActorId)
    }

    /// Actors with `role`, in id order.
    pub fn with_role(&self, role: ActorRole) -> impl Iterator<Item = ActorId> + '_ {
        self.actor_ids().filter(move |a| self.role[a.index()] == role)
    }

    // ── Per-actor reads ───────────────────────────────────────────────────

    #[inline]
    pub fn location(&self, actor: ActorId) -> Option<Location> {
        self.location.get(actor.index()).copied()
    }

    #[inline]
    pub fn yaw_deg(&self, actor: ActorId) -> Option<f32> {
        self.yaw_deg.get(actor.index()).copied()
    }

    /// Speed in m/s; `0.0` for an unknown actor.
    #[inline]
    pub fn speed(&self, actor: ActorId) -> f32 {
        self.speed.get(actor.index()).copied().unwrap_or(0.0)
    }

    /// Velocity vector; zero for an unknown actor.
    pub fn velocity(&self, actor: ActorId) -> Vector3 {
        match self.yaw_deg(actor) {
            Some(yaw) => Vector3::from_yaw(yaw) * self.speed(actor),
            None => Vector3::ZERO,
        }
    }

    #[inline]
    pub fn collisions(&self, actor: ActorId) -> u32 {
        self.collisions.get(actor.index()).copied().unwrap_or(0)
    }

    #[inline]
    pub fn lane_invasions(&self, actor: ActorId) -> u32 {
        self.lane_invasions.get(actor.index()).copied().unwrap_or(0)
    }

    pub fn state(&self, actor: ActorId) -> Option<ActorState> {
        let i = actor.index();
        if i >= self.count {
            return None;
        }
        Some(ActorState {
            role:           self.role[i],
            location:       self.location[i],
            yaw_deg:        self.yaw_deg[i],
            speed:          self.speed[i],
            collisions:     self.collisions[i],
            lane_invasions: self.lane_invasions[i],
        })
    }
}
