//! Builder for [`ActorStore`].
//!
//! ```rust
//! use sr_core::Location;
//! use sr_world::{ActorRole, ActorSpawn, ActorStoreBuilder};
//!
//! let mut b = ActorStoreBuilder::new();
//! let ego = b.spawn(ActorSpawn::new(ActorRole::Ego, Location::xy(-50.0, -1.75), 0.0).with_speed(10.0));
//! let store = b.build();
//! assert_eq!(store.count, 1);
//! assert_eq!(store.speed(ego), 10.0);
//! ```

use sr_core::{ActorId, Location};

use crate::store::{ActorRole, ActorStore};

/// Initial state of one actor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActorSpawn {
    pub role:     ActorRole,
    pub location: Location,
    pub yaw_deg:  f32,
    pub speed:    f32,
}

impl ActorSpawn {
    pub fn new(role: ActorRole, location: Location, yaw_deg: f32) -> Self {
        Self { role, location, yaw_deg, speed: 0.0 }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }
}

#[derive(Default)]
pub struct ActorStoreBuilder {
    spawns: Vec<ActorSpawn>,
}

impl ActorStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spawns(spawns: impl IntoIterator<Item = ActorSpawn>) -> Self {
        Self { spawns: spawns.into_iter().collect() }
    }

    /// Add an actor and return its id (sequential from 0).
    pub fn spawn(&mut self, spawn: ActorSpawn) -> ActorId {
        let id = ActorId(self.spawns.len() as u32);
        self.spawns.push(spawn);
        id
    }

    pub fn build(self) -> ActorStore {
        let mut store = ActorStore::new(self.spawns.len());
        for (i, s) in self.spawns.into_iter().enumerate() {
            store.role[i]     = s.role;
            store.location[i] = s.location;
            store.yaw_deg[i]  = s.yaw_deg;
            store.speed[i]    = s.speed;
        }
        store
    }
}
