//! CSV actor spawn loader.
//!
//! # CSV format
//!
//! One row per actor.  `actor_id` must run contiguously from 0 (rows may
//! appear in any order).  `z` and `speed` are optional.
//!
//! ```csv
//! actor_id,role,x,y,z,yaw_deg,speed
//! 0,ego,-60.0,-1.75,0.0,0.0,10.0
//! 1,other,1.75,-60.0,0.0,90.0,0.0
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use sr_core::Location;

use crate::builder::ActorSpawn;
use crate::store::ActorRole;
use crate::{WorldError, WorldResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SpawnRecord {
    actor_id: u32,
    role:     String,
    x:        f32,
    y:        f32,
    #[serde(default)]
    z:        f32,
    yaw_deg:  f32,
    #[serde(default)]
    speed:    f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load actor spawns from a CSV file, indexed by `actor_id`.
pub fn load_spawns_csv(path: &Path) -> WorldResult<Vec<ActorSpawn>> {
    let file = std::fs::File::open(path)?;
    load_spawns_reader(file)
}

/// Like [`load_spawns_csv`] but accepts any `Read` source.
pub fn load_spawns_reader<R: Read>(reader: R) -> WorldResult<Vec<ActorSpawn>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows: Vec<SpawnRecord> = Vec::new();
    for result in csv_reader.deserialize::<SpawnRecord>() {
        rows.push(result.map_err(|e| WorldError::Parse(e.to_string()))?);
    }
    rows.sort_by_key(|r| r.actor_id);

    rows.into_iter()
        .enumerate()
        .map(|(i, r)| {
            if r.actor_id as usize != i {
                return Err(WorldError::Parse(format!(
                    "actor ids must run contiguously from 0: expected {i}, found {}",
                    r.actor_id
                )));
            }
            Ok(ActorSpawn::new(parse_role(&r.role)?, Location::new(r.x, r.y, r.z), r.yaw_deg)
                .with_speed(r.speed))
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_role(s: &str) -> WorldResult<ActorRole> {
    match s.trim().to_ascii_lowercase().as_str() {
        "ego" | "hero" => Ok(ActorRole::Ego),
        "other" | "npc" => Ok(ActorRole::Other),
        other => Err(WorldError::Parse(format!(
            "invalid role {other:?}: expected \"ego\" or \"other\""
        ))),
    }
}
