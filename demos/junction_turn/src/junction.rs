//! The four-way junction the demo runs on.

use sr_core::Location;
use sr_spatial::{cross_junction, ArmSide, CrossJunctionParams};
use sr_world::{ActorStore, KinematicWorld};

/// Kinematic world on the default cross junction with one signal per
/// approach.
pub fn build_world(actors: ActorStore) -> KinematicWorld {
    let junction = cross_junction(CrossJunctionParams::default());
    let signals: Vec<Location> = ArmSide::ALL.iter().map(|&side| junction.signal_position(side)).collect();

    let mut world = KinematicWorld::new(junction.map, actors);
    for location in signals {
        world.add_signal(location);
    }
    world
}
