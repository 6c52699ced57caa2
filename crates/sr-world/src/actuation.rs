//! Actuation commands and the sink that applies them.
//!
//! Behaviors do not drive actors directly.  During the tick they push
//! `Command`s into a buffer; once the tree and the criteria are done the
//! scenario applies the buffer, in emission order, to an [`Actuation`] sink.
//! Two commands for the same actor in one tick are not arbitrated: the later
//! one wins.

use sr_core::ActorId;

use crate::error::WorldResult;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Track `speed` (m/s) with the actor's own longitudinal controller.
    TargetVelocity { actor: ActorId, speed: f32 },

    /// Hold the front-wheel angle; positive steers left.
    Steer { actor: ActorId, angle_deg: f32 },

    /// Brake at `max_brake` (fraction of full braking, 0..=1) to standstill.
    Stop { actor: ActorId, max_brake: f32 },
}

impl Command {
    pub fn actor(&self) -> ActorId {
        match *self {
            Command::TargetVelocity { actor, .. }
            | Command::Steer { actor, .. }
            | Command::Stop { actor, .. } => actor,
        }
    }

    pub fn apply_to<A: Actuation + ?Sized>(&self, sink: &mut A) -> WorldResult<()> {
        match *self {
            Command::TargetVelocity { actor, speed } => sink.set_target_velocity(actor, speed),
            Command::Steer { actor, angle_deg } => sink.set_steering(actor, angle_deg),
            Command::Stop { actor, max_brake } => sink.stop(actor, max_brake),
        }
    }
}

/// Where commands end up.  Errors only for actors the sink does not know.
pub trait Actuation {
    fn set_target_velocity(&mut self, actor: ActorId, speed: f32) -> WorldResult<()>;

    fn set_steering(&mut self, actor: ActorId, angle_deg: f32) -> WorldResult<()>;

    fn stop(&mut self, actor: ActorId, max_brake: f32) -> WorldResult<()>;
}
