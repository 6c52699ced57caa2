//! Environment setup hook and the full simulation interface.

use sr_core::{ActorId, SignalId};
use sr_spatial::LaneMap;

use crate::actuation::Actuation;
use crate::error::WorldResult;
use crate::query::WorldView;
use crate::store::ActorStore;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum SignalState {
    Red,
    Yellow,
    Green,
    #[default]
    Off,
}

impl SignalState {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalState::Red    => "red",
            SignalState::Yellow => "yellow",
            SignalState::Green  => "green",
            SignalState::Off    => "off",
        }
    }
}

impl std::fmt::Display for SignalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Used only while a scenario is being constructed.
pub trait Environment {
    /// The signal governing `actor`'s approach to its next junction.
    fn next_signal(&self, actor: ActorId) -> Option<SignalId>;

    fn set_signal_state(&mut self, signal: SignalId, state: SignalState) -> WorldResult<()>;

    /// How long the signal stays green once green.
    fn set_signal_green_duration(&mut self, signal: SignalId, secs: f32) -> WorldResult<()>;
}

/// A simulation the scenario tick loop can drive.
pub trait Simulation: Actuation + Environment {
    /// Actor state as of the current step.
    fn actors(&self) -> &ActorStore;

    fn map(&self) -> &LaneMap;

    /// Advance simulated time by one step.
    fn advance(&mut self, delta_secs: f32);

    fn view(&self) -> WorldView<'_> {
        WorldView::new(self.actors(), self.map())
    }
}
