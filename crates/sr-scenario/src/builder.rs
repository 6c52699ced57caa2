//! Fluent builder for constructing a [`Scenario`].

use tracing::info;

use sr_behavior::Node;
use sr_core::{ActorId, ScenarioConfig};
use sr_criteria::{CriteriaSet, Criterion};
use sr_world::{SignalState, Simulation};

use crate::{Scenario, ScenarioError, ScenarioResult};

/// Signal pre-positioning requested before the first tick.
#[derive(Clone, Debug)]
struct SignalSetup {
    actor:      ActorId,
    state:      SignalState,
    green_secs: f32,
}

/// Fluent builder for [`Scenario<S>`].
///
/// # Required inputs
///
/// - a name, used in logs and the final report
/// - [`ScenarioConfig`]: tick length, timeout, seed
/// - `S: Simulation`: the world the scenario drives
/// - a root behavior, via [`behavior`](Self::behavior)
///
/// # Optional inputs
///
/// | Method                 | Default                               |
/// |------------------------|---------------------------------------|
/// | `.criterion(c)`        | No criteria (the verdict is `PASS`)   |
/// | `.criteria(set)`       | Replaces every criterion added so far |
/// | `.signal(a, s, secs)`  | Signals left as the simulation has them |
///
/// # Example
///
/// ```rust,ignore
/// let mut scenario = ScenarioBuilder::new("cut-in", config, world)
///     .behavior(Sequence::new("root").with_child(start).with_child(cut_in))
///     .criterion(CollisionTest::new(ego))
///     .signal(ego, SignalState::Green, config.timeout_secs)
///     .build()?;
/// let outcome = scenario.run(&mut NoopObserver)?;
/// ```
pub struct ScenarioBuilder<S: Simulation> {
    name:     String,
    config:   ScenarioConfig,
    sim:      S,
    root:     Option<Node>,
    criteria: CriteriaSet,
    signals:  Vec<SignalSetup>,
}

impl<S: Simulation> ScenarioBuilder<S> {
    pub fn new(name: impl Into<String>, config: ScenarioConfig, sim: S) -> Self {
        Self {
            name: name.into(),
            config,
            sim,
            root:     None,
            criteria: CriteriaSet::new(),
            signals:  Vec::new(),
        }
    }

    /// Set the root of the behavior tree.  A later call replaces it.
    pub fn behavior(mut self, root: impl Into<Node>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn criterion(mut self, criterion: impl Criterion + 'static) -> Self {
        self.criteria.add(criterion);
        self
    }

    pub fn criteria(mut self, criteria: CriteriaSet) -> Self {
        self.criteria = criteria;
        self
    }

    /// Put the signal governing `actor`'s next junction into `state` and
    /// keep it green for `green_secs` once green.
    ///
    /// `build` fails with [`ScenarioError::NoSignalNearActor`] if the
    /// simulation has no such signal.
    pub fn signal(mut self, actor: ActorId, state: SignalState, green_secs: f32) -> Self {
        self.signals.push(SignalSetup { actor, state, green_secs });
        self
    }

    /// The simulation, for setup queries before `build`.
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Validate inputs, apply environment setup, and return a runnable
    /// [`Scenario`].
    pub fn build(mut self) -> ScenarioResult<Scenario<S>> {
        self.config.validate()?;
        let root = self.root.ok_or_else(|| ScenarioError::MissingBehavior(self.name.clone()))?;

        for setup in &self.signals {
            let signal = self
                .sim
                .next_signal(setup.actor)
                .ok_or(ScenarioError::NoSignalNearActor(setup.actor))?;
            self.sim.set_signal_state(signal, setup.state)?;
            self.sim.set_signal_green_duration(signal, setup.green_secs)?;
            info!(
                actor = %setup.actor,
                %signal,
                state = %setup.state,
                green_secs = setup.green_secs,
                "signal pre-positioned"
            );
        }

        info!(
            scenario = %self.name,
            root = root.name(),
            criteria = self.criteria.len(),
            timeout_ticks = self.config.timeout_ticks(),
            "scenario built"
        );
        Ok(Scenario::new(self.name, self.config, self.sim, root, self.criteria))
    }
}
