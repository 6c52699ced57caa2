//! The scenario tick loop.

use std::collections::BTreeMap;

use tracing::{debug, info};

use sr_behavior::{Node, Status};
use sr_core::{ActorId, ScenarioConfig, SimClock};
use sr_criteria::{CriteriaSet, CriterionRecord, Verdict};
use sr_world::{Command, Simulation, TickContext};

use crate::{Outcome, ScenarioObserver, ScenarioReport, ScenarioResult};

/// A built scenario: one behavior tree and its criteria, driving a
/// simulation until the tree finishes or the timeout elapses.
///
/// Each call to [`step`](Self::step) runs one tick:
///
/// 1. Timeout check: once `config.timeout_ticks()` ticks have run the
///    scenario ends with [`Outcome::Timeout`] before the tree is ticked.
/// 2. Intent phase: the root is ticked against a snapshot of the world,
///    collecting commands.
/// 3. Criteria are updated against the same snapshot.
/// 4. Apply phase: the commands go to the simulation's actuation sink.
/// 5. A terminal root status ends the run; otherwise the simulation and
///    the clock advance by one step.
pub struct Scenario<S: Simulation> {
    pub name:   String,
    pub config: ScenarioConfig,
    pub clock:  SimClock,

    sim:       S,
    root:      Node,
    criteria:  CriteriaSet,
    /// Per-tick command buffer, reused across ticks.
    commands:  Vec<Command>,
    outcome:   Option<Outcome>,
    ticks_run: u64,
}

impl<S: Simulation> Scenario<S> {
    pub(crate) fn new(name: String, config: ScenarioConfig, sim: S, root: Node, criteria: CriteriaSet) -> Self {
        let clock = config.make_clock();
        Self {
            name,
            config,
            clock,
            sim,
            root,
            criteria,
            commands:  Vec::new(),
            outcome:   None,
            ticks_run: 0,
        }
    }

    /// Run until the scenario ends.
    pub fn run<O: ScenarioObserver>(&mut self, observer: &mut O) -> ScenarioResult<Outcome> {
        loop {
            if let Some(outcome) = self.step(observer)? {
                return Ok(outcome);
            }
        }
    }

    /// Run one tick.  Returns the outcome once the scenario has ended;
    /// stepping an ended scenario does nothing and returns it again.
    pub fn step<O: ScenarioObserver>(&mut self, observer: &mut O) -> ScenarioResult<Option<Outcome>> {
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }

        let tick = self.clock.current_tick;
        if tick.0 >= self.config.timeout_ticks() {
            return Ok(Some(self.finish(Outcome::Timeout, observer)));
        }
        observer.on_tick_start(tick);

        // ── Intent phase ──────────────────────────────────────────────────
        let status = {
            let view = self.sim.view();
            let ctx = TickContext::new(tick, self.clock.tick_duration_secs, self.clock.elapsed_secs(), &view);
            let status = self.root.tick(&ctx, &mut self.commands);
            self.criteria.update_all(&ctx);

            if tick.0 % self.config.snapshot_interval_ticks == 0 {
                observer.on_snapshot(tick, self.sim.actors());
            }
            status
        };

        // ── Apply phase ───────────────────────────────────────────────────
        observer.on_commands(tick, &self.commands);
        if !self.commands.is_empty() {
            debug!(%tick, commands = self.commands.len(), "applying commands");
        }
        for command in self.commands.drain(..) {
            command.apply_to(&mut self.sim)?;
        }

        self.ticks_run += 1;
        observer.on_tick_end(tick, status);

        match status {
            Status::Success => Ok(Some(self.finish(Outcome::Success, observer))),
            Status::Failure => Ok(Some(self.finish(Outcome::Failure, observer))),
            Status::Running => {
                self.sim.advance(self.clock.tick_duration_secs);
                self.clock.advance();
                Ok(None)
            }
        }
    }

    fn finish<O: ScenarioObserver>(&mut self, outcome: Outcome, observer: &mut O) -> Outcome {
        self.outcome = Some(outcome);
        let report = self.build_report(outcome);
        info!(
            scenario = %self.name,
            %outcome,
            ticks = report.ticks,
            simulated_secs = report.simulated_secs,
            criteria = %report.overall,
            "scenario finished"
        );
        observer.on_scenario_end(&report);
        outcome
    }

    fn build_report(&self, outcome: Outcome) -> ScenarioReport {
        ScenarioReport {
            name:           self.name.clone(),
            outcome,
            ticks:          self.ticks_run,
            simulated_secs: self.clock.elapsed_secs(),
            records:        self.criteria.by_actor(),
            overall:        self.criteria.overall(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `None` while the scenario is still running.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The full report, once the scenario has ended.
    pub fn report(&self) -> Option<ScenarioReport> {
        self.outcome.map(|o| self.build_report(o))
    }

    /// Per-actor verdict over that actor's non-optional criteria.
    /// Available at any time.
    pub fn criteria_report(&self) -> BTreeMap<ActorId, Verdict> {
        self.criteria.verdicts_by_actor()
    }

    /// Criterion records grouped by actor.
    pub fn criteria_records(&self) -> BTreeMap<ActorId, Vec<CriterionRecord>> {
        self.criteria.by_actor()
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn into_sim(self) -> S {
        self.sim
    }
}
