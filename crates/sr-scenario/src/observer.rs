//! Scenario observer trait for progress reporting and data collection.

use sr_behavior::Status;
use sr_core::Tick;
use sr_world::{ActorStore, Command};

use crate::ScenarioReport;

/// Callbacks invoked by [`Scenario::step`][crate::Scenario::step] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — status printer
///
/// ```rust,ignore
/// struct StatusPrinter;
///
/// impl ScenarioObserver for StatusPrinter {
///     fn on_tick_end(&mut self, tick: Tick, status: Status) {
///         println!("{tick}: tree {status}");
///     }
/// }
/// ```
pub trait ScenarioObserver {
    /// Called at the very start of each tick, before the tree is ticked.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called with this tick's commands, just before they are applied.
    fn on_commands(&mut self, _tick: Tick, _commands: &[Command]) {}

    /// Called once the tree has been ticked and the commands applied.
    fn on_tick_end(&mut self, _tick: Tick, _status: Status) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the actor
    /// state the tree saw this tick.
    fn on_snapshot(&mut self, _tick: Tick, _actors: &ActorStore) {}

    /// Called once when the run ends, whatever the outcome.
    fn on_scenario_end(&mut self, _report: &ScenarioReport) {}
}

/// A [`ScenarioObserver`] that does nothing.
pub struct NoopObserver;

impl ScenarioObserver for NoopObserver {}
