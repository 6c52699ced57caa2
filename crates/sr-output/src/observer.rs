//! `ScenarioOutputObserver<W>` — bridges `ScenarioObserver` to an
//! `OutputWriter`.

use tracing::warn;

use sr_behavior::Status;
use sr_core::{ScenarioConfig, Tick};
use sr_scenario::{ScenarioObserver, ScenarioReport};
use sr_world::{ActorStore, Command};

use crate::row::{ActorSnapshotRow, CriterionRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ScenarioObserver`] that writes actor snapshots, tick summaries and
/// the final criterion records to any [`OutputWriter`].
///
/// Observer hooks cannot fail, so the first writer error is stored and the
/// rest are dropped.  Check with [`take_error`][Self::take_error] after
/// `scenario.run()` returns.
pub struct ScenarioOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: f32,
    commands_this_tick: u64,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> ScenarioOutputObserver<W> {
    pub fn new(writer: W, config: &ScenarioConfig) -> Self {
        Self {
            writer,
            tick_duration_secs: config.tick_duration_secs,
            commands_this_tick: 0,
            last_error:         None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "scenario output failed; later write errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ScenarioObserver for ScenarioOutputObserver<W> {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.commands_this_tick = 0;
    }

    fn on_commands(&mut self, _tick: Tick, commands: &[Command]) {
        self.commands_this_tick += commands.len() as u64;
    }

    fn on_tick_end(&mut self, tick: Tick, status: Status) {
        let row = TickSummaryRow {
            tick:         tick.0,
            elapsed_secs: tick.0 as f64 * self.tick_duration_secs as f64,
            status:       status.as_str(),
            commands:     self.commands_this_tick,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, actors: &ActorStore) {
        let rows: Vec<ActorSnapshotRow> = (0..actors.count)
            .map(|i| ActorSnapshotRow {
                actor_id:       i as u32,
                tick:           tick.0,
                role:           actors.role[i].as_str(),
                x:              actors.location[i].x,
                y:              actors.location[i].y,
                yaw_deg:        actors.yaw_deg[i],
                speed:          actors.speed[i],
                collisions:     actors.collisions[i],
                lane_invasions: actors.lane_invasions[i],
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_scenario_end(&mut self, report: &ScenarioReport) {
        let rows: Vec<CriterionRow> = report.records.values().flatten().map(CriterionRow::from).collect();
        let result = self.writer.write_criteria(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
