//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `actor_snapshots.csv`
//! - `tick_summaries.csv`
//! - `criteria.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ActorSnapshotRow, CriterionRow, OutputResult, TickSummaryRow};

pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    criteria:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files in it, and write
    /// the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("actor_snapshots.csv"))?;
        snapshots.write_record([
            "actor_id", "tick", "role", "x", "y", "yaw_deg", "speed", "collisions", "lane_invasions",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "elapsed_secs", "status", "commands"])?;

        let mut criteria = Writer::from_path(dir.join("criteria.csv"))?;
        criteria.write_record([
            "actor_id", "criterion", "optional", "status", "verdict", "actual", "expected", "acceptable", "message",
        ])?;

        Ok(Self { snapshots, summaries, criteria, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[ActorSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.actor_id.to_string(),
                row.tick.to_string(),
                row.role.to_string(),
                format!("{:.3}", row.x),
                format!("{:.3}", row.y),
                format!("{:.2}", row.yaw_deg),
                format!("{:.3}", row.speed),
                row.collisions.to_string(),
                row.lane_invasions.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.elapsed_secs),
            row.status.to_string(),
            row.commands.to_string(),
        ])?;
        Ok(())
    }

    fn write_criteria(&mut self, rows: &[CriterionRow]) -> OutputResult<()> {
        for row in rows {
            self.criteria.write_record(&[
                row.actor_id.to_string(),
                row.name.clone(),
                (row.optional as u8).to_string(),
                row.status.to_string(),
                row.verdict.to_string(),
                format!("{:.3}", row.actual),
                format!("{:.3}", row.expected),
                row.acceptable.map(|a| format!("{a:.3}")).unwrap_or_default(),
                row.message.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.criteria.flush()?;
        Ok(())
    }
}
