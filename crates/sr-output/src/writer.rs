//! The `OutputWriter` trait implemented by output backends.

use crate::{ActorSnapshotRow, CriterionRow, OutputResult, TickSummaryRow};

/// A sink for scenario output rows.
///
/// Errors are returned to the caller; [`ScenarioOutputObserver`]
/// stores the first one for [`take_error`].
///
/// [`ScenarioOutputObserver`]: crate::ScenarioOutputObserver
/// [`take_error`]: crate::ScenarioOutputObserver::take_error
pub trait OutputWriter {
    fn write_snapshots(&mut self, rows: &[ActorSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    fn write_criteria(&mut self, rows: &[CriterionRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
