//! `sr-output` — writes what a scenario run did to disk.
//!
//! | File                  | One row per                                  |
//! |-----------------------|----------------------------------------------|
//! | `actor_snapshots.csv` | actor per snapshot tick                      |
//! | `tick_summaries.csv`  | tick: elapsed time, tree status, commands    |
//! | `criteria.csv`        | criterion, written once the run has ended    |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`ScenarioOutputObserver`], which implements
//! `sr_scenario::ScenarioObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sr_output::{CsvWriter, ScenarioOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ScenarioOutputObserver::new(writer, &scenario.config);
//! scenario.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ScenarioOutputObserver;
pub use row::{ActorSnapshotRow, CriterionRow, TickSummaryRow};
pub use writer::OutputWriter;
