//! How a run ended, and the report handed to observers afterwards.

use std::collections::BTreeMap;
use std::fmt;

use sr_core::ActorId;
use sr_criteria::{CriterionRecord, Verdict};

/// Terminal state of a scenario run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Outcome {
    /// The behavior tree returned `Success`.
    Success,
    /// The behavior tree returned `Failure`.
    Failure,
    /// The timeout elapsed with the tree still running.
    Timeout,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
            Outcome::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything known about a finished run.
#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub name:           String,
    pub outcome:        Outcome,
    /// Ticks the tree was actually ticked.
    pub ticks:          u64,
    pub simulated_secs: f64,
    /// Criterion records grouped by actor, in insertion order.
    pub records:        BTreeMap<ActorId, Vec<CriterionRecord>>,
    /// Verdict over all non-optional criteria.
    pub overall:        Verdict,
}

impl ScenarioReport {
    /// The tree succeeded and no mandatory criterion failed or stayed
    /// undetermined.
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Success && self.overall == Verdict::Pass
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} after {} ticks ({:.2} s), criteria {}",
            self.name, self.outcome, self.ticks, self.simulated_secs, self.overall
        )?;
        writeln!(f, "{:<12} {:<22} {:<10} {:>10} {:>10}", "actor", "criterion", "status", "actual", "expected")?;
        for (actor, records) in &self.records {
            for r in records {
                let name = if r.optional { format!("{} (opt)", r.name) } else { r.name.clone() };
                writeln!(
                    f,
                    "{:<12} {:<22} {:<10} {:>10.2} {:>10.2}",
                    actor.to_string(),
                    name,
                    r.status.as_str(),
                    r.actual_value,
                    r.expected_success
                )?;
            }
        }
        Ok(())
    }
}
