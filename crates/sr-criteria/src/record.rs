use std::fmt;

use sr_core::ActorId;

/// Progress of a single criterion.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum TestStatus {
    /// Not evaluated yet.
    #[default]
    Init,
    Running,
    Success,
    /// Short of success but not a failure.
    Acceptable,
    Failure,
}

impl TestStatus {
    /// What the status means once the run is over.  A criterion still
    /// `Running` never reached its goal.
    pub fn verdict(self) -> Verdict {
        match self {
            TestStatus::Init => Verdict::Undetermined,
            TestStatus::Success | TestStatus::Acceptable => Verdict::Pass,
            TestStatus::Running | TestStatus::Failure => Verdict::Fail,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Init       => "INIT",
            TestStatus::Running    => "RUNNING",
            TestStatus::Success    => "SUCCESS",
            TestStatus::Acceptable => "ACCEPTABLE",
            TestStatus::Failure    => "FAILURE",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Verdict {
    Pass,
    Fail,
    Undetermined,
}

impl Verdict {
    /// Fold several verdicts: any `Fail` fails, otherwise any
    /// `Undetermined` leaves the result open.  No verdicts at all pass.
    pub fn combine(verdicts: impl IntoIterator<Item = Verdict>) -> Verdict {
        let mut result = Verdict::Pass;
        for v in verdicts {
            match v {
                Verdict::Fail => return Verdict::Fail,
                Verdict::Undetermined => result = Verdict::Undetermined,
                Verdict::Pass => {}
            }
        }
        result
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass         => "PASS",
            Verdict::Fail         => "FAIL",
            Verdict::Undetermined => "UNDETERMINED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one criterion, as reported after (or during) a run.
#[derive(Clone, Debug, PartialEq)]
pub struct CriterionRecord {
    pub name:                String,
    pub actor:               ActorId,
    /// Optional criteria are reported but ignored by the overall verdict.
    pub optional:            bool,
    pub status:              TestStatus,
    pub actual_value:        f64,
    pub expected_success:    f64,
    pub expected_acceptable: Option<f64>,
    pub message:             Option<String>,
}

impl CriterionRecord {
    pub fn verdict(&self) -> Verdict {
        self.status.verdict()
    }
}
