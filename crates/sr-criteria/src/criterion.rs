//! The `Criterion` trait.

use sr_core::ActorId;
use sr_world::TickContext;

use crate::{CriterionRecord, TestStatus, Verdict};

/// A measurement on one actor, updated once per tick.
///
/// `update` may be called on every tick of the run, including after the
/// criterion has reached `Success` or `Failure`; implementations decide
/// whether their status is sticky.
pub trait Criterion {
    fn name(&self) -> &str;

    fn actor(&self) -> ActorId;

    fn optional(&self) -> bool {
        false
    }

    fn update(&mut self, ctx: &TickContext<'_>);

    fn record(&self) -> CriterionRecord;

    fn final_verdict(&self) -> Verdict {
        self.record().status.verdict()
    }
}

/// Bookkeeping every criterion carries.
#[derive(Clone, Debug, PartialEq)]
pub struct CriterionState {
    pub name:                String,
    pub actor:               ActorId,
    pub optional:            bool,
    pub status:              TestStatus,
    pub actual_value:        f64,
    pub expected_success:    f64,
    pub expected_acceptable: Option<f64>,
    pub message:             Option<String>,
}

impl CriterionState {
    pub fn new(name: impl Into<String>, actor: ActorId, expected_success: f64) -> Self {
        Self {
            name: name.into(),
            actor,
            optional: false,
            status: TestStatus::Init,
            actual_value: 0.0,
            expected_success,
            expected_acceptable: None,
            message: None,
        }
    }

    pub fn record(&self) -> CriterionRecord {
        CriterionRecord {
            name:                self.name.clone(),
            actor:               self.actor,
            optional:            self.optional,
            status:              self.status,
            actual_value:        self.actual_value,
            expected_success:    self.expected_success,
            expected_acceptable: self.expected_acceptable,
            message:             self.message.clone(),
        }
    }
}

/// `Criterion` accessors for a type holding its `CriterionState` in
/// `self.state`.
macro_rules! criterion_accessors {
    () => {
        fn name(&self) -> &str {
            &self.state.name
        }

        fn actor(&self) -> sr_core::ActorId {
            self.state.actor
        }

        fn optional(&self) -> bool {
            self.state.optional
        }

        fn record(&self) -> $crate::CriterionRecord {
            self.state.record()
        }
    };
}

pub(crate) use criterion_accessors;
