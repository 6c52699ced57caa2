//! Plain data row types written by output backends.

use sr_criteria::CriterionRecord;

/// One actor's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshotRow {
    pub actor_id:       u32,
    pub tick:           u64,
    pub role:           &'static str,
    pub x:              f32,
    pub y:              f32,
    pub yaw_deg:        f32,
    pub speed:          f32,
    pub collisions:     u32,
    pub lane_invasions: u32,
}

/// What happened in one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    /// Root status after the tick.
    pub status:       &'static str,
    pub commands:     u64,
}

/// A criterion's final record.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionRow {
    pub actor_id:   u32,
    pub name:       String,
    pub optional:   bool,
    pub status:     &'static str,
    pub verdict:    &'static str,
    pub actual:     f64,
    pub expected:   f64,
    /// Absent when the criterion has no acceptable threshold.
    pub acceptable: Option<f64>,
    pub message:    String,
}

impl From<&CriterionRecord> for CriterionRow {
    fn from(r: &CriterionRecord) -> Self {
        Self {
            actor_id:   r.actor.0,
            name:       r.name.clone(),
            optional:   r.optional,
            status:     r.status.as_str(),
            verdict:    r.verdict().as_str(),
            actual:     r.actual_value,
            expected:   r.expected_success,
            acceptable: r.expected_acceptable,
            message:    r.message.clone().unwrap_or_default(),
        }
    }
}
