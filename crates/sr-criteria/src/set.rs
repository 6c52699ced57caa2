//! The criteria attached to one scenario.

use std::collections::BTreeMap;

use tracing::debug;

use sr_core::ActorId;
use sr_world::TickContext;

use crate::{Criterion, CriterionRecord, Verdict};

#[derive(Default)]
pub struct CriteriaSet {
    criteria: Vec<Box<dyn Criterion>>,
}

impl CriteriaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, criterion: impl Criterion + 'static) {
        self.criteria.push(Box::new(criterion));
    }

    pub fn with(mut self, criterion: impl Criterion + 'static) -> Self {
        self.add(criterion);
        self
    }

    pub fn add_boxed(&mut self, criterion: Box<dyn Criterion>) {
        self.criteria.push(criterion);
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Criterion> + '_ {
        self.criteria.iter().map(|c| c.as_ref())
    }

    /// Update every criterion against `ctx`, in insertion order.
    pub fn update_all(&mut self, ctx: &TickContext<'_>) {
        for c in &mut self.criteria {
            let before = c.record().status;
            c.update(ctx);
            let after = c.record().status;
            if before != after {
                debug!(
                    criterion = c.name(),
                    actor = %c.actor(),
                    tick = ctx.tick.0,
                    from = %before,
                    to = %after,
                    "criterion status changed"
                );
            }
        }
    }

    pub fn records(&self) -> Vec<CriterionRecord> {
        self.criteria.iter().map(|c| c.record()).collect()
    }

    /// Records grouped by actor, each group in insertion order.
    pub fn by_actor(&self) -> BTreeMap<ActorId, Vec<CriterionRecord>> {
        let mut out: BTreeMap<ActorId, Vec<CriterionRecord>> = BTreeMap::new();
        for c in &self.criteria {
            out.entry(c.actor()).or_default().push(c.record());
        }
        out
    }

    /// Per-actor verdict over that actor's non-optional criteria.
    pub fn verdicts_by_actor(&self) -> BTreeMap<ActorId, Verdict> {
        self.by_actor()
            .into_iter()
            .map(|(actor, records)| {
                let v = Verdict::combine(records.iter().filter(|r| !r.optional).map(CriterionRecord::verdict));
                (actor, v)
            })
            .collect()
    }

    /// Verdict over every non-optional criterion.
    pub fn overall(&self) -> Verdict {
        Verdict::combine(self.criteria.iter().filter(|c| !c.optional()).map(|c| c.final_verdict()))
    }
}
