//! Composite behaviors.
//!
//! Composites are behaviors too, so trees nest freely.  Both kinds return
//! `Success` when they have no children.

use sr_world::{Command, TickContext};

use crate::{Behavior, Node, Status};

// ── Sequence ──────────────────────────────────────────────────────────────────

/// Runs children one after another.
///
/// Ticks the current child; on `Success` moves to the next child within the
/// same tick.  `Failure` of any child is returned at once and no later child
/// is ever ticked.
pub struct Sequence {
    name:     String,
    children: Vec<Node>,
    current:  usize,
}

impl Sequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new(), current: 0 }
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

}

impl Behavior for Sequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Node] {
        &self.children
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        while let Some(child) = self.children.get_mut(self.current) {
            match child.tick(ctx, commands) {
                Status::Success => self.current += 1,
                other => return other,
            }
        }
        Status::Success
    }
}

// ── Parallel ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ParallelPolicy {
    /// Succeed as soon as any child succeeds.
    #[default]
    SuccessOnOne,
    /// Succeed once every child has succeeded.
    SuccessOnAll,
}

/// Ticks every unfinished child once per tick, in attachment order, then
/// aggregates.  Any child `Failure` fails the parallel.
///
/// Once the parallel resolves its node is terminal, so children that were
/// still running are simply never ticked again.
pub struct Parallel {
    name:     String,
    policy:   ParallelPolicy,
    children: Vec<Node>,
}

impl Parallel {
    pub fn new(name: impl Into<String>, policy: ParallelPolicy) -> Self {
        Self { name: name.into(), policy, children: Vec::new() }
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn policy(&self) -> ParallelPolicy {
        self.policy
    }
}

impl Behavior for Parallel {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> &[Node] {
        &self.children
    }

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        for child in self.children.iter_mut().filter(|c| !c.is_terminal()) {
            child.tick(ctx, commands);
        }

        let statuses = || self.children.iter().filter_map(Node::status);
        if statuses().any(|s| s == Status::Failure) {
            return Status::Failure;
        }
        let succeeded = statuses().filter(|&s| s == Status::Success).count();
        let done = match self.policy {
            ParallelPolicy::SuccessOnOne => succeeded > 0 || self.children.is_empty(),
            ParallelPolicy::SuccessOnAll => succeeded == self.children.len(),
        };
        if done { Status::Success } else { Status::Running }
    }
}
