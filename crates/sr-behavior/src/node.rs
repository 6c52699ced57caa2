//! The `Behavior` trait and the `Node` lifecycle wrapper.

use tracing::debug;

use sr_world::{Command, TickContext};

use crate::Status;

/// A unit of scenario logic, ticked once per simulation step.
///
/// Only [`update`][Self::update] is required.  Implementations read the
/// world through `ctx.world` and express what actors should do by pushing
/// [`Command`]s; they must return promptly and never wait on the world.
///
/// Behaviors are driven through a [`Node`], which calls
/// [`initialise`][Self::initialise] exactly once before the first update
/// and stops calling `update` once a terminal status has been returned.
pub trait Behavior {
    fn name(&self) -> &str;

    /// Called once, on the first tick, before the first `update`.
    fn initialise(&mut self, _ctx: &TickContext<'_>) {}

    fn update(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status;

    /// Child nodes, for composites.
    fn children(&self) -> &[Node] {
        &[]
    }
}

/// A tree slot owning one behavior and its lifecycle state.
///
/// `status()` is `None` until the first tick (the "created" state).
pub struct Node {
    behavior: Box<dyn Behavior>,
    status:   Option<Status>,
    ticks:    u64,
}

impl Node {
    pub fn new(behavior: impl Behavior + 'static) -> Self {
        Self { behavior: Box::new(behavior), status: None, ticks: 0 }
    }

    pub fn name(&self) -> &str {
        self.behavior.name()
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_some_and(Status::is_terminal)
    }

    pub fn children(&self) -> &[Node] {
        self.behavior.children()
    }

    /// How many times `update` has run.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self, ctx: &TickContext<'_>, commands: &mut Vec<Command>) -> Status {
        if let Some(status) = self.status {
            if status.is_terminal() {
                return status;
            }
        } else {
            self.behavior.initialise(ctx);
        }

        let status = self.behavior.update(ctx, commands);
        self.ticks += 1;
        if self.status != Some(status) {
            debug!(
                node = self.behavior.name(),
                tick = ctx.tick.0,
                from = ?self.status,
                to = %status,
                "status changed"
            );
        }
        self.status = Some(status);
        status
    }
}

impl<B: Behavior + 'static> From<B> for Node {
    fn from(behavior: B) -> Self {
        Node::new(behavior)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("status", &self.status)
            .field("ticks", &self.ticks)
            .finish()
    }
}
