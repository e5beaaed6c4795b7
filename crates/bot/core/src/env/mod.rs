//! Traits describing the host the agent runs inside.
//!
//! The machine never owns world data. It reads the grid through
//! [`WorldQuery`], steers the actor through [`ActorHandle`], fires the tool
//! through [`ToolHandle`] (resolved per tick by [`ToolBelt`]) and reports
//! terminal conditions through [`Notifier`]. The [`Env`] aggregate bundles one
//! borrow of each so a tick sees a consistent host.
mod actor;
mod notify;
mod tool;
mod world;

pub use actor::{ActorHandle, AnimationId};
pub use notify::{Notice, Notifier};
pub use tool::{ToolBelt, ToolCheck, ToolHandle, ToolOutcome};
pub use world::{Wetness, WorkSite, WorldQuery};

/// Borrowed host surfaces for a single tick.
///
/// Fields are public so the machine can hold the actor and the tool at the
/// same time.
pub struct Env<'a> {
    pub world: &'a dyn WorldQuery,
    pub actor: &'a mut dyn ActorHandle,
    pub tools: &'a mut dyn ToolBelt,
    pub notifier: &'a mut dyn Notifier,
}

impl<'a> Env<'a> {
    pub fn new(
        world: &'a dyn WorldQuery,
        actor: &'a mut dyn ActorHandle,
        tools: &'a mut dyn ToolBelt,
        notifier: &'a mut dyn Notifier,
    ) -> Self {
        Self {
            world,
            actor,
            tools,
            notifier,
        }
    }
}
