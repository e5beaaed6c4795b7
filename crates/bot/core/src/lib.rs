//! Decision logic for an autonomous watering agent on a tile grid.
//!
//! `bot-core` owns the per-tick state machine that picks a target (a dry
//! planted plot, or a land tile next to water when the can is empty), walks
//! the actor toward it and fires the tool once it arrives. Everything the
//! machine reads or mutates in the world goes through the host traits in
//! [`env`]; the crate itself performs no I/O and keeps no global state.
//!
//! A host drives one [`AgentStateMachine::tick`] per fixed update step with
//! the [`AgentContext`] it owns and an [`Env`] borrowed from its world.
pub mod config;
pub mod env;
pub mod error;
pub mod machine;
pub mod motion;
pub mod search;
pub mod state;
pub mod toggle;

#[cfg(test)]
mod fixtures;

pub use config::BotConfig;
pub use env::{
    ActorHandle, AnimationId, Env, Notice, Notifier, ToolBelt, ToolCheck, ToolHandle, ToolOutcome,
    Wetness, WorkSite, WorldQuery,
};
pub use error::{ConfigError, HaltReason, Severity};
pub use machine::{AgentStateMachine, StallWatchdog, TickOutcome};
pub use motion::MotionController;
pub use search::SpatialSearch;
pub use state::{AgentContext, AgentState, Direction, Position, StateKind, Tile};
pub use toggle::ActivationToggle;
