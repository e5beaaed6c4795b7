//! Value types shared by the decision logic and its hosts.
mod agent;
mod common;

pub use agent::{AgentContext, AgentState, StateKind};
pub use common::{Direction, Position, Tile};
