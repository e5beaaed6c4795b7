//! Snapshots returned by status queries.
use bot_core::{AgentState, Direction, HaltReason, Position};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the agent and the actor it drives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub tick: u64,
    pub active: bool,
    pub state: AgentState,
    pub action_timer: u32,
    pub position: Position,
    pub facing: Direction,
    pub charge: u32,
    pub capacity: u32,
    pub holding_can: bool,
    pub dry_plots: usize,
    /// Why the agent last stopped on its own, if it ever did.
    pub last_halt: Option<HaltReason>,
}

/// Result of running the agent until it stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HaltSummary {
    pub reason: HaltReason,
    /// Ticks spent in this run, including the halting one.
    pub ticks: u64,
    pub status: AgentStatus,
}
