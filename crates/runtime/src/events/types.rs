//! Event types for different topics.

use bot_core::{HaltReason, Notice, StateKind, Tile, ToolOutcome};
use serde::{Deserialize, Serialize};

/// Events describing what the agent did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AgentEvent {
    /// The agent was switched on or off from outside.
    Activation { tick: u64, active: bool },

    /// The agent moved to a different state or target.
    Transition {
        tick: u64,
        from: StateKind,
        to: StateKind,
        target: Option<Tile>,
    },

    /// The can was fired at a plot.
    ///
    /// `outcome` is what the host observed: `NoEffect` when the strike did
    /// not change any plot.
    Acted {
        tick: u64,
        target: Tile,
        outcome: ToolOutcome,
        charge: u32,
    },

    /// The can was filled back up.
    Refilled { tick: u64, target: Tile, charge: u32 },

    /// The agent disabled itself.
    Halted { tick: u64, reason: HaltReason },
}

impl AgentEvent {
    pub fn tick(&self) -> u64 {
        match self {
            AgentEvent::Activation { tick, .. }
            | AgentEvent::Transition { tick, .. }
            | AgentEvent::Acted { tick, .. }
            | AgentEvent::Refilled { tick, .. }
            | AgentEvent::Halted { tick, .. } => *tick,
        }
    }
}

/// A player-facing message raised by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeEvent {
    pub tick: u64,
    pub notice: Notice,
}
