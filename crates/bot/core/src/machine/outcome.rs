use crate::env::ToolOutcome;
use crate::error::HaltReason;
use crate::state::{AgentState, Direction, StateKind, Tile};

/// What a single tick did.
///
/// Hosts log or display this; the machine itself never inspects it again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The agent is switched off.
    Inactive,
    /// The actor is mid-animation or moved by something else.
    Busy,
    /// A pre- or post-action delay is counting down.
    Delayed { remaining: u32 },
    /// Idle picked a new target.
    Targeted { state: AgentState },
    /// Walking toward the target. `direction` is `None` when already aligned.
    Moving {
        target: Tile,
        direction: Option<Direction>,
    },
    /// Reached the target and turned to face it.
    Arrived {
        target: Tile,
        facing: Direction,
        next: StateKind,
    },
    /// Watered a plot.
    Acted { target: Tile, outcome: ToolOutcome },
    /// Filled the tool back up.
    Refilled { target: Tile, charge: u32 },
    /// Disabled itself.
    Halted(HaltReason),
}

impl TickOutcome {
    pub const fn halt_reason(&self) -> Option<HaltReason> {
        match self {
            TickOutcome::Halted(reason) => Some(*reason),
            _ => None,
        }
    }
}
