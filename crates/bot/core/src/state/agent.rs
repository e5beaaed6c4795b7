use super::Tile;
use crate::machine::StallWatchdog;
use crate::toggle::ActivationToggle;

/// Current phase of the agent.
///
/// Every phase other than [`AgentState::Idle`] carries the tile it is working
/// toward, so a target exists exactly when the agent is not idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Idle,
    MovingToWork {
        target: Tile,
    },
    Acting {
        target: Tile,
    },
    MovingToRefillSite {
        target: Tile,
    },
    Refilling {
        target: Tile,
    },
}

impl AgentState {
    pub const fn target(&self) -> Option<Tile> {
        match *self {
            AgentState::Idle => None,
            AgentState::MovingToWork { target }
            | AgentState::Acting { target }
            | AgentState::MovingToRefillSite { target }
            | AgentState::Refilling { target } => Some(target),
        }
    }

    pub const fn kind(&self) -> StateKind {
        match self {
            AgentState::Idle => StateKind::Idle,
            AgentState::MovingToWork { .. } => StateKind::MovingToWork,
            AgentState::Acting { .. } => StateKind::Acting,
            AgentState::MovingToRefillSite { .. } => StateKind::MovingToRefillSite,
            AgentState::Refilling { .. } => StateKind::Refilling,
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, AgentState::Idle)
    }

    pub const fn is_moving(&self) -> bool {
        matches!(
            self,
            AgentState::MovingToWork { .. } | AgentState::MovingToRefillSite { .. }
        )
    }
}

/// Payload-free label of an [`AgentState`], for display and event payloads.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Idle,
    MovingToWork,
    Acting,
    MovingToRefillSite,
    Refilling,
}

/// Mutable agent state owned by exactly one driver.
///
/// The host keeps one context per agent and hands it to
/// [`AgentStateMachine::tick`](crate::AgentStateMachine::tick) every update
/// step. Nothing else writes to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentContext {
    pub(crate) state: AgentState,
    pub(crate) action_timer: u32,
    pub(crate) toggle: ActivationToggle,
    pub(crate) watchdog: StallWatchdog,
}

impl AgentContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn target(&self) -> Option<Tile> {
        self.state.target()
    }

    /// Remaining ticks before the next transition may fire.
    pub fn action_timer(&self) -> u32 {
        self.action_timer
    }

    pub fn toggle(&self) -> &ActivationToggle {
        &self.toggle
    }

    pub fn is_active(&self) -> bool {
        self.toggle.is_active()
    }

    /// Turns the agent on or off. Any change of the flag restarts from Idle.
    pub fn set_active(&mut self, active: bool) {
        if self.toggle.set_active(active) {
            self.reset();
        }
    }

    /// Flips the activation flag and returns the new value.
    pub fn toggle_active(&mut self) -> bool {
        let active = self.toggle.toggle();
        self.reset();
        active
    }

    pub(crate) fn transition(&mut self, next: AgentState) {
        if next.kind() != self.state.kind() || next.target() != self.state.target() {
            self.watchdog.reset();
        }
        self.state = next;
    }

    /// Drops the current target and any pending delay.
    pub(crate) fn reset(&mut self) {
        self.state = AgentState::Idle;
        self.action_timer = 0;
        self.watchdog.reset();
    }

    /// Disables the agent after a terminal condition.
    pub(crate) fn disable(&mut self) {
        self.toggle.set_active(false);
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn target_present_iff_not_idle() {
        let tile = Tile::new(2, 0);
        let states = [
            AgentState::Idle,
            AgentState::MovingToWork { target: tile },
            AgentState::Acting { target: tile },
            AgentState::MovingToRefillSite { target: tile },
            AgentState::Refilling { target: tile },
        ];

        for state in states {
            assert_eq!(state.target().is_some(), !state.is_idle(), "{state:?}");
        }
    }

    #[test]
    fn kinds_cover_every_state() {
        let labels: Vec<&'static str> = StateKind::iter().map(Into::into).collect();
        assert_eq!(
            labels,
            vec![
                "Idle",
                "MovingToWork",
                "Acting",
                "MovingToRefillSite",
                "Refilling"
            ]
        );
    }

    #[test]
    fn toggling_resets_to_idle() {
        let mut ctx = AgentContext::new();
        ctx.set_active(true);
        ctx.state = AgentState::Acting {
            target: Tile::new(1, 1),
        };
        ctx.action_timer = 7;

        assert!(!ctx.toggle_active());
        assert_eq!(ctx.state(), AgentState::Idle);
        assert_eq!(ctx.target(), None);
        assert_eq!(ctx.action_timer(), 0);
    }

    #[test]
    fn redundant_enable_keeps_progress() {
        let mut ctx = AgentContext::new();
        ctx.set_active(true);
        ctx.state = AgentState::MovingToWork {
            target: Tile::new(4, 4),
        };

        ctx.set_active(true);

        assert_eq!(ctx.target(), Some(Tile::new(4, 4)));
    }
}
