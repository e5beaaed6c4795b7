//! On/off switch and tool-presence gate.
//!
//! The switch itself is a plain flag; UI affordances (buttons, hotkeys, HUD
//! badges) live in the host and only call [`AgentContext::set_active`] or
//! [`AgentContext::toggle_active`](crate::AgentContext::toggle_active).
//!
//! [`AgentContext::set_active`]: crate::AgentContext::set_active

use crate::env::{ToolBelt, ToolCheck, ToolHandle};
use crate::error::HaltReason;

/// Activation flag for one agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivationToggle {
    active: bool,
}

impl ActivationToggle {
    pub const fn new(active: bool) -> Self {
        Self { active }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the flag. Returns `true` when the value changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    pub const fn label(&self) -> &'static str {
        if self.active { "ON" } else { "OFF" }
    }
}

/// Resolves the tool the agent works with, or the reason it cannot work.
pub fn require_tool<B>(belt: &mut B) -> Result<&mut dyn ToolHandle, HaltReason>
where
    B: ToolBelt + ?Sized,
{
    match belt.required_tool() {
        ToolCheck::HasRequiredTool(tool) => Ok(tool),
        ToolCheck::Missing => Err(HaltReason::PreconditionUnmet),
    }
}
