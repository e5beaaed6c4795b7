use crate::state::Tile;

/// Result of firing the tool at a tile, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolOutcome {
    /// The tool affected the target tile.
    Applied,
    /// The tool fired but nothing at the target reacted.
    NoEffect,
    /// The tool had no charge left.
    Empty,
}

/// Host-side handle on the depletable tool.
///
/// Implementations keep `charge` within `[0, capacity]`.
pub trait ToolHandle {
    fn charge(&self) -> u32;

    fn capacity(&self) -> u32;

    /// Sets the charge, clamped to `capacity`.
    fn set_charge(&mut self, charge: u32);

    /// Fires the tool at `target`. World changes are the host's to apply.
    fn invoke(&mut self, target: Tile) -> ToolOutcome;

    fn is_empty(&self) -> bool {
        self.charge() == 0
    }
}

/// Outcome of asking the host for the tool the agent needs.
pub enum ToolCheck<'a> {
    HasRequiredTool(&'a mut dyn ToolHandle),
    Missing,
}

impl ToolCheck<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, ToolCheck::Missing)
    }
}

/// Capability query for the currently held tool.
pub trait ToolBelt {
    fn required_tool(&mut self) -> ToolCheck<'_>;
}
