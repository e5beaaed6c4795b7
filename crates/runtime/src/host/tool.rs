//! Watering can and the actor's hands.

use bot_content::CanSpec;
use bot_core::{Tile, ToolBelt, ToolCheck, ToolHandle, ToolOutcome};

use super::FarmError;

/// Depletable watering can.
///
/// Firing the can only spends water and queues the target tile; the host
/// applies the strikes to the farm once the tick is over.
#[derive(Debug, Clone, PartialEq)]
pub struct WateringCan {
    charge: u32,
    capacity: u32,
    strikes: Vec<Tile>,
}

impl WateringCan {
    pub fn from_spec(spec: CanSpec) -> Result<Self, FarmError> {
        if spec.capacity == 0 {
            return Err(FarmError::ZeroCapacity);
        }
        if spec.charge > spec.capacity {
            return Err(FarmError::ChargeExceedsCapacity {
                charge: spec.charge,
                capacity: spec.capacity,
            });
        }

        Ok(Self {
            charge: spec.charge,
            capacity: spec.capacity,
            strikes: Vec::new(),
        })
    }

    /// Drains the tiles hit since the last call.
    pub fn take_strikes(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.strikes)
    }
}

impl ToolHandle for WateringCan {
    fn charge(&self) -> u32 {
        self.charge
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn set_charge(&mut self, charge: u32) {
        self.charge = charge.min(self.capacity);
    }

    fn invoke(&mut self, target: Tile) -> ToolOutcome {
        if self.charge == 0 {
            return ToolOutcome::Empty;
        }
        self.charge -= 1;
        self.strikes.push(target);
        ToolOutcome::Applied
    }
}

/// What the actor is carrying. The can stays in the inventory when not held.
#[derive(Debug, Clone, PartialEq)]
pub struct Hands {
    can: WateringCan,
    holding_can: bool,
}

impl Hands {
    pub fn holding(can: WateringCan) -> Self {
        Self {
            can,
            holding_can: true,
        }
    }

    pub fn can(&self) -> &WateringCan {
        &self.can
    }

    pub fn can_mut(&mut self) -> &mut WateringCan {
        &mut self.can
    }

    pub fn is_holding_can(&self) -> bool {
        self.holding_can
    }

    pub fn set_holding_can(&mut self, holding: bool) {
        self.holding_can = holding;
    }
}

impl ToolBelt for Hands {
    fn required_tool(&mut self) -> ToolCheck<'_> {
        if self.holding_can {
            ToolCheck::HasRequiredTool(&mut self.can)
        } else {
            ToolCheck::Missing
        }
    }
}
