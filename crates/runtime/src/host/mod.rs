//! Simulated host world the agent runs inside.
//!
//! [`SimHost`] owns the farm, the actor and the watering can, and implements
//! one fixed update step: run the agent's tick against borrowed views of the
//! world, then apply what the tick asked for (tool strikes, walking).
mod actor;
mod farm;
mod tool;

pub use actor::SimActor;
pub use farm::{FarmError, FarmSnapshot, SimFarm};
pub use tool::{Hands, WateringCan};

use bot_content::FarmLayout;
use bot_core::{
    ActorHandle, AgentContext, AgentStateMachine, Env, Notice, TickOutcome, Tile, ToolHandle,
    ToolOutcome,
};

use crate::runtime::SimConfig;

/// Everything one update step produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub tick: u64,
    /// What the machine did. An `Acted` strike that changed no plot is
    /// reported as [`ToolOutcome::NoEffect`].
    pub outcome: TickOutcome,
    /// Plots that turned from dry to watered this step.
    pub watered: Vec<Tile>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub struct SimHost {
    farm: SimFarm,
    actor: SimActor,
    hands: Hands,
    notices: Vec<Notice>,
    config: SimConfig,
    tick: u64,
}

impl SimHost {
    pub fn from_layout(layout: &FarmLayout, config: SimConfig) -> Result<Self, FarmError> {
        let farm = SimFarm::from_layout(layout)?;
        let can = WateringCan::from_spec(layout.can)?;

        Ok(Self {
            farm,
            actor: SimActor::new(layout.actor, config.animation_ticks),
            hands: Hands::holding(can),
            notices: Vec::new(),
            config,
            tick: 0,
        })
    }

    pub fn farm(&self) -> &SimFarm {
        &self.farm
    }

    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    pub fn hands_mut(&mut self) -> &mut Hands {
        &mut self.hands
    }

    #[cfg(test)]
    pub(crate) fn farm_mut(&mut self) -> &mut SimFarm {
        &mut self.farm
    }

    /// Steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Runs one update step.
    pub fn step(&mut self, machine: &AgentStateMachine, ctx: &mut AgentContext) -> StepReport {
        self.tick += 1;

        let outcome = {
            let mut env = Env::new(
                &self.farm,
                &mut self.actor,
                &mut self.hands,
                &mut self.notices,
            );
            machine.tick(ctx, &mut env)
        };

        let watered: Vec<Tile> = self
            .hands
            .can_mut()
            .take_strikes()
            .into_iter()
            .filter(|tile| self.farm.water_plot(*tile))
            .collect();

        let outcome = match outcome {
            TickOutcome::Acted {
                target,
                outcome: ToolOutcome::Applied,
            } if !watered.contains(&target) => TickOutcome::Acted {
                target,
                outcome: ToolOutcome::NoEffect,
            },
            other => other,
        };

        self.actor.physics_step(&self.farm, self.config.walk_speed);

        StepReport {
            tick: self.tick,
            outcome,
            watered,
            notices: std::mem::take(&mut self.notices),
        }
    }

    /// Current position, facing and can level, for status queries.
    pub fn summary(&self) -> HostSummary {
        HostSummary {
            tick: self.tick,
            position: self.actor.position(),
            facing: self.actor.facing(),
            charge: self.hands.can().charge(),
            capacity: self.hands.can().capacity(),
            holding_can: self.hands.is_holding_can(),
            dry_plots: self.farm.dry_plots(),
        }
    }
}

/// Host-side half of a status snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSummary {
    pub tick: u64,
    pub position: bot_core::Position,
    pub facing: bot_core::Direction,
    pub charge: u32,
    pub capacity: u32,
    pub holding_can: bool,
    pub dry_plots: usize,
}
