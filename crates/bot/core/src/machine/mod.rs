//! The per-tick decision machine.
//!
//! ```text
//!          charge == 0, water found           arrived
//!   Idle ───────────────────────────▶ MovingToRefillSite ───────▶ Refilling
//!    │ ▲                                                              │
//!    │ └──────────────────── fire tool, refill, wait ◀────────────────┘
//!    │ ▲
//!    │ └──────────────────── fire tool, wait ◀──────── Acting
//!    │                                                   ▲
//!    └──────────────────────▶ MovingToWork ──────────────┘
//!       charge > 0, dry plot found          arrived
//! ```
//!
//! Every tick first passes the gate (switched on, actor not busy, no pending
//! delay, tool held) and then evaluates at most one transition.
mod outcome;
mod stall;

pub use outcome::TickOutcome;
pub use stall::StallWatchdog;

use crate::config::BotConfig;
use crate::env::{
    ActorHandle, AnimationId, Env, Notice, Notifier, ToolHandle, ToolOutcome, WorldQuery,
};
use crate::error::{ConfigError, HaltReason};
use crate::motion::MotionController;
use crate::search::SpatialSearch;
use crate::state::{AgentContext, AgentState, Position, Tile};
use crate::toggle::require_tool;

/// Stateless policy driving an [`AgentContext`].
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStateMachine {
    config: BotConfig,
    search: SpatialSearch,
    motion: MotionController,
}

impl AgentStateMachine {
    /// Builds a machine from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field reported by [`BotConfig::validate`].
    pub fn new(config: BotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            search: SpatialSearch::new(config.search_radius),
            motion: MotionController::from_config(&config),
            config,
        })
    }

    /// Advances the agent by one tick.
    pub fn tick(&self, ctx: &mut AgentContext, env: &mut Env<'_>) -> TickOutcome {
        if !ctx.is_active() {
            return TickOutcome::Inactive;
        }

        if env.actor.is_busy() {
            return TickOutcome::Busy;
        }

        if ctx.action_timer > 0 {
            ctx.action_timer -= 1;
            return TickOutcome::Delayed {
                remaining: ctx.action_timer,
            };
        }

        let tool = match require_tool(&mut *env.tools) {
            Ok(tool) => tool,
            Err(reason) => return self.halt(ctx, &mut *env.notifier, reason),
        };

        match ctx.state {
            AgentState::Idle => self.decide(
                ctx,
                env.world,
                env.actor.position(),
                tool.charge(),
                &mut *env.notifier,
            ),
            AgentState::MovingToWork { target } => {
                self.approach(ctx, &mut *env.actor, &mut *env.notifier, target, false)
            }
            AgentState::MovingToRefillSite { target } => {
                self.approach(ctx, &mut *env.actor, &mut *env.notifier, target, true)
            }
            AgentState::Acting { target } => {
                let outcome = self.fire(ctx, &mut *env.actor, tool, target);
                ctx.transition(AgentState::Idle);
                TickOutcome::Acted { target, outcome }
            }
            AgentState::Refilling { target } => {
                self.fire(ctx, &mut *env.actor, &mut *tool, target);
                let capacity = tool.capacity();
                tool.set_charge(capacity);
                ctx.transition(AgentState::Idle);
                TickOutcome::Refilled {
                    target,
                    charge: tool.charge(),
                }
            }
        }
    }

    /// Idle: pick the next target, or stop when there is nothing to do.
    fn decide(
        &self,
        ctx: &mut AgentContext,
        world: &dyn WorldQuery,
        origin: Position,
        charge: u32,
        notifier: &mut dyn Notifier,
    ) -> TickOutcome {
        let next = if charge == 0 {
            match self.search.nearest_water_adjacency(origin, world) {
                Some(target) => AgentState::MovingToRefillSite { target },
                None => {
                    let radius = self.search.radius();
                    return self.halt(ctx, notifier, HaltReason::ResourceExhausted { radius });
                }
            }
        } else {
            match self.search.nearest_eligible_work_site(origin, world) {
                Some(target) => AgentState::MovingToWork { target },
                None => return self.halt(ctx, notifier, HaltReason::WorkComplete),
            }
        };

        ctx.transition(next);
        TickOutcome::Targeted { state: next }
    }

    /// Moving states: walk one step, or settle in front of the target.
    fn approach(
        &self,
        ctx: &mut AgentContext,
        actor: &mut dyn ActorHandle,
        notifier: &mut dyn Notifier,
        target: Tile,
        refill: bool,
    ) -> TickOutcome {
        let position = actor.position();

        if self.motion.has_arrived(position, target) {
            actor.halt();
            let facing = self.motion.face_target(position, target);
            actor.face(facing);

            let next = if refill {
                AgentState::Refilling { target }
            } else {
                AgentState::Acting { target }
            };
            ctx.action_timer = self.config.pre_action_delay;
            ctx.transition(next);

            return TickOutcome::Arrived {
                target,
                facing,
                next: next.kind(),
            };
        }

        if let Some(limit) = self.config.stall_limit {
            let idle = ctx
                .watchdog
                .observe(position.distance_to(target), self.config.stall_epsilon);
            if idle >= limit {
                actor.halt();
                return self.halt(
                    ctx,
                    notifier,
                    HaltReason::Stalled {
                        target,
                        ticks: idle,
                    },
                );
            }
        }

        let direction = self.motion.step(position, target);
        if let Some(direction) = direction {
            actor.set_motion_intent(direction, true);
        }

        TickOutcome::Moving { target, direction }
    }

    /// Plays the tool animation and fires the tool at `target`.
    fn fire(
        &self,
        ctx: &mut AgentContext,
        actor: &mut dyn ActorHandle,
        tool: &mut dyn ToolHandle,
        target: Tile,
    ) -> ToolOutcome {
        let animation = AnimationId::facing(self.config.action_animation_base, actor.facing());
        actor.play_animation(animation);

        let outcome = tool.invoke(target);
        ctx.action_timer = self.config.action_duration;
        outcome
    }

    fn halt(
        &self,
        ctx: &mut AgentContext,
        notifier: &mut dyn Notifier,
        reason: HaltReason,
    ) -> TickOutcome {
        notifier.notify(Notice::new(reason.message(), reason.severity()));
        ctx.disable();
        TickOutcome::Halted(reason)
    }
}

impl Default for AgentStateMachine {
    fn default() -> Self {
        let config = BotConfig::default();
        Self {
            search: SpatialSearch::new(config.search_radius),
            motion: MotionController::from_config(&config),
            config,
        }
    }
}
