//! Simulation worker that owns the agent and the simulated farm.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), steps the
//! agent through [`SimHost`], and publishes events to the EventBus.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use bot_core::{AgentContext, AgentState, AgentStateMachine, HaltReason, TickOutcome, ToolHandle};

use crate::api::{AgentStatus, HaltSummary, Result, RuntimeError};
use crate::events::{AgentEvent, Event, EventBus, NoticeEvent};
use crate::host::{FarmSnapshot, SimHost, StepReport};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Switch the agent on or off. Changing the flag restarts it from Idle.
    SetActive {
        active: bool,
        reply: oneshot::Sender<AgentStatus>,
    },
    /// Flip the activation flag.
    Toggle { reply: oneshot::Sender<AgentStatus> },
    /// Take the watering can out or put it away.
    SetHoldingCan {
        holding: bool,
        reply: oneshot::Sender<AgentStatus>,
    },
    /// Run exactly `ticks` update steps, whatever the agent does.
    Advance {
        ticks: u64,
        reply: oneshot::Sender<AgentStatus>,
    },
    /// Run until the agent halts or `max_ticks` steps have passed.
    RunUntilHalt {
        max_ticks: u64,
        reply: oneshot::Sender<Result<HaltSummary>>,
    },
    /// Query the agent status (read-only).
    QueryStatus { reply: oneshot::Sender<AgentStatus> },
    /// Query the farm (read-only).
    QueryFarm { reply: oneshot::Sender<FarmSnapshot> },
}

/// Background task that processes commands.
///
/// The worker is the only owner of the [`AgentContext`] and the world, so
/// ticks never interleave.
pub struct SimulationWorker {
    machine: AgentStateMachine,
    ctx: AgentContext,
    host: SimHost,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Duration,
    last_halt: Option<HaltReason>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        machine: AgentStateMachine,
        host: SimHost,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Duration,
    ) -> Self {
        let (width, height) = host.farm().dimensions();
        info!(
            "SimulationWorker initialized with {}x{} farm, {} dry plots",
            width,
            height,
            host.farm().dry_plots()
        );

        Self {
            machine,
            ctx: AgentContext::new(),
            host,
            command_rx,
            event_bus,
            tick_interval,
            last_halt: None,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd).await;
                }
                else => break,
            }
        }
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SetActive { active, reply } => {
                if self.ctx.is_active() != active {
                    self.ctx.set_active(active);
                    self.announce_activation();
                }
                if reply.send(self.status()).is_err() {
                    debug!("SetActive reply channel closed (caller dropped)");
                }
            }
            Command::Toggle { reply } => {
                self.ctx.toggle_active();
                self.announce_activation();
                if reply.send(self.status()).is_err() {
                    debug!("Toggle reply channel closed (caller dropped)");
                }
            }
            Command::SetHoldingCan { holding, reply } => {
                self.host.hands_mut().set_holding_can(holding);
                debug!(target: "runtime::worker", holding, "Watering can held");
                if reply.send(self.status()).is_err() {
                    debug!("SetHoldingCan reply channel closed (caller dropped)");
                }
            }
            Command::Advance { ticks, reply } => {
                for _ in 0..ticks {
                    self.step();
                    self.pace().await;
                }
                if reply.send(self.status()).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::RunUntilHalt { max_ticks, reply } => {
                let result = self.run_until_halt(max_ticks).await;
                if reply.send(result).is_err() {
                    debug!("RunUntilHalt reply channel closed (caller dropped)");
                }
            }
            Command::QueryStatus { reply } => {
                if reply.send(self.status()).is_err() {
                    debug!("QueryStatus reply channel closed (caller dropped)");
                }
            }
            Command::QueryFarm { reply } => {
                if reply.send(self.host.farm().snapshot()).is_err() {
                    debug!("QueryFarm reply channel closed (caller dropped)");
                }
            }
        }
    }

    async fn run_until_halt(&mut self, max_ticks: u64) -> Result<HaltSummary> {
        if !self.ctx.is_active() {
            return Err(RuntimeError::AgentInactive);
        }

        for ran in 1..=max_ticks {
            if let Some(reason) = self.step().halt_reason() {
                return Ok(HaltSummary {
                    reason,
                    ticks: ran,
                    status: self.status(),
                });
            }
            self.pace().await;
        }

        warn!(
            target: "runtime::worker",
            max_ticks,
            state = %self.ctx.state().kind(),
            "Agent did not halt within the tick budget"
        );
        Err(RuntimeError::TickBudgetExhausted { ticks: max_ticks })
    }

    /// Runs one update step and publishes what happened.
    fn step(&mut self) -> TickOutcome {
        let before = self.ctx.state();
        let report = self.host.step(&self.machine, &mut self.ctx);
        self.publish_report(before, &report);
        report.outcome
    }

    async fn pace(&self) {
        if !self.tick_interval.is_zero() {
            tokio::time::sleep(self.tick_interval).await;
        }
    }

    fn publish_report(&mut self, before: AgentState, report: &StepReport) {
        let tick = report.tick;
        let after = self.ctx.state();

        if after != before {
            debug!(
                target: "runtime::worker",
                tick,
                from = %before.kind(),
                to = %after.kind(),
                target_tile = ?after.target(),
                "Agent transition"
            );
            self.publish(AgentEvent::Transition {
                tick,
                from: before.kind(),
                to: after.kind(),
                target: after.target(),
            });
        }

        match report.outcome {
            TickOutcome::Acted { target, outcome } => {
                let charge = self.host.hands().can().charge();
                debug!(
                    target: "runtime::worker",
                    tick,
                    tile = %target,
                    outcome = <&'static str>::from(outcome),
                    charge,
                    "Watered"
                );
                self.publish(AgentEvent::Acted {
                    tick,
                    target,
                    outcome,
                    charge,
                });
            }
            TickOutcome::Refilled { target, charge } => {
                debug!(target: "runtime::worker", tick, tile = %target, charge, "Refilled");
                self.publish(AgentEvent::Refilled {
                    tick,
                    target,
                    charge,
                });
            }
            TickOutcome::Halted(reason) => {
                self.last_halt = Some(reason);
                if reason.is_error() {
                    warn!(
                        target: "runtime::worker",
                        tick,
                        code = reason.code(),
                        "Agent halted: {}",
                        reason
                    );
                } else {
                    info!(
                        target: "runtime::worker",
                        tick,
                        code = reason.code(),
                        "Agent halted: {}",
                        reason
                    );
                }
                self.publish(AgentEvent::Halted { tick, reason });
            }
            _ => {}
        }

        for notice in &report.notices {
            self.event_bus.publish(Event::Notice(NoticeEvent {
                tick,
                notice: notice.clone(),
            }));
        }
    }

    fn announce_activation(&self) {
        let tick = self.host.tick();
        let active = self.ctx.is_active();
        info!(
            target: "runtime::worker",
            tick,
            "Waterbot {}",
            self.ctx.toggle().label()
        );
        self.publish(AgentEvent::Activation { tick, active });
    }

    fn publish(&self, event: AgentEvent) {
        self.event_bus.publish(Event::Agent(event));
    }

    fn status(&self) -> AgentStatus {
        let host = self.host.summary();
        AgentStatus {
            tick: host.tick,
            active: self.ctx.is_active(),
            state: self.ctx.state(),
            action_timer: self.ctx.action_timer(),
            position: host.position,
            facing: host.facing,
            charge: host.charge,
            capacity: host.capacity,
            holding_can: host.holding_can,
            dry_plots: host.dry_plots,
            last_halt: self.last_halt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_content::{CanSpec, FarmLayout};
    use bot_core::{Position, Tile, ToolOutcome, WorkSite};

    use crate::events::Topic;
    use crate::runtime::SimConfig;

    fn worker(layout: &FarmLayout, event_bus: EventBus) -> SimulationWorker {
        let host = SimHost::from_layout(layout, SimConfig::default()).expect("valid layout");
        let (_command_tx, command_rx) = mpsc::channel(1);
        SimulationWorker::new(
            AgentStateMachine::default(),
            host,
            command_rx,
            event_bus,
            Duration::ZERO,
        )
    }

    #[test]
    fn strike_that_waters_nothing_is_published_as_no_effect() {
        let target = Tile::new(3, 1);
        let layout = FarmLayout::open(6, 3)
            .with_plot(target, WorkSite::planted_dry())
            .with_actor(Position::new(0.0, 1.0))
            .with_can(CanSpec::new(5, 10));
        let bus = EventBus::with_capacity(64);
        let mut agent_rx = bus.subscribe(Topic::Agent);
        let mut worker = worker(&layout, bus);
        worker.ctx.set_active(true);

        let mut acted = false;
        for _ in 0..500 {
            let outcome = worker.step();
            if matches!(outcome, TickOutcome::Arrived { .. }) {
                assert!(worker.host.farm_mut().water_plot(target));
            }
            if matches!(outcome, TickOutcome::Acted { .. }) {
                acted = true;
                break;
            }
        }
        assert!(acted, "agent never struck the plot");

        let events: Vec<AgentEvent> = std::iter::from_fn(|| agent_rx.try_recv().ok())
            .filter_map(|event| match event {
                Event::Agent(agent) => Some(agent),
                Event::Notice(_) => None,
            })
            .collect();
        let strikes: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                AgentEvent::Acted { target, outcome, charge, .. } => {
                    Some((*target, *outcome, *charge))
                }
                _ => None,
            })
            .collect();

        assert_eq!(strikes, vec![(target, ToolOutcome::NoEffect, 4)]);
    }
}
