//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the agent.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use bot_content::FarmLayout;
use bot_core::{AgentStateMachine, BotConfig};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::host::SimHost;
use crate::workers::{Command, SimulationWorker};

/// Physics of the simulated world.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Tiles the actor covers per tick while walking.
    pub walk_speed: f32,
    /// Ticks the actor stays busy after an animation starts.
    pub animation_ticks: u32,
    /// Wall-clock pause between ticks; zero runs as fast as possible.
    pub tick_interval: Duration,
}

impl SimConfig {
    pub const DEFAULT_WALK_SPEED: f32 = 0.08;
    pub const DEFAULT_ANIMATION_TICKS: u32 = 20;
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            walk_speed: Self::DEFAULT_WALK_SPEED,
            animation_ticks: Self::DEFAULT_ANIMATION_TICKS,
            tick_interval: Duration::ZERO,
        }
    }
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bot: BotConfig,
    pub sim: SimConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            sim: SimConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that drives the agent on a simulated farm
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker exits once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    farm: Option<FarmLayout>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            farm: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the agent tuning
    pub fn bot_config(mut self, bot: BotConfig) -> Self {
        self.config.bot = bot;
        self
    }

    /// Set the farm the agent works on (required)
    pub fn farm(mut self, farm: FarmLayout) -> Self {
        self.farm = Some(farm);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let farm = self.farm.ok_or(RuntimeError::MissingFarm)?;
        let machine = AgentStateMachine::new(self.config.bot)?;
        let host = SimHost::from_layout(&farm, self.config.sim.clone())?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            machine,
            host,
            command_rx,
            event_bus,
            self.config.sim.tick_interval,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
