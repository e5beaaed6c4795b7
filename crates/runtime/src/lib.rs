//! Runtime orchestration for the simulated watering agent.
//!
//! This crate wires the agent state machine from `bot-core` to a simulated
//! farm and drives it from a worker task. Consumers embed [`Runtime`] to run
//! the agent, subscribe to events, and inspect the world through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`host`] implements the world the agent acts on
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod host;
pub mod runtime;

mod workers;

pub use api::{AgentStatus, HaltSummary, Result, RuntimeError, RuntimeHandle};
pub use events::{AgentEvent, Event, EventBus, NoticeEvent, Topic};
pub use host::{FarmError, FarmSnapshot, SimHost};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, SimConfig};
