//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and world construction so clients
//! can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use bot_core::ConfigError;

use crate::host::FarmError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a farm layout before building")]
    MissingFarm,

    #[error("invalid bot configuration")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid farm layout")]
    InvalidFarm(#[from] FarmError),

    #[error("agent is switched off")]
    AgentInactive,

    #[error("agent still running after {ticks} ticks")]
    TickBudgetExhausted { ticks: u64 },
}
