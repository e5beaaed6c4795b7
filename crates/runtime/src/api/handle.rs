//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use super::status::{AgentStatus, HaltSummary};
use crate::events::{Event, EventBus, Topic};
use crate::host::FarmSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Switch the agent on or off.
    ///
    /// Changing the flag drops the current target; repeating the current
    /// value is a no-op.
    pub async fn set_active(&self, active: bool) -> Result<AgentStatus> {
        self.request(|reply| Command::SetActive { active, reply }).await
    }

    /// Flip the activation flag, like pressing the hotkey.
    pub async fn toggle(&self) -> Result<AgentStatus> {
        self.request(|reply| Command::Toggle { reply }).await
    }

    /// Take the watering can out (`true`) or put it away (`false`).
    pub async fn set_holding_can(&self, holding: bool) -> Result<AgentStatus> {
        self.request(|reply| Command::SetHoldingCan { holding, reply }).await
    }

    /// Run exactly `ticks` update steps and return the resulting status.
    pub async fn advance(&self, ticks: u64) -> Result<AgentStatus> {
        self.request(|reply| Command::Advance { ticks, reply }).await
    }

    /// Run until the agent halts on its own.
    ///
    /// Fails with [`RuntimeError::AgentInactive`] when the agent is switched
    /// off, and with [`RuntimeError::TickBudgetExhausted`] when it is still
    /// busy after `max_ticks` steps.
    pub async fn run_until_halt(&self, max_ticks: u64) -> Result<HaltSummary> {
        self.request(|reply| Command::RunUntilHalt { max_ticks, reply }).await?
    }

    /// Query the current agent status (read-only snapshot)
    pub async fn query_status(&self) -> Result<AgentStatus> {
        self.request(|reply| Command::QueryStatus { reply }).await
    }

    /// Query the current farm (read-only snapshot)
    pub async fn query_farm(&self) -> Result<FarmSnapshot> {
        self.request(|reply| Command::QueryFarm { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Agent` - Activation, transitions, watering, refills, halts
    /// - `Topic::Notice` - Player-facing messages
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut notices = handle.subscribe(Topic::Notice);
    /// while let Ok(event) = notices.recv().await {
    ///     // Show the message
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
