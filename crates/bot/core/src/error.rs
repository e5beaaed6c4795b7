//! Terminal conditions and configuration errors.
//!
//! The machine never returns an error from a tick. When it cannot continue it
//! disables itself, sends exactly one [`Notice`](crate::Notice) and reports a
//! [`HaltReason`] in the tick outcome. Configuration problems are caught up
//! front by [`BotConfig::validate`](crate::BotConfig::validate).

use crate::state::Tile;

/// Severity attached to a notice, used by hosts to pick icon and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Normal completion.
    Info,
    /// The agent stopped because something is wrong in the world or setup.
    Error,
}

/// Why the agent disabled itself.
///
/// All reasons are terminal for the current activation: the host must turn
/// the agent back on to retry.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HaltReason {
    /// Every planted plot is watered. Not a failure.
    #[error("no dry planted plots left")]
    WorkComplete,

    /// The can is empty and no refill spot is within the search window.
    #[error("no standable tile next to water within {radius} tiles")]
    ResourceExhausted { radius: u32 },

    /// The actor is not holding the tool the agent works with.
    #[error("required tool is not held")]
    PreconditionUnmet,

    /// The actor made no progress toward its target for too long.
    #[error("no progress toward {target} for {ticks} ticks")]
    Stalled { target: Tile, ticks: u32 },
}

impl HaltReason {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::WorkComplete => Severity::Info,
            Self::ResourceExhausted { .. } | Self::PreconditionUnmet | Self::Stalled { .. } => {
                Severity::Error
            }
        }
    }

    /// Short player-facing text for the notice.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::WorkComplete => "Done!",
            Self::ResourceExhausted { .. } => "No water nearby!",
            Self::PreconditionUnmet => "Hold a Watering Can!",
            Self::Stalled { .. } => "Stuck! Clear the path.",
        }
    }

    /// Stable identifier for logs and metrics.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::WorkComplete => "work_complete",
            Self::ResourceExhausted { .. } => "resource_exhausted",
            Self::PreconditionUnmet => "precondition_unmet",
            Self::Stalled { .. } => "stalled",
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.severity(), Severity::Error)
    }
}

/// Invalid tuning values in [`BotConfig`](crate::BotConfig).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("search radius must be at least 1")]
    ZeroSearchRadius,

    #[error("search radius {radius} exceeds the maximum of {max}")]
    SearchRadiusTooLarge { radius: u32, max: u32 },

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidThreshold { field: &'static str, value: f32 },

    #[error("dead zone {dead_zone} times √2 must be smaller than arrival threshold {arrival_threshold}")]
    DeadZoneTooWide {
        dead_zone: f32,
        arrival_threshold: f32,
    },

    #[error("stall limit must be at least 1 tick when set")]
    ZeroStallLimit,
}
