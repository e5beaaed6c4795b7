use std::f32::consts::SQRT_2;

use crate::error::ConfigError;

/// Tunable parameters of the agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BotConfig {
    /// Half side of the square window scanned for water, in tiles.
    pub search_radius: u32,
    /// Axis misalignment tolerated before the walker stops correcting it.
    pub dead_zone: f32,
    /// Distance at which the actor counts as having reached its target.
    pub arrival_threshold: f32,
    /// Ticks to wait between arriving and using the tool.
    pub pre_action_delay: u32,
    /// Ticks reserved for the tool animation after each use.
    pub action_duration: u32,
    /// First clip of the directional tool-use animation family.
    pub action_animation_base: u32,
    /// Consecutive no-progress ticks before the agent gives up on a target.
    /// `None` disables the watchdog.
    pub stall_limit: Option<u32>,
    /// Minimum distance gain per tick that counts as progress.
    pub stall_epsilon: f32,
}

impl BotConfig {
    pub const DEFAULT_SEARCH_RADIUS: u32 = 20;
    pub const DEFAULT_DEAD_ZONE: f32 = 0.1;
    pub const DEFAULT_ARRIVAL_THRESHOLD: f32 = 1.1;
    pub const DEFAULT_PRE_ACTION_DELAY: u32 = 10;
    pub const DEFAULT_ACTION_DURATION: u32 = 45;
    pub const DEFAULT_ACTION_ANIMATION_BASE: u32 = 208;
    pub const DEFAULT_STALL_LIMIT: u32 = 300;
    pub const DEFAULT_STALL_EPSILON: f32 = 0.01;

    /// Largest accepted `search_radius`. The water scan visits
    /// `(2 * radius + 1)^2` tiles.
    pub const MAX_SEARCH_RADIUS: u32 = 256;

    pub fn new() -> Self {
        Self {
            search_radius: Self::DEFAULT_SEARCH_RADIUS,
            dead_zone: Self::DEFAULT_DEAD_ZONE,
            arrival_threshold: Self::DEFAULT_ARRIVAL_THRESHOLD,
            pre_action_delay: Self::DEFAULT_PRE_ACTION_DELAY,
            action_duration: Self::DEFAULT_ACTION_DURATION,
            action_animation_base: Self::DEFAULT_ACTION_ANIMATION_BASE,
            stall_limit: Some(Self::DEFAULT_STALL_LIMIT),
            stall_epsilon: Self::DEFAULT_STALL_EPSILON,
        }
    }

    pub fn with_search_radius(mut self, search_radius: u32) -> Self {
        self.search_radius = search_radius;
        self
    }

    pub fn with_stall_limit(mut self, stall_limit: Option<u32>) -> Self {
        self.stall_limit = stall_limit;
        self
    }

    /// Checks that the values describe a walker that can actually arrive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_radius == 0 {
            return Err(ConfigError::ZeroSearchRadius);
        }
        if self.search_radius > Self::MAX_SEARCH_RADIUS {
            return Err(ConfigError::SearchRadiusTooLarge {
                radius: self.search_radius,
                max: Self::MAX_SEARCH_RADIUS,
            });
        }

        for (field, value) in [
            ("dead_zone", self.dead_zone),
            ("arrival_threshold", self.arrival_threshold),
            ("stall_epsilon", self.stall_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }

        // The walker stops correcting each axis within `dead_zone`, so it may
        // settle `dead_zone * √2` away from the target and must still arrive.
        if self.dead_zone * SQRT_2 >= self.arrival_threshold {
            return Err(ConfigError::DeadZoneTooWide {
                dead_zone: self.dead_zone,
                arrival_threshold: self.arrival_threshold,
            });
        }

        if self.stall_limit == Some(0) {
            return Err(ConfigError::ZeroStallLimit);
        }

        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::new()
    }
}
