//! Client configuration read from the process environment.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use bot_content::{ConfigLoader, FarmLayout, FarmLoader};
use bot_core::BotConfig;

/// Where the farm layout comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FarmSource {
    /// One of the layouts compiled into `bot-content`.
    Embedded(String),
    /// A RON file on disk.
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub farm: FarmSource,
    /// TOML bot configuration; the embedded defaults when unset.
    pub config_path: Option<PathBuf>,
    pub max_ticks: u64,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            farm: FarmSource::Embedded(FarmLoader::DEFAULT_FARM.to_string()),
            config_path: None,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            session_id: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_MAX_TICKS: u64 = 20_000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WATERBOT_FARM` - Embedded farm name or RON path (default: `homestead`)
    /// - `WATERBOT_CONFIG` - Bot configuration TOML path (default: embedded)
    /// - `WATERBOT_MAX_TICKS` - Tick budget for the run (default: 20000)
    /// - `WATERBOT_SESSION_ID` - Log session name (default: timestamp)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(farm) = var("WATERBOT_FARM").filter(|value| !value.is_empty()) {
            config.farm = if FarmLoader::embedded_names().any(|name| name == farm) {
                FarmSource::Embedded(farm)
            } else {
                FarmSource::File(PathBuf::from(farm))
            };
        }

        config.config_path = var("WATERBOT_CONFIG")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        if let Some(max_ticks) = read_var::<u64>(&var, "WATERBOT_MAX_TICKS") {
            config.max_ticks = max_ticks.max(1);
        }

        config.session_id = var("WATERBOT_SESSION_ID");

        config
    }

    pub fn load_farm(&self) -> Result<FarmLayout> {
        match &self.farm {
            FarmSource::Embedded(name) => FarmLoader::embedded(name),
            FarmSource::File(path) => FarmLoader::load(path)
                .with_context(|| format!("Failed to load farm {}", path.display())),
        }
    }

    pub fn load_bot_config(&self) -> Result<BotConfig> {
        match &self.config_path {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("Failed to load bot config {}", path.display())),
            None => ConfigLoader::embedded(),
        }
    }
}

fn read_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    var(key)?.parse().ok()
}
