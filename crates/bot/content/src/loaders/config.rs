//! Bot configuration loader.

use std::path::Path;

use bot_core::BotConfig;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/config/bot.toml");

/// Loader for bot configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate bot configuration from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BotConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse bot configuration from TOML text. Missing fields take defaults.
    pub fn parse(content: &str) -> LoadResult<BotConfig> {
        let config: BotConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid bot config: {}", e))?;

        Ok(config)
    }

    /// The configuration shipped with the crate.
    pub fn embedded() -> LoadResult<BotConfig> {
        Self::parse(EMBEDDED)
    }
}
