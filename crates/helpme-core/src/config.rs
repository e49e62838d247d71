use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};

/// Tunables read from `<config dir>/helpme/config.json`.
///
/// Every field is optional in the file. Nothing from a session is ever
/// written back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub connect_delay_ms: u64,
    pub reply_delay_ms: u64,
    pub level_up_delay_ms: u64,
    pub level_up_message_threshold: usize,
    pub tick_rate_ms: u64,
    pub dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect_delay_ms: 5_000,
            reply_delay_ms: 2_000,
            level_up_delay_ms: 2_000,
            level_up_message_threshold: 5,
            tick_rate_ms: 300,
            dark_mode: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Missing file means defaults; a malformed one is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {:?}", config_path))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("Failed to parse config {:?}", config_path))?;
        Ok(config)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("helpme").join("config.json"))
    }
}
