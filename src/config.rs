use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::history::DEFAULT_MAX_ENTRIES;
use crate::session::recency::DEFAULT_MAX_RECENT;

pub const MAX_RECENT_LIMIT: usize = 1_000;
pub const MAX_HISTORY_LIMIT: usize = 10_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_recent")]
    pub max_recent: usize,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_max_recent() -> usize {
    DEFAULT_MAX_RECENT
}
fn default_max_history() -> usize {
    DEFAULT_MAX_ENTRIES
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("twentyfour")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_recent: default_max_recent(),
            max_history: default_max_history(),
            seed: None,
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("twentyfour")
            .join("config.toml")
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// A zero-sized recency window or history is treated as unset; oversized
    /// ones are capped at `MAX_RECENT_LIMIT` / `MAX_HISTORY_LIMIT`.
    pub fn normalize(&mut self) {
        if self.max_recent == 0 {
            self.max_recent = default_max_recent();
        }
        if self.max_history == 0 {
            self.max_history = default_max_history();
        }
        self.max_recent = self.max_recent.min(MAX_RECENT_LIMIT);
        self.max_history = self.max_history.min(MAX_HISTORY_LIMIT);
    }
}
