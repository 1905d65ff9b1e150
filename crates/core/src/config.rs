// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management.
//!
//! Configuration is read from `fieldsync.toml` and includes:
//! - `store_path`: where the durable store lives (defaults under the XDG state dir)
//! - `[queue]`: replay settings such as the per-item apply timeout
//! - `[cache]`: the default cache lifetime

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "fieldsync.toml";
const STORE_FILE_NAME: &str = "fieldsync.db";
const APP_DIR_NAME: &str = "fieldsync";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the SQLite store. Relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Offline queue settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Upper bound on a single remote apply, in milliseconds (default: 15000). 0 = no timeout.
    #[serde(default = "default_apply_timeout_ms")]
    pub apply_timeout_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig { apply_timeout_ms: default_apply_timeout_ms() }
    }
}

impl QueueConfig {
    pub fn apply_timeout(&self) -> Option<Duration> {
        (self.apply_timeout_ms > 0).then(|| Duration::from_millis(self.apply_timeout_ms))
    }
}

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Lifetime used when a caller does not pick one (default: 30).
    #[serde(default = "default_ttl_minutes")]
    pub default_ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig { default_ttl_minutes: default_ttl_minutes() }
    }
}

fn default_apply_timeout_ms() -> u64 {
    15_000
}

fn default_ttl_minutes() -> u64 {
    30
}

impl Config {
    /// Loads the config at `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };
        let mut config: Config = toml::from_str(&content)?;

        if let (Some(store), Some(base)) = (config.store_path.as_ref(), path.parent()) {
            if store.is_relative() {
                config.store_path = Some(base.join(store));
            }
        }
        Ok(config)
    }

    /// Writes the config to `path` as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::CorruptedData(format!("failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The resolved store path: explicit setting, else the default state location.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(path.clone()),
            None => Ok(default_state_dir()?.join(STORE_FILE_NAME)),
        }
    }
}

/// Default directory for durable state: `$XDG_STATE_HOME/fieldsync` or the platform equivalent.
pub fn default_state_dir() -> Result<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine a state directory",
            ))
        })
}

/// Default config location inside the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
