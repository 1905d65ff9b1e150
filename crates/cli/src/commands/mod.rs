// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod cache;
pub mod queue;
pub mod status;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fieldsync::OfflineQueue;
use fieldsync_core::config::default_config_path;
use fieldsync_core::{Config, KvCache, SqliteStore};

use crate::error::Result;

const LOG_FILE_NAME: &str = "fieldsync.log";

/// Configuration plus the store it points at.
pub struct Context {
    pub config: Config,
    pub store_path: PathBuf,
    store: Arc<SqliteStore>,
}

impl Context {
    /// Load `config_path` (or the default location) and open the store.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };
        let store_path = config.store_path()?;
        let store = Arc::new(SqliteStore::open(&store_path)?);
        Ok(Context { config, store_path, store })
    }

    /// Log file kept next to the store.
    pub fn log_path(&self) -> PathBuf {
        self.store_path.with_file_name(LOG_FILE_NAME)
    }

    pub fn queue(&self) -> OfflineQueue<SqliteStore> {
        OfflineQueue::new(Arc::clone(&self.store)).with_apply_timeout(self.config.queue.apply_timeout())
    }

    pub fn cache(&self) -> KvCache<SqliteStore> {
        KvCache::new(Arc::clone(&self.store))
    }

    pub fn store(&self) -> &Arc<SqliteStore> {
        &self.store
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
