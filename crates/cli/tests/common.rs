// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// A temp dir with a config pointing the store at `state/fieldsync.db`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_config("store_path = \"state/fieldsync.db\"\n")
    }

    pub fn with_config(config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("fieldsync.toml"), config).unwrap();
        Workspace { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("fieldsync.toml")
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("state").join("fieldsync.db")
    }

    /// `fieldsync --config <this workspace>`.
    pub fn fieldsync(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("fieldsync");
        cmd.arg("--config").arg(self.config_path());
        cmd
    }
}
