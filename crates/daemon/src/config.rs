// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration, loaded straight from environment variables (spec
//! §6: "environment variables configure only the outer shell"). No
//! config-file crate — this is outer-shell plumbing, not the core contract.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Number of concurrent `consider_nodes` worker loops.
    pub worker_count: usize,
    /// How often each scheduler loop wakes to re-scan its work.
    pub poll_interval: Duration,
    /// Root directory under which Group/Action artifact directories live.
    pub artifact_root: PathBuf,
    /// Path to the store's WAL file.
    pub wal_path: PathBuf,
    /// Max Task rows a single `consider_nodes` tick pops per campaign.
    pub batch_size: usize,
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self {
            worker_count: env_parsed("CM_WORKER_COUNT").unwrap_or(4),
            poll_interval: env_parsed::<u64>("CM_POLL_INTERVAL_MS").map(Duration::from_millis).unwrap_or(Duration::from_millis(500)),
            artifact_root: std::env::var("CM_ARTIFACT_ROOT").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("./artifacts")),
            wal_path: std::env::var("CM_WAL_PATH").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("./campaign-manager.wal")),
            batch_size: env_parsed("CM_BATCH_SIZE").unwrap_or(16),
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
