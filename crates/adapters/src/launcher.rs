// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WMS Launcher adapter (§6): `submit`/`check`/`cancel`, interchangeable
//! across local shell, HTCondor, and Slurm backends.

use async_trait::async_trait;
use cm_core::CoreError;
use std::collections::HashMap;
use std::path::Path;

/// Outcome of polling an in-flight submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub success: bool,
    pub running: bool,
    pub reason: Option<String>,
}

impl CheckResult {
    pub fn running() -> Self {
        Self { success: false, running: true, reason: None }
    }

    pub fn succeeded() -> Self {
        Self { success: true, running: false, reason: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self { success: false, running: false, reason: Some(reason.into()) }
    }
}

#[async_trait]
pub trait Launcher: Send + Sync {
    async fn submit(&self, script_path: &Path, env: &HashMap<String, String>) -> Result<String, CoreError>;
    async fn check(&self, submit_id: &str) -> Result<CheckResult, CoreError>;
    async fn cancel(&self, submit_id: &str) -> Result<bool, CoreError>;
}

mod local;
mod htcondor;
mod slurm;

pub use htcondor::HtCondorLauncher;
pub use local::LocalLauncher;
pub use slurm::SlurmLauncher;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLauncher, Scripted};
