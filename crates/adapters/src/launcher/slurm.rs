// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slurm Launcher: shells out to `sbatch`/`squeue`/`scancel`.

use super::{CheckResult, Launcher};
use async_trait::async_trait;
use cm_core::CoreError;
use std::collections::HashMap;
use std::path::Path;
use tokio::process::Command;

pub struct SlurmLauncher;

impl SlurmLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SlurmLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Launcher for SlurmLauncher {
    async fn submit(&self, script_path: &Path, env: &HashMap<String, String>) -> Result<String, CoreError> {
        let output = Command::new("sbatch")
            .arg("--parsable")
            .arg(script_path)
            .envs(env)
            .output()
            .await
            .map_err(|e| CoreError::LauncherSubmitError(e.to_string()))?;
        if !output.status.success() {
            return Err(CoreError::LauncherSubmitError(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        let job_id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if job_id.is_empty() {
            return Err(CoreError::LauncherSubmitError("sbatch produced no job id".into()));
        }
        Ok(job_id)
    }

    async fn check(&self, submit_id: &str) -> Result<CheckResult, CoreError> {
        let output = Command::new("squeue")
            .args(["-j", submit_id, "-h", "-o", "%T"])
            .output()
            .await
            .map_err(|e| CoreError::LauncherCheckError(e.to_string()))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.trim() {
            "" => Ok(CheckResult::succeeded()), // job has left the queue
            "COMPLETED" => Ok(CheckResult::succeeded()),
            "PENDING" | "RUNNING" | "CONFIGURING" | "COMPLETING" => Ok(CheckResult::running()),
            other => Ok(CheckResult::failed(format!("slurm state {other}"))),
        }
    }

    async fn cancel(&self, submit_id: &str) -> Result<bool, CoreError> {
        let output = Command::new("scancel").arg(submit_id).output().await.map_err(|e| CoreError::LauncherSubmitError(e.to_string()))?;
        Ok(output.status.success())
    }
}
