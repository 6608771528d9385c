// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTCondor Launcher: shells out to `condor_submit`/`condor_q`/`condor_rm`.
//! The submit script is expected to be a condor submit description file.

use super::{CheckResult, Launcher};
use async_trait::async_trait;
use cm_core::CoreError;
use std::collections::HashMap;
use std::path::Path;
use tokio::process::Command;

pub struct HtCondorLauncher;

impl HtCondorLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtCondorLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Launcher for HtCondorLauncher {
    async fn submit(&self, script_path: &Path, env: &HashMap<String, String>) -> Result<String, CoreError> {
        let output = Command::new("condor_submit")
            .arg("-terse")
            .arg(script_path)
            .envs(env)
            .output()
            .await
            .map_err(|e| CoreError::LauncherSubmitError(e.to_string()))?;
        if !output.status.success() {
            return Err(CoreError::LauncherSubmitError(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let cluster_id = stdout
            .lines()
            .next()
            .and_then(|line| line.split('.').next())
            .ok_or_else(|| CoreError::LauncherSubmitError("condor_submit produced no cluster id".into()))?;
        Ok(cluster_id.to_string())
    }

    async fn check(&self, submit_id: &str) -> Result<CheckResult, CoreError> {
        let output = Command::new("condor_q")
            .arg(submit_id)
            .arg("-format")
            .arg("%d\n")
            .arg("JobStatus")
            .output()
            .await
            .map_err(|e| CoreError::LauncherCheckError(e.to_string()))?;
        if !output.status.success() {
            return Err(CoreError::LauncherCheckError(String::from_utf8_lossy(&output.stderr).into_owned()));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        // JobStatus: 1=idle, 2=running, 3=removed, 4=completed, 5=held, 6=submission_err.
        match stdout.lines().next().and_then(|s| s.trim().parse::<u32>().ok()) {
            Some(4) => Ok(CheckResult::succeeded()),
            Some(1) | Some(2) => Ok(CheckResult::running()),
            Some(code) => Ok(CheckResult::failed(format!("condor JobStatus {code}"))),
            None => Ok(CheckResult::succeeded()), // empty queue result means the job has left the queue
        }
    }

    async fn cancel(&self, submit_id: &str) -> Result<bool, CoreError> {
        let output =
            Command::new("condor_rm").arg(submit_id).output().await.map_err(|e| CoreError::LauncherSubmitError(e.to_string()))?;
        Ok(output.status.success())
    }
}
