// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local-shell Launcher: runs the submission script as a direct child
//! process and tracks it by a generated submit id until it exits.

use super::{CheckResult, Launcher};
use async_trait::async_trait;
use cm_core::CoreError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;
use tokio::process::{Child, Command};

#[derive(Default)]
pub struct LocalLauncher {
    children: Mutex<HashMap<String, Child>>,
}

impl LocalLauncher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Launcher for LocalLauncher {
    async fn submit(&self, script_path: &Path, env: &HashMap<String, String>) -> Result<String, CoreError> {
        let mut command = Command::new(script_path);
        command.envs(env);
        command.kill_on_drop(true);
        let child = command.spawn().map_err(|e| CoreError::LauncherSubmitError(e.to_string()))?;
        let submit_id = format!("local-{}", child.id().unwrap_or(0));
        self.children.lock().insert(submit_id.clone(), child);
        Ok(submit_id)
    }

    async fn check(&self, submit_id: &str) -> Result<CheckResult, CoreError> {
        let mut children = self.children.lock();
        let Some(child) = children.get_mut(submit_id) else {
            return Err(CoreError::LauncherCheckError(format!("unknown submit id {submit_id}")));
        };
        match child.try_wait() {
            Ok(None) => Ok(CheckResult::running()),
            Ok(Some(status)) => {
                children.remove(submit_id);
                if status.success() {
                    Ok(CheckResult::succeeded())
                } else {
                    Ok(CheckResult::failed(format!("exited with {status}")))
                }
            }
            Err(e) => Err(CoreError::LauncherCheckError(e.to_string())),
        }
    }

    async fn cancel(&self, submit_id: &str) -> Result<bool, CoreError> {
        let mut children = self.children.lock();
        match children.remove(submit_id) {
            Some(mut child) => {
                child.start_kill().map_err(|e| CoreError::LauncherSubmitError(e.to_string()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn submitting_true_succeeds_quickly() {
        let launcher = LocalLauncher::new();
        let id = launcher.submit(Path::new("/usr/bin/true"), &HashMap::new()).await.unwrap();
        for _ in 0..50 {
            let result = launcher.check(&id).await.unwrap();
            if !result.running {
                assert!(result.success);
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("local launcher never reported completion");
    }

    #[tokio::test]
    async fn checking_unknown_id_is_an_error() {
        let launcher = LocalLauncher::new();
        assert!(launcher.check("does-not-exist").await.is_err());
    }
}
