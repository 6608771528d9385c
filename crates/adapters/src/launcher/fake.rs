// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory Launcher for FSM and scheduler tests. Outcomes are scripted as
//! a queue consumed in submission order; `check` replays whatever outcome
//! was scripted for that submit id.

use super::{CheckResult, Launcher};
use async_trait::async_trait;
use cm_core::CoreError;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub enum Scripted {
    Succeed,
    Fail(String),
    SubmitError(String),
}

pub struct FakeLauncher {
    next_id: AtomicU64,
    queued_outcomes: Mutex<VecDeque<Scripted>>,
    assigned: Mutex<HashMap<String, Scripted>>,
    pub submissions: Mutex<Vec<String>>,
}

impl Default for FakeLauncher {
    fn default() -> Self {
        Self { next_id: AtomicU64::new(1), queued_outcomes: Mutex::new(VecDeque::new()), assigned: Mutex::new(HashMap::new()), submissions: Mutex::new(Vec::new()) }
    }
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome the *next* `submit` call will be assigned.
    /// Unscripted submissions default to `Scripted::Succeed`.
    pub fn script_next(&self, outcome: Scripted) {
        self.queued_outcomes.lock().push_back(outcome);
    }
}

#[async_trait]
impl Launcher for FakeLauncher {
    async fn submit(&self, script_path: &Path, _env: &HashMap<String, String>) -> Result<String, CoreError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("fake-{n}");
        self.submissions.lock().push(script_path.display().to_string());
        let outcome = self.queued_outcomes.lock().pop_front().unwrap_or(Scripted::Succeed);
        if let Scripted::SubmitError(msg) = &outcome {
            return Err(CoreError::LauncherSubmitError(msg.clone()));
        }
        self.assigned.lock().insert(id.clone(), outcome);
        Ok(id)
    }

    async fn check(&self, submit_id: &str) -> Result<CheckResult, CoreError> {
        let outcome = self.assigned.lock().get(submit_id).cloned().ok_or_else(|| CoreError::LauncherCheckError(format!("unknown submit id {submit_id}")))?;
        match outcome {
            Scripted::Succeed => Ok(CheckResult::succeeded()),
            Scripted::Fail(reason) => Ok(CheckResult::failed(reason)),
            Scripted::SubmitError(_) => unreachable!("submit errors never reach `assigned`"),
        }
    }

    async fn cancel(&self, submit_id: &str) -> Result<bool, CoreError> {
        Ok(self.assigned.lock().remove(submit_id).is_some())
    }
}
