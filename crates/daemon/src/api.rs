// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The named HTTP surface of §6, realised as the plain async functions
//! an (unbuilt) HTTP layer would call — `/rpc/process` and health reporting.

use cm_adapters::{Butler, Launcher};
use cm_core::{CampaignStatus, CoreError, NodeId, Trigger};
use cm_engine::ProcessOutcome;
use cm_storage::Store;
use std::path::Path;
use std::sync::Arc;

/// Manual single-step transition, bypassing the task queue. Used by
/// operators and tests. Refuses with `NotProcessable` if `trigger` isn't
/// legal from the node's current status — `cm_engine::process` already
/// enforces this, this just forwards it with the node's observed status as
/// `expected`, so the only source of a `Stale` result here is a genuine
/// race with the scheduler popping the same node concurrently.
#[allow(clippy::too_many_arguments)]
pub async fn rpc_process(
    store: &Store,
    launcher: Arc<dyn Launcher>,
    butler: Arc<dyn Butler>,
    artifact_root: &Path,
    node_id: NodeId,
    trigger: Trigger,
    operator: &str,
    now_ms: u64,
) -> Result<ProcessOutcome, CoreError> {
    let expected = store.state().node(node_id).map(|n| n.status).ok_or_else(|| CoreError::NotFound { kind: "Node", id: node_id.to_string() })?;
    cm_engine::process(store, launcher, butler, artifact_root, node_id, trigger, expected, operator, None, now_ms).await
}

/// Coarse liveness/readiness snapshot (§4.5): worker/task counts in place
/// of the agent/session counts a generic job daemon would report.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct HealthSnapshot {
    pub schedulable_campaigns: usize,
    pub queued_tasks: usize,
    pub in_progress_tasks: usize,
}

pub fn healthz(store: &Store) -> HealthSnapshot {
    let state = store.state();
    let campaigns = state.campaigns_with_status(CampaignStatus::is_schedulable);
    let queued: usize = campaigns.iter().map(|c| state.queued_tasks_in(c.namespace).len()).sum();
    let in_progress: usize = campaigns.iter().map(|c| state.tasks_with_status(c.namespace, cm_core::TaskStatus::InProgress).len()).sum();
    HealthSnapshot { schedulable_campaigns: campaigns.len(), queued_tasks: queued, in_progress_tasks: in_progress }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
