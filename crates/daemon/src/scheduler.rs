// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two cooperating scheduler loops (§4.5): `consider_campaigns`
//! enqueues Task rows for every processable node of every schedulable
//! campaign; `consider_nodes` pops a batch of them and drives each to its
//! next nominal transition. Both are idempotent and restart-safe — neither
//! holds a row lock across the other's work, and re-running either after a
//! crash just re-derives the same Task rows or re-drives the same nodes.

use crate::campaign_fsm;
use cm_adapters::{Butler, Launcher};
use cm_core::{CampaignStatus, CoreError, NodeId, NodeKind, StatusEnum, Task, Trigger};
use cm_engine::ProcessOutcome;
use cm_storage::Store;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// The nominal trigger a task-queue row drives: `waiting -> ready`,
/// `ready -> running`, `running -> finish`. Any other status means the node
/// is no longer worth a queue entry (already paused, rejected, terminal, or
/// mid-expansion) and the task is dropped without running anything.
fn nominal_trigger(status: StatusEnum) -> Option<Trigger> {
    match status {
        StatusEnum::Waiting => Some(Trigger::Prepare),
        StatusEnum::Ready => Some(Trigger::Start),
        StatusEnum::Running => Some(Trigger::Finish),
        _ => None,
    }
}

/// `INSERT ... ON CONFLICT DO NOTHING` enqueue of every processable node
/// across every `ready`/`running` campaign. Returns the number of new Task
/// rows written.
pub fn consider_campaigns(store: &Store, now_ms: u64) -> usize {
    let namespaces: Vec<Uuid> = store.state().campaigns_with_status(CampaignStatus::is_schedulable).iter().map(|c| c.namespace).collect();

    let mut enqueued = 0;
    for namespace in namespaces {
        for node in cm_graph::processable_nodes(store, namespace) {
            let task = Task::new(namespace, node.id, now_ms);
            if store.state().task(task.id).is_some() {
                continue;
            }
            if let Err(error) = store.write_task(task) {
                tracing::warn!(%namespace, %error, "failed to enqueue task");
                continue;
            }
            enqueued += 1;
        }
    }
    enqueued
}

/// Pop up to `limit` queued tasks for `namespace` and drive each to its
/// nominal transition. A task for a node that's no longer in a nominal
/// status (raced by a manual `process` call, or already mid-transition) is
/// just discarded — `consider_campaigns` will re-enqueue it if it's still
/// processable next tick.
#[allow(clippy::too_many_arguments)]
pub async fn consider_nodes(
    store: &Store,
    launcher: Arc<dyn Launcher>,
    butler: Arc<dyn Butler>,
    artifact_root: &Path,
    namespace: Uuid,
    limit: usize,
    now_ms: u64,
) -> Vec<Result<ProcessOutcome, CoreError>> {
    let tasks = match store.pop_tasks_for_update_skip_locked(namespace, limit) {
        Ok(tasks) => tasks,
        Err(error) => {
            tracing::warn!(%namespace, %error, "failed to pop tasks");
            return Vec::new();
        }
    };

    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        outcomes.push(drive_one(store, launcher.clone(), butler.clone(), artifact_root, task.node, task.id, now_ms).await);
    }
    outcomes
}

async fn drive_one(
    store: &Store,
    launcher: Arc<dyn Launcher>,
    butler: Arc<dyn Butler>,
    artifact_root: &Path,
    node_id: NodeId,
    task_id: cm_core::TaskId,
    now_ms: u64,
) -> Result<ProcessOutcome, CoreError> {
    let node = store.state().node(node_id).cloned();
    let Some(node) = node else {
        let _ = store.remove_task(task_id);
        return Ok(ProcessOutcome::NoChange);
    };
    let Some(trigger) = nominal_trigger(node.status) else {
        let _ = store.remove_task(task_id);
        return Ok(ProcessOutcome::NoChange);
    };

    let namespace = node.namespace;
    let is_end = node.kind == NodeKind::End;
    let result = cm_engine::process(store, launcher, butler, artifact_root, node_id, trigger, node.status, "scheduler", None, now_ms).await;
    let _ = store.remove_task(task_id);

    if is_end {
        if let Ok(ProcessOutcome::Transitioned(_)) = &result {
            if store.state().node(node_id).is_some_and(|n| n.status == StatusEnum::Accepted) {
                let campaign_id = cm_core::CampaignId::from_uuid(namespace);
                if let Err(error) = campaign_fsm::drive(store, campaign_id, CampaignStatus::Accepted, "scheduler", now_ms).await {
                    tracing::warn!(%namespace, %error, "END node accepted but campaign could not follow");
                }
            }
        }
    }
    result
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
