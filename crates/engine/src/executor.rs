// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Node FSM's transition driver (§4.3's transition contract):
//! loads the node fresh under its row lock, checks the caller's observed
//! status against what's actually there, dispatches to the node kind's
//! [`NodeBehavior`], and commits the status, Machine snapshot, and
//! ActivityLog row in one transaction. A `before_*` action that returns
//! `Err` is not propagated — it drives the node to `failed`, which is
//! itself a legal transition outcome.

use crate::behavior::{behavior_for, TransitionContext, TransitionOutcome};
use cm_adapters::{Butler, Launcher};
use cm_core::{ActivityLogEntry, CoreError, MachineSnapshot, Node, NodeId, StatusEnum, Trigger};
use cm_storage::{Event, Store};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

/// What driving one transition produced.
#[derive(Debug)]
pub enum ProcessOutcome {
    /// The transition committed; carries the ActivityLog row written for it.
    Transitioned(ActivityLogEntry),
    /// The action ran but decided nothing changes yet (e.g. a WMS job still
    /// running). Nothing is committed.
    NoChange,
    /// The node's observed status no longer matches what the caller expected
    /// — another worker already processed it. Nothing is committed.
    Stale,
}

/// Drive `trigger` on `node_id`, from the caller's last-observed `expected`
/// status. Returns `Err(CoreError::NotProcessable)` if `trigger` is not
/// legal from the node's *current* status at all (used by the manual
/// `process` RPC to refuse outright); a mismatch between `expected` and the
/// freshly loaded status is instead the quieter [`ProcessOutcome::Stale`],
/// since it only means a concurrent worker won the race.
#[allow(clippy::too_many_arguments)]
pub async fn process(
    store: &Store,
    launcher: Arc<dyn Launcher>,
    butler: Arc<dyn Butler>,
    artifact_root: &Path,
    node_id: NodeId,
    trigger: Trigger,
    expected: StatusEnum,
    operator: &str,
    request_id: Option<&str>,
    now_ms: u64,
) -> Result<ProcessOutcome, CoreError> {
    let _guard = store.lock_node(node_id).await;
    let node = store.state().node(node_id).cloned().ok_or_else(|| CoreError::NotFound { kind: "Node", id: node_id.to_string() })?;

    let behavior = behavior_for(node.kind);
    if !behavior.applies(trigger, node.status) {
        return Err(CoreError::NotProcessable(format!("{} cannot {trigger} from {}", node.name, node.status)));
    }
    if node.status != expected {
        return Ok(ProcessOutcome::Stale);
    }

    let ctx = TransitionContext { store, launcher, butler, artifact_root, namespace: node.namespace, node: node.clone(), now_ms };
    match behavior.run(&ctx, trigger).await {
        Ok(TransitionOutcome::NoChange) => Ok(ProcessOutcome::NoChange),
        Ok(TransitionOutcome::Transition { to, transient }) => {
            commit_transition(store, &node, to, &transient, trigger, operator, request_id, now_ms, None).map(ProcessOutcome::Transitioned)
        }
        Err(error) => {
            commit_transition(store, &node, StatusEnum::Failed, &Value::Null, trigger, operator, request_id, now_ms, Some(error))
                .map(ProcessOutcome::Transitioned)
        }
    }
}

/// Shallow-merges `transient` into `existing` metadata. A `null` value for a
/// key deletes it (used by `reset`/`unprepare` to clear what a prior
/// transition recorded); any other value overwrites.
fn merge_metadata(existing: &Value, transient: &Value) -> Value {
    let Value::Object(overlay) = transient else {
        return existing.clone();
    };
    let mut merged = if existing.is_object() { existing.clone() } else { Value::Object(serde_json::Map::new()) };
    let Value::Object(base) = &mut merged else { unreachable!("just constructed as an object") };
    for (key, value) in overlay {
        if value.is_null() {
            base.remove(key);
        } else {
            base.insert(key.clone(), value.clone());
        }
    }
    merged
}

#[allow(clippy::too_many_arguments)]
fn commit_transition(
    store: &Store,
    node: &Node,
    to: StatusEnum,
    transient: &Value,
    trigger: Trigger,
    operator: &str,
    request_id: Option<&str>,
    now_ms: u64,
    failure: Option<CoreError>,
) -> Result<ActivityLogEntry, CoreError> {
    let snapshot = MachineSnapshot::new(to, trigger, transient.clone());

    let mut updated = node.clone();
    updated.metadata = merge_metadata(&node.metadata, transient);
    updated.status = to;
    updated.machine = Some(snapshot.id);

    let mut detail = json!({"trigger": trigger.to_string()});
    if let Some(request_id) = request_id {
        detail["request_id"] = json!(request_id);
    }
    if let Some(error) = failure {
        detail["exception"] = json!(error.kind());
        detail["error"] = json!(error.to_string());
    }

    let mut entry = ActivityLogEntry::new(node.namespace, Some(node.id), operator, now_ms, node.status.to_string(), to.to_string(), detail);
    entry.finished_at = Some(now_ms);

    store.commit_all(vec![
        Event::NodeWritten { node: updated, activate: true },
        Event::MachineWritten(snapshot),
        Event::ActivityLogAppended(entry.clone()),
    ])?;

    Ok(entry)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
