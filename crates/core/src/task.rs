// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task entity (§3): a work-queue row asserting a node is processable.

use crate::ids::{NodeId, TaskId};
use crate::status::TaskStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub namespace: Uuid,
    pub node: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wms_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub site_affinity: Vec<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<TaskStatus>,
    #[serde(default)]
    pub metadata: Value,
}

impl Task {
    /// A task row is keyed by namespace+node so `ON CONFLICT DO NOTHING`
    /// enqueueing (§4.5) is idempotent: the id is derived, not random.
    pub fn new(namespace: Uuid, node: NodeId, created_at: u64) -> Self {
        let id = TaskId::derive(namespace, &format!("task.{node}"));
        Self { id, namespace, node, priority: None, created_at, submitted_at: None, finished_at: None, wms_id: None, site_affinity: Vec::new(), status: TaskStatus::Queued, previous_status: None, metadata: Value::Object(Default::default()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_is_idempotent_per_node() {
        let ns = Uuid::new_v4();
        let node = NodeId::new(ns, "a", 1);
        let t1 = Task::new(ns, node, 0);
        let t2 = Task::new(ns, node, 100);
        assert_eq!(t1.id, t2.id, "re-enqueueing the same node yields the same task id");
    }
}
