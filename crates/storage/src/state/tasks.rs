// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{NodeId, Task, TaskId, TaskStatus};
use uuid::Uuid;

impl MaterializedState {
    pub(super) fn put_task(&mut self, task: Task) {
        self.tasks.insert(task.id, task);
    }

    pub(super) fn remove_task(&mut self, id: TaskId) {
        self.tasks.remove(&id);
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn task_for_node(&self, node: NodeId) -> Option<&Task> {
        self.tasks.values().find(|t| t.node == node)
    }

    /// Tasks queued for a given namespace, ordered by priority (descending,
    /// nulls last) then by creation time — the order the scheduler daemon
    /// pops work in (`pop_tasks_for_update_skip_locked`).
    pub fn queued_tasks_in(&self, namespace: Uuid) -> Vec<&Task> {
        let mut tasks: Vec<&Task> =
            self.tasks.values().filter(|t| t.namespace == namespace && t.status == TaskStatus::Queued).collect();
        tasks.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.created_at.cmp(&b.created_at)));
        tasks
    }

    pub fn tasks_with_status(&self, namespace: Uuid, status: TaskStatus) -> Vec<&Task> {
        self.tasks.values().filter(|t| t.namespace == namespace && t.status == status).collect()
    }
}
