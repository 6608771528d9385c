// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{ActivityLogEntry, NodeId};
use uuid::Uuid;

impl MaterializedState {
    pub fn activity_log_for_namespace(&self, namespace: Uuid) -> Vec<&ActivityLogEntry> {
        self.activity_log.iter().filter(|e| e.namespace == namespace).collect()
    }

    pub fn activity_log_for_node(&self, node: NodeId) -> Vec<&ActivityLogEntry> {
        self.activity_log.iter().filter(|e| e.node == Some(node)).collect()
    }
}
