// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{Node, NodeId};
use uuid::Uuid;

impl MaterializedState {
    /// Insert a node version. When `activate` is true it becomes the visible
    /// version for `(namespace, name)` immediately (the common case: new
    /// nodes, and edits that don't need a separate activation step).
    pub(super) fn put_node(&mut self, node: Node, activate: bool) {
        let key = (node.namespace, node.name.clone());
        let id = node.id;
        self.nodes.insert(id, node);
        if activate {
            self.active_nodes.insert(key, id);
        }
    }

    pub(super) fn activate_node(&mut self, namespace: Uuid, name: String, node: NodeId) {
        self.active_nodes.insert((namespace, name), node);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn active_node(&self, namespace: Uuid, name: &str) -> Option<&Node> {
        let id = self.active_nodes.get(&(namespace, name.to_string()))?;
        self.nodes.get(id)
    }

    /// All active-version nodes in a namespace (what the Graph Engine builds from).
    pub fn active_nodes_in(&self, namespace: Uuid) -> Vec<&Node> {
        self.active_nodes
            .iter()
            .filter(|((ns, _), _)| *ns == namespace)
            .filter_map(|(_, id)| self.nodes.get(id))
            .collect()
    }
}
