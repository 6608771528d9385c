// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{Edge, EdgeId};
use uuid::Uuid;

impl MaterializedState {
    pub(super) fn put_edge(&mut self, edge: Edge) {
        let ns = edge.namespace;
        let id = edge.id;
        if !self.edges.contains_key(&id) {
            self.edges_by_namespace.entry(ns).or_default().push(id);
        }
        self.edges.insert(id, edge);
    }

    pub(super) fn remove_edge(&mut self, id: EdgeId) {
        if let Some(edge) = self.edges.remove(&id) {
            if let Some(list) = self.edges_by_namespace.get_mut(&edge.namespace) {
                list.retain(|e| *e != id);
            }
        }
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edges_in(&self, namespace: Uuid) -> Vec<&Edge> {
        self.edges_by_namespace.get(&namespace).into_iter().flatten().filter_map(|id| self.edges.get(id)).collect()
    }
}
