// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-place graph mutations (§4.2): replace, insert, append, delete+heal.
//! Every mutation requires the owning campaign to be paused or pre-running,
//! locks every node it touches, validates the resulting edge set for
//! cycles before committing, and writes all edge changes in one
//! transaction via `Store::commit_all`.

use crate::{build, Graph};
use cm_core::{CampaignId, CoreError, Edge, EdgeId, NodeId};
use cm_storage::{Event, Store};
use petgraph::algo::is_cyclic_directed;
use uuid::Uuid;

fn ensure_mutable(store: &Store, namespace: Uuid) -> Result<(), CoreError> {
    let campaign_id = CampaignId::from_uuid(namespace);
    let state = store.state();
    let campaign = state.campaign(campaign_id).ok_or_else(|| CoreError::NotFound { kind: "Campaign", id: namespace.to_string() })?;
    if campaign.status.accepts_mutation() {
        Ok(())
    } else {
        Err(CoreError::CampaignLocked(format!("campaign {campaign_id} is {}", campaign.status)))
    }
}

fn would_cycle(g: &Graph, added: &[(NodeId, NodeId)], removed: &[(NodeId, NodeId)]) -> bool {
    let mut trial = g.edges.clone();
    for (a, b) in removed {
        trial.remove_edge(*a, *b);
    }
    for (a, b) in added {
        trial.add_edge(*a, *b, ());
    }
    is_cyclic_directed(&trial)
}

/// Rewire every `(_, n0)` edge to `(_, n1)` and every `(n0, _)` edge to
/// `(n1, _)`. Rejects if the result would create a cycle.
pub async fn replace(store: &Store, namespace: Uuid, n0: NodeId, n1: NodeId) -> Result<(), CoreError> {
    ensure_mutable(store, namespace)?;
    {
        let state = store.state();
        let node = state.node(n0).ok_or_else(|| CoreError::NotFound { kind: "Node", id: n0.to_string() })?;
        if node.is_sentinel() {
            return Err(CoreError::InvalidRequest("cannot replace a start/end sentinel".into()));
        }
    }
    let _guards = store.lock_nodes(vec![n0, n1]).await;

    let g = build(store, namespace);
    let mut added = Vec::new();
    let mut removed = Vec::new();
    for pred in g.edges.neighbors_directed(n0, petgraph::Direction::Incoming) {
        removed.push((pred, n0));
        added.push((pred, n1));
    }
    for succ in g.edges.neighbors_directed(n0, petgraph::Direction::Outgoing) {
        removed.push((n0, succ));
        added.push((n1, succ));
    }

    if would_cycle(&g, &added, &removed) {
        return Err(CoreError::InvalidCampaignGraphError("replace would create a cycle".into()));
    }

    commit_rewiring(store, namespace, &added, &removed).await
}

/// Retarget every `(n0, x)` edge to `(n1, x)` and add `(n0, n1)`.
pub async fn insert(store: &Store, namespace: Uuid, n0: NodeId, n1: NodeId) -> Result<(), CoreError> {
    ensure_mutable(store, namespace)?;
    let _guards = store.lock_nodes(vec![n0, n1]).await;

    let g = build(store, namespace);
    let mut added = vec![(n0, n1)];
    let mut removed = Vec::new();
    for succ in g.edges.neighbors_directed(n0, petgraph::Direction::Outgoing) {
        removed.push((n0, succ));
        added.push((n1, succ));
    }

    if would_cycle(&g, &added, &removed) {
        return Err(CoreError::InvalidCampaignGraphError("insert would create a cycle".into()));
    }

    commit_rewiring(store, namespace, &added, &removed).await
}

/// Create `n1` with the same predecessor and successor set as `n0`.
/// Forbidden when `n0` is a START/END sentinel.
pub async fn append(store: &Store, namespace: Uuid, n0: NodeId, n1: NodeId) -> Result<(), CoreError> {
    ensure_mutable(store, namespace)?;
    {
        let state = store.state();
        let node = state.node(n0).ok_or_else(|| CoreError::NotFound { kind: "Node", id: n0.to_string() })?;
        if node.is_sentinel() {
            return Err(CoreError::InvalidRequest("cannot append parallel to a start/end sentinel".into()));
        }
    }
    let _guards = store.lock_nodes(vec![n0, n1]).await;

    let g = build(store, namespace);
    let mut added = Vec::new();
    for pred in g.edges.neighbors_directed(n0, petgraph::Direction::Incoming) {
        added.push((pred, n1));
    }
    for succ in g.edges.neighbors_directed(n0, petgraph::Direction::Outgoing) {
        added.push((n1, succ));
    }

    if would_cycle(&g, &added, &[]) {
        return Err(CoreError::InvalidCampaignGraphError("append would create a cycle".into()));
    }

    commit_rewiring(store, namespace, &added, &[]).await
}

/// For every `(p, n0)` and `(n0, s)`, create `(p, s)` if not already
/// present (when `heal` is true), then remove `n0`'s incident edges.
pub async fn delete(store: &Store, namespace: Uuid, n0: NodeId, heal: bool) -> Result<(), CoreError> {
    ensure_mutable(store, namespace)?;
    {
        let state = store.state();
        let node = state.node(n0).ok_or_else(|| CoreError::NotFound { kind: "Node", id: n0.to_string() })?;
        if node.is_sentinel() {
            return Err(CoreError::InvalidRequest("cannot delete a start/end sentinel".into()));
        }
    }
    let _guard = store.lock_node(n0).await;

    let g = build(store, namespace);
    let preds: Vec<NodeId> = g.edges.neighbors_directed(n0, petgraph::Direction::Incoming).collect();
    let succs: Vec<NodeId> = g.edges.neighbors_directed(n0, petgraph::Direction::Outgoing).collect();

    let mut removed = Vec::new();
    for p in &preds {
        removed.push((*p, n0));
    }
    for s in &succs {
        removed.push((n0, *s));
    }

    let mut added = Vec::new();
    if heal {
        for p in &preds {
            for s in &succs {
                if !g.edges.contains_edge(*p, *s) {
                    added.push((*p, *s));
                }
            }
        }
    }

    commit_rewiring(store, namespace, &added, &removed).await
}

async fn commit_rewiring(store: &Store, namespace: Uuid, added: &[(NodeId, NodeId)], removed: &[(NodeId, NodeId)]) -> Result<(), CoreError> {
    let mut events = Vec::new();
    for (a, b) in removed {
        let id = EdgeId::new(namespace, *a, *b);
        events.push(Event::EdgeRemoved(id));
    }
    for (a, b) in added {
        events.push(Event::EdgeWritten(Edge::new(namespace, *a, *b)));
    }
    store.commit_all(events)?;
    Ok(())
}

#[cfg(test)]
#[path = "mutations_tests.rs"]
mod tests;
