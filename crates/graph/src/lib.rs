// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cm-graph: builds the in-memory DAG from persisted edges/nodes, validates
//! it, and performs the in-place mutations of §4.2.

pub mod mutations;
pub mod node_link;

use cm_core::{CoreError, Node, NodeKind};
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::{Dfs, Reversed};
use cm_storage::Store;
use std::collections::HashSet;
use uuid::Uuid;

pub use cm_core::NodeId;
pub use node_link::{to_node_link, NodeLink};

/// The in-memory DAG for one campaign namespace: vertex ids only, node
/// payloads are looked up from the `Store` as needed by callers.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub edges: DiGraphMap<NodeId, ()>,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    /// Set when a second Start/End node is found while building; `validate`
    /// rejects on these rather than silently keeping the first one seen.
    pub duplicate_start: bool,
    pub duplicate_end: bool,
}

/// Build the graph for `namespace` from its active-version nodes and edges.
pub fn build(store: &Store, namespace: Uuid) -> Graph {
    let state = store.state();
    let mut g = Graph::default();
    for node in state.active_nodes_in(namespace) {
        g.edges.add_node(node.id);
        match node.kind {
            NodeKind::Start => {
                if g.start.is_some() {
                    g.duplicate_start = true;
                } else {
                    g.start = Some(node.id);
                }
            }
            NodeKind::End => {
                if g.end.is_some() {
                    g.duplicate_end = true;
                } else {
                    g.end = Some(node.id);
                }
            }
            _ => {}
        }
    }
    for edge in state.edges_in(namespace) {
        g.edges.add_edge(edge.source, edge.target, ());
    }
    g
}

/// `validate_graph(g, start, end) -> bool` from §4.2: true iff every
/// invariant in §3 holds — exactly one START/END, acyclic, and every
/// non-sentinel node reachable from START and able to reach END.
pub fn is_valid(g: &Graph) -> bool {
    validate(g).is_ok()
}

/// Same check as [`is_valid`] but with the failure reason, for callers (the
/// Campaign FSM) that need to record `InvalidCampaignGraphError` detail.
pub fn validate(g: &Graph) -> Result<(), CoreError> {
    let start = g.start.ok_or_else(|| CoreError::InvalidCampaignGraphError("missing START node".into()))?;
    let end = g.end.ok_or_else(|| CoreError::InvalidCampaignGraphError("missing END node".into()))?;
    if g.duplicate_start {
        return Err(CoreError::InvalidCampaignGraphError("graph has more than one START node".into()));
    }
    if g.duplicate_end {
        return Err(CoreError::InvalidCampaignGraphError("graph has more than one END node".into()));
    }
    if is_cyclic_directed(&g.edges) {
        return Err(CoreError::InvalidCampaignGraphError("graph contains a cycle".into()));
    }

    let mut reachable_from_start = HashSet::new();
    let mut forward = Dfs::new(&g.edges, start);
    while let Some(n) = forward.next(&g.edges) {
        reachable_from_start.insert(n);
    }
    if let Some(unreachable) = g.edges.nodes().find(|&n| n != start && !reachable_from_start.contains(&n)) {
        return Err(CoreError::InvalidCampaignGraphError(format!("node {unreachable} is unreachable from START")));
    }

    let reversed = Reversed(&g.edges);
    let mut reaches_end = HashSet::new();
    let mut backward = Dfs::new(&reversed, end);
    while let Some(n) = backward.next(&reversed) {
        reaches_end.insert(n);
    }
    if let Some(dead_end) = g.edges.nodes().find(|&n| n != end && !reaches_end.contains(&n)) {
        return Err(CoreError::InvalidCampaignGraphError(format!("node {dead_end} cannot reach END")));
    }

    Ok(())
}

/// Topological walk from START, yielding the nodes in the processable set
/// (§4.2): non-terminal, non-paused status, with every predecessor
/// terminal-successful. START is always first if it is not yet terminal.
pub fn processable_nodes(store: &Store, namespace: Uuid) -> Vec<Node> {
    let g = build(store, namespace);
    let state = store.state();
    let order = match toposort(&g.edges, None) {
        Ok(order) => order,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for id in order {
        let Some(node) = state.node(id) else { continue };
        if node.status.is_terminal() || node.status == cm_core::StatusEnum::Paused {
            continue;
        }
        let predecessors_ready = g
            .edges
            .neighbors_directed(id, petgraph::Direction::Incoming)
            .all(|pred| state.node(pred).is_some_and(|p| p.status.is_terminal_successful()));
        if predecessors_ready {
            out.push(node.clone());
        }
    }
    out
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
