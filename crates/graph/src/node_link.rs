// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The node-link export named by invariant 7 (§8): a serialisable
//! `{nodes, links}` form of a [`Graph`], and the inverse that rebuilds a
//! `Graph` from it. Round-tripping through this form must be a no-op under
//! node-id-preserving isomorphism — no node or edge gained or lost.

use crate::{Graph, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeLink {
    pub nodes: Vec<NodeId>,
    pub links: Vec<(NodeId, NodeId)>,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
}

/// Export `g` as the node-link form. Node order follows `petgraph`'s
/// internal iteration, which is stable for a given graph but not
/// significant to the isomorphism check.
pub fn to_node_link(g: &Graph) -> NodeLink {
    use petgraph::visit::IntoNodeIdentifiers;
    NodeLink {
        nodes: g.edges.node_identifiers().collect(),
        links: g.edges.all_edges().map(|(a, b, ())| (a, b)).collect(),
        start: g.start,
        end: g.end,
    }
}

/// Rebuild a `Graph` from its node-link form.
pub fn from_node_link(link: &NodeLink) -> Graph {
    let mut g = Graph::default();
    for &node in &link.nodes {
        g.edges.add_node(node);
    }
    for &(a, b) in &link.links {
        g.edges.add_edge(a, b, ());
    }
    g.start = link.start;
    g.end = link.end;
    g
}

/// Two graphs are equal under node-id-preserving isomorphism iff they
/// share the same vertex set, the same edge set, and the same start/end.
pub fn isomorphic(a: &Graph, b: &Graph) -> bool {
    use petgraph::visit::IntoNodeIdentifiers;
    use std::collections::BTreeSet;
    let nodes_a: BTreeSet<NodeId> = a.edges.node_identifiers().collect();
    let nodes_b: BTreeSet<NodeId> = b.edges.node_identifiers().collect();
    let edges_a: BTreeSet<(NodeId, NodeId)> = a.edges.all_edges().map(|(x, y, ())| (x, y)).collect();
    let edges_b: BTreeSet<(NodeId, NodeId)> = b.edges.all_edges().map(|(x, y, ())| (x, y)).collect();
    nodes_a == nodes_b && edges_a == edges_b && a.start == b.start && a.end == b.end
}

#[cfg(test)]
#[path = "node_link_tests.rs"]
mod tests;
