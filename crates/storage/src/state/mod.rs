// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized state folded from WAL replay — one `HashMap` per entity
//! table named in §3/§6, plus the append-only activity log.

mod activity_log;
mod campaigns;
mod edges;
mod machines;
mod manifests;
mod nodes;
mod tasks;

use crate::event::Event;
use cm_core::{ActivityLogEntry, Campaign, CampaignId, Edge, EdgeId, MachineId, MachineSnapshot, Manifest, ManifestId, Node, NodeId, Task, TaskId};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MaterializedState {
    pub(crate) campaigns: HashMap<CampaignId, Campaign>,
    /// All node versions, including superseded ones (kept for audit).
    pub(crate) nodes: HashMap<NodeId, Node>,
    /// The one active version per `(namespace, name)` (invariant 5).
    pub(crate) active_nodes: HashMap<(Uuid, String), NodeId>,
    pub(crate) edges: HashMap<EdgeId, Edge>,
    pub(crate) edges_by_namespace: HashMap<Uuid, Vec<EdgeId>>,
    pub(crate) manifests: HashMap<ManifestId, Manifest>,
    /// Every version id of `(namespace, kind, name)`, in version order.
    pub(crate) manifest_versions: HashMap<(Uuid, String, String), Vec<ManifestId>>,
    pub(crate) tasks: HashMap<TaskId, Task>,
    pub(crate) activity_log: Vec<ActivityLogEntry>,
    pub(crate) machines: HashMap<MachineId, MachineSnapshot>,
}

impl MaterializedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one WAL event into the in-memory tables. Never fails: events are
    /// only ever written after the operation they describe has already been
    /// validated by the caller (§4.2's "validate, then mutate in one txn").
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::CampaignWritten(c) => self.put_campaign(c),
            Event::NodeWritten { node, activate } => self.put_node(node, activate),
            Event::NodeActivated { namespace, name, node } => self.activate_node(namespace, name, node),
            Event::EdgeWritten(e) => self.put_edge(e),
            Event::EdgeRemoved(id) => self.remove_edge(id),
            Event::ManifestWritten(m) => self.put_manifest(m),
            Event::TaskWritten(t) => self.put_task(t),
            Event::TaskRemoved(id) => self.remove_task(id),
            Event::ActivityLogAppended(entry) => self.activity_log.push(entry),
            Event::MachineWritten(snap) => self.put_machine(snap),
        }
    }
}
