// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL event log. Every durable write to the store is first appended here;
//! `MaterializedState` is rebuilt by replaying these in order, keeping the
//! append-only log and the derived in-memory state strictly separate.

use cm_core::{ActivityLogEntry, Campaign, Edge, EdgeId, Manifest, MachineSnapshot, Node, Task, TaskId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CampaignWritten(Campaign),
    /// A new node version was written; it becomes the active version for
    /// `(namespace, name)` unless `activate` is false (used when preserving
    /// an old version purely for audit, e.g. right before a Replace mutation
    /// swaps the active pointer explicitly via `NodeActivated`).
    NodeWritten { node: Node, activate: bool },
    NodeActivated { namespace: uuid::Uuid, name: String, node: cm_core::NodeId },
    EdgeWritten(Edge),
    EdgeRemoved(EdgeId),
    ManifestWritten(Manifest),
    TaskWritten(Task),
    TaskRemoved(TaskId),
    ActivityLogAppended(ActivityLogEntry),
    MachineWritten(MachineSnapshot),
}
