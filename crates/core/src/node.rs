// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node entity (§3): the unit of work and graph vertex.

use crate::ids::{MachineId, NodeId};
use crate::status::{NodeKind, StatusEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A versioned graph vertex. Editing a node produces a new version with an
/// incremented number; the old version remains for audit (invariant 5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Owning campaign id.
    pub namespace: Uuid,
    pub name: String,
    pub version: u32,
    pub kind: NodeKind,
    pub status: StatusEnum,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub configuration: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineId>,
}

impl Node {
    /// Create version 1 of a node with the given kind, starting in `Waiting`
    /// (Start/End sentinels are created directly in a ready-to-run state by
    /// the campaign constructor instead; see `cm_graph::seed_sentinels`).
    pub fn new(namespace: Uuid, name: impl Into<String>, kind: NodeKind, configuration: Value) -> Self {
        Self::versioned(namespace, name, 1, kind, configuration)
    }

    /// Create an explicit version of a node (used for re-versioning edits,
    /// and for deterministic re-derivation of expanded Step/Group nodes).
    pub fn versioned(namespace: Uuid, name: impl Into<String>, version: u32, kind: NodeKind, configuration: Value) -> Self {
        let name = name.into();
        let id = NodeId::new(namespace, &name, version);
        Self { id, namespace, name, version, kind, status: StatusEnum::Waiting, metadata: Value::Object(Default::default()), configuration, machine: None }
    }

    /// Produce the next version of this node (same name, version + 1),
    /// preserving `self` as the audit trail (caller re-inserts both rows).
    pub fn next_version(&self, configuration: Value) -> Self {
        Self::versioned(self.namespace, self.name.clone(), self.version + 1, self.kind, configuration)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, NodeKind::Start | NodeKind::End)
    }
}

#[cfg(any(test, feature = "test-support"))]
pub struct NodeBuilder {
    namespace: Uuid,
    name: String,
    version: u32,
    kind: NodeKind,
    status: StatusEnum,
    metadata: Value,
    configuration: Value,
    machine: Option<MachineId>,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for NodeBuilder {
    fn default() -> Self {
        Self {
            namespace: crate::namespace::root(),
            name: "node".into(),
            version: 1,
            kind: NodeKind::Action,
            status: StatusEnum::Waiting,
            metadata: Value::Object(Default::default()),
            configuration: Value::Object(Default::default()),
            machine: None,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl NodeBuilder {
    crate::setters! {
        into { name: String }
        set { namespace: Uuid, version: u32, kind: NodeKind, status: StatusEnum, metadata: Value, configuration: Value }
        option { machine: MachineId }
    }

    pub fn build(self) -> Node {
        let id = NodeId::new(self.namespace, &self.name, self.version);
        Node {
            id,
            namespace: self.namespace,
            name: self.name,
            version: self.version,
            kind: self.kind,
            status: self.status,
            metadata: self.metadata,
            configuration: self.configuration,
            machine: self.machine,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Node {
    pub fn builder() -> NodeBuilder {
        NodeBuilder::default()
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
