// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edge entity (§3): a directed arc between two nodes in one namespace.

use crate::ids::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    /// May be random; purely descriptive.
    pub name: String,
    pub namespace: Uuid,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub configuration: Value,
}

impl Edge {
    pub fn new(namespace: Uuid, source: NodeId, target: NodeId) -> Self {
        let id = EdgeId::new(namespace, source, target);
        Self { id, name: format!("edge-{id}"), namespace, source, target, metadata: Value::Object(Default::default()), configuration: Value::Object(Default::default()) }
    }
}
