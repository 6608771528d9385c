// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Campaign entity (§3).

use crate::ids::{CampaignId, MachineId};
use crate::status::CampaignStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A top-level persistent unit of work: a namespace owning a graph of nodes
/// and edges, and a library of manifests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    /// UUID of the containing campaign, or the fixed root namespace.
    pub namespace: Uuid,
    pub owner: String,
    pub status: CampaignStatus,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub spec: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineId>,
}

impl Campaign {
    /// Create a new campaign in `Waiting` status. Per §4.4, `waiting → ready`
    /// happens automatically once creation completes; callers transition it
    /// immediately after persisting.
    pub fn new(name: impl Into<String>, namespace: Uuid, owner: impl Into<String>, spec: Value) -> Self {
        let name = name.into();
        let id = CampaignId::new(namespace, &name);
        Self { id, name, namespace, owner: owner.into(), status: CampaignStatus::Waiting, metadata: Value::Object(Default::default()), spec, machine: None }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub struct CampaignBuilder {
    name: String,
    namespace: Uuid,
    owner: String,
    status: CampaignStatus,
    metadata: Value,
    spec: Value,
    machine: Option<MachineId>,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for CampaignBuilder {
    fn default() -> Self {
        Self {
            name: "test-campaign".into(),
            namespace: crate::namespace::root(),
            owner: "tester".into(),
            status: CampaignStatus::Waiting,
            metadata: Value::Object(Default::default()),
            spec: Value::Object(Default::default()),
            machine: None,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CampaignBuilder {
    crate::setters! {
        into { name: String, owner: String }
        set { status: CampaignStatus, namespace: Uuid, metadata: Value, spec: Value }
        option { machine: MachineId }
    }

    pub fn build(self) -> Campaign {
        let id = CampaignId::new(self.namespace, &self.name);
        Campaign { id, name: self.name, namespace: self.namespace, owner: self.owner, status: self.status, metadata: self.metadata, spec: self.spec, machine: self.machine }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Campaign {
    pub fn builder() -> CampaignBuilder {
        CampaignBuilder::default()
    }
}

#[cfg(test)]
#[path = "campaign_tests.rs"]
mod tests;
