// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest entity (§3): a versioned configuration document.

use crate::ids::ManifestId;
use crate::status::ManifestKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub id: ManifestId,
    pub name: String,
    /// Campaign.id, or the fixed library namespace.
    pub namespace: Uuid,
    pub version: u32,
    pub kind: ManifestKind,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub spec: Value,
    /// Resolver hint only (§3 ADDED note); never authoritative for chain depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_depth_hint: Option<u8>,
}

impl Manifest {
    pub fn new(namespace: Uuid, kind: ManifestKind, name: impl Into<String>, spec: Value) -> Self {
        Self::versioned(namespace, kind, name, 1, spec)
    }

    pub fn versioned(namespace: Uuid, kind: ManifestKind, name: impl Into<String>, version: u32, spec: Value) -> Self {
        let name = name.into();
        let id = ManifestId::derive(namespace, &format!("{kind}.{name}.{version}"));
        Self { id, name, namespace, version, kind, metadata: Value::Object(Default::default()), spec, resolution_depth_hint: None }
    }

    pub fn next_version(&self, spec: Value) -> Self {
        Self::versioned(self.namespace, self.kind, self.name.clone(), self.version + 1, spec)
    }
}
