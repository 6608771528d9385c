// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cm-manifest: CRUD and versioned lookup for configuration documents
//! (§4.1), plus the merge/json-patch machinery §4.4 also reuses for
//! campaign status patches.

pub mod patch;

use cm_core::{CampaignId, CoreError, Manifest, ManifestId, ManifestKind};
use cm_storage::Store;
use patch::PatchRequest;
use serde_json::Value;
use uuid::Uuid;

/// Create version 1 of a manifest. `namespace` defaults to the library
/// namespace when omitted; an explicit namespace must name an existing
/// campaign.
pub fn create(store: &Store, kind: ManifestKind, name: &str, namespace: Option<Uuid>, spec: Value) -> Result<Manifest, CoreError> {
    let namespace = resolve_namespace(store, namespace)?;
    let manifest = Manifest::new(namespace, kind, name, spec);
    store.write_manifest(manifest.clone())?;
    Ok(manifest)
}

/// Look up a manifest. `version` omitted returns the newest version;
/// `name` omitted returns the newest manifest of `kind` in the namespace.
pub fn get(store: &Store, namespace: Uuid, kind: ManifestKind, name: Option<&str>, version: Option<u32>) -> Result<Manifest, CoreError> {
    let state = store.state();
    let found = match (name, version) {
        (Some(name), Some(version)) => state.manifest_version(namespace, kind, name, version),
        (Some(name), None) => state.newest_manifest(namespace, kind, name),
        (None, _) => state.newest_manifest_of_kind(namespace, kind),
    };
    found.cloned().ok_or_else(|| CoreError::NotFound { kind: "Manifest", id: format!("{namespace}/{kind}/{}", name.unwrap_or("*")) })
}

/// Apply a patch, writing a new version. Older versions remain fetchable.
pub fn patch(store: &Store, id: ManifestId, request: PatchRequest) -> Result<Manifest, CoreError> {
    let current = store.state().manifest(id).cloned().ok_or_else(|| CoreError::NotFound { kind: "Manifest", id: id.to_string() })?;

    let mut doc = serde_json::json!({ "spec": current.spec, "metadata": current.metadata });
    patch::apply(&mut doc, &request)?;

    let next = Manifest {
        spec: doc["spec"].take(),
        metadata: doc["metadata"].take(),
        ..current.next_version(Value::Null)
    };
    store.write_manifest(next.clone())?;
    Ok(next)
}

/// Copy a manifest (typically a library default) into another namespace as
/// version 1 there. `to_name` defaults to the source's own name.
pub fn copy(store: &Store, id: ManifestId, to_namespace: Uuid, to_name: Option<&str>) -> Result<Manifest, CoreError> {
    let source = store.state().manifest(id).cloned().ok_or_else(|| CoreError::NotFound { kind: "Manifest", id: id.to_string() })?;
    let name = to_name.unwrap_or(&source.name);
    let copied = Manifest::new(to_namespace, source.kind, name, source.spec.clone());
    store.write_manifest(copied.clone())?;
    Ok(copied)
}

fn resolve_namespace(store: &Store, namespace: Option<Uuid>) -> Result<Uuid, CoreError> {
    match namespace {
        None => Ok(cm_core::namespace::root()),
        Some(ns) => {
            let exists = store.state().all_campaigns().any(|c| c.id == CampaignId::from_uuid(ns));
            if exists {
                Ok(ns)
            } else {
                Err(CoreError::UnknownNamespace(ns.to_string()))
            }
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
