// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration-chain resolver (§4.6): library defaults → the
//! campaign's own manifests of the mandatory kinds → the step's own
//! configuration → the group's own configuration. List fields concatenate
//! across levels; scalar fields are overridden by the higher-precedence
//! level. Pure and deterministic — no I/O beyond reading the store.

use cm_core::{CoreError, ManifestKind, Node};
use cm_storage::Store;
use serde_json::Value;
use uuid::Uuid;

/// Manifests may `extends` another manifest of the same kind/namespace; this
/// bounds that chase so a typo'd or circular `extends` can't loop forever.
pub const MAX_CHAIN_DEPTH: u8 = 5;

/// Resolve the effective configuration for `step` (and, once expanded, one
/// of its `group` children). A mandatory kind absent from both the library
/// and the campaign is *UnknownManifest* (§7); present at either level, the
/// two layers simply chain in precedence order like everything else.
pub fn resolve(store: &Store, namespace: Uuid, step: &Node, group: Option<&Node>) -> Result<Value, CoreError> {
    let mut config = Value::Object(serde_json::Map::new());

    for kind in ManifestKind::MANDATORY {
        let root = cm_manifest::get(store, cm_core::namespace::root(), kind, None, None);
        let campaign = cm_manifest::get(store, namespace, kind, None, None);
        if root.is_err() && campaign.is_err() {
            return Err(CoreError::UnknownManifest(kind.to_string()));
        }
        if let Ok(manifest) = root {
            let spec = resolve_manifest_spec(store, kind, &manifest.namespace, &manifest.spec, 0)?;
            merge_chain(&mut config, &spec);
        }
        if let Ok(manifest) = campaign {
            let spec = resolve_manifest_spec(store, kind, &manifest.namespace, &manifest.spec, 0)?;
            merge_chain(&mut config, &spec);
        }
    }

    merge_chain(&mut config, &step.configuration);
    if let Some(group) = group {
        merge_chain(&mut config, &group.configuration);
    }
    Ok(config)
}

/// Follow an optional `extends: <manifest name>` reference within the same
/// `(namespace, kind)`, capped at [`MAX_CHAIN_DEPTH`].
fn resolve_manifest_spec(store: &Store, kind: ManifestKind, namespace: &Uuid, spec: &Value, depth: u8) -> Result<Value, CoreError> {
    let Some(parent_name) = spec.get("extends").and_then(Value::as_str).map(str::to_string) else {
        return Ok(spec.clone());
    };
    if depth + 1 >= MAX_CHAIN_DEPTH {
        return Err(CoreError::InvalidRequest(format!("configuration chain for {kind} exceeds max depth ({MAX_CHAIN_DEPTH})")));
    }
    let parent = cm_manifest::get(store, *namespace, kind, Some(&parent_name), None)?;
    let mut resolved = resolve_manifest_spec(store, kind, namespace, &parent.spec, depth + 1)?;
    let mut own = spec.clone();
    if let Value::Object(map) = &mut own {
        map.remove("extends");
    }
    merge_chain(&mut resolved, &own);
    Ok(resolved)
}

/// Merge `overlay` into `base`: objects merge key-wise, arrays concatenate,
/// anything else is overridden by `overlay`.
pub fn merge_chain(base: &mut Value, overlay: &Value) {
    match overlay {
        Value::Object(overlay_map) => {
            if !base.is_object() {
                *base = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(base_map) = base {
                for (k, v) in overlay_map {
                    match base_map.get_mut(k) {
                        Some(existing) => merge_chain(existing, v),
                        None => {
                            base_map.insert(k.clone(), v.clone());
                        }
                    }
                }
            }
        }
        Value::Array(overlay_arr) => {
            if let Value::Array(base_arr) = base {
                base_arr.extend(overlay_arr.iter().cloned());
            } else {
                *base = Value::Array(overlay_arr.clone());
            }
        }
        other => *base = other.clone(),
    }
}

#[cfg(test)]
#[path = "config_chain_tests.rs"]
mod tests;
