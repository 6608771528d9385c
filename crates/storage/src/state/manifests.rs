// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{Manifest, ManifestId, ManifestKind};
use uuid::Uuid;

impl MaterializedState {
    pub(super) fn put_manifest(&mut self, manifest: Manifest) {
        let key = (manifest.namespace, manifest.kind.to_string(), manifest.name.clone());
        let id = manifest.id;
        let versions = self.manifest_versions.entry(key).or_default();
        if !versions.contains(&id) {
            versions.push(id);
        }
        self.manifests.insert(id, manifest);
    }

    pub fn manifest(&self, id: ManifestId) -> Option<&Manifest> {
        self.manifests.get(&id)
    }

    /// Newest version of `(namespace, kind, name)`, or `None` if it has never existed.
    pub fn newest_manifest(&self, namespace: Uuid, kind: ManifestKind, name: &str) -> Option<&Manifest> {
        let key = (namespace, kind.to_string(), name.to_string());
        let id = self.manifest_versions.get(&key)?.last()?;
        self.manifests.get(id)
    }

    /// Newest manifest of `kind` in `namespace`, regardless of name (used
    /// when `get`'s `name` argument is omitted per §4.1).
    pub fn newest_manifest_of_kind(&self, namespace: Uuid, kind: ManifestKind) -> Option<&Manifest> {
        self.manifest_versions
            .keys()
            .filter(|(ns, k, _)| *ns == namespace && *k == kind.to_string())
            .filter_map(|key| self.manifest_versions[key].last())
            .filter_map(|id| self.manifests.get(id))
            .max_by_key(|m| m.version)
    }

    pub fn manifest_version(&self, namespace: Uuid, kind: ManifestKind, name: &str, version: u32) -> Option<&Manifest> {
        let key = (namespace, kind.to_string(), name.to_string());
        self.manifest_versions.get(&key)?.iter().filter_map(|id| self.manifests.get(id)).find(|m| m.version == version)
    }

    /// All version numbers of `(namespace, kind, name)` in ascending order
    /// (tested against invariant 4: `{1, 2, ..., k}` with no gaps).
    pub fn manifest_version_numbers(&self, namespace: Uuid, kind: ManifestKind, name: &str) -> Vec<u32> {
        let key = (namespace, kind.to_string(), name.to_string());
        let mut versions: Vec<u32> =
            self.manifest_versions.get(&key).into_iter().flatten().filter_map(|id| self.manifests.get(id)).map(|m| m.version).collect();
        versions.sort_unstable();
        versions
    }
}
