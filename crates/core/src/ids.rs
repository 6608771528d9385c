// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity identifiers. All are UUIDv5-derived from parent context so that
//! re-deriving the same entity (e.g. re-preparing a Step) yields the same id.

crate::define_uuid_id!(
    /// Unique identifier for a campaign. `UUID5(parent_namespace, name)`.
    pub struct CampaignId;
);

crate::define_uuid_id!(
    /// Unique identifier for one version of a node. `UUID5(namespace, "name.version")`.
    pub struct NodeId;
);

crate::define_uuid_id!(
    /// Unique identifier for an edge. `UUID5(namespace, "source→target")`.
    pub struct EdgeId;
);

crate::define_uuid_id!(
    /// Unique identifier for one version of a manifest.
    pub struct ManifestId;
);

crate::define_uuid_id!(
    /// Unique identifier for a task-queue row.
    pub struct TaskId;
);

crate::define_uuid_id!(
    /// Unique identifier for an activity-log row.
    pub struct ActivityLogId;
);

crate::define_uuid_id!(
    /// Unique identifier for a persisted FSM snapshot.
    pub struct MachineId;
);

impl CampaignId {
    /// Derive a campaign id from its parent namespace and name.
    pub fn new(parent_namespace: uuid::Uuid, name: &str) -> Self {
        Self::derive(parent_namespace, name)
    }
}

impl NodeId {
    /// Derive a node id from its owning campaign namespace, name and version.
    pub fn new(namespace: uuid::Uuid, name: &str, version: u32) -> Self {
        Self::derive(namespace, &format!("{name}.{version}"))
    }
}

impl EdgeId {
    /// Derive an edge id from its namespace and endpoint ids.
    pub fn new(namespace: uuid::Uuid, source: NodeId, target: NodeId) -> Self {
        Self::derive(namespace, &format!("{source}\u{2192}{target}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn node_id_is_deterministic() {
        let ns = Uuid::new_v4();
        let a = NodeId::new(ns, "step-a", 1);
        let b = NodeId::new(ns, "step-a", 1);
        assert_eq!(a, b);
        let c = NodeId::new(ns, "step-a", 2);
        assert_ne!(a, c);
    }

    #[test]
    fn edge_id_is_directional() {
        let ns = Uuid::new_v4();
        let n1 = NodeId::new(ns, "a", 1);
        let n2 = NodeId::new(ns, "b", 1);
        assert_ne!(EdgeId::new(ns, n1, n2), EdgeId::new(ns, n2, n1));
    }
}
