// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ActivityLog entity (§3): append-only record of every attempted
//! transition. The single audit channel (§9) — user-visible status changes,
//! patch rejections, and background-task outcomes all flow through here.

use crate::ids::{ActivityLogId, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub id: ActivityLogId,
    pub namespace: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    pub operator: String,
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<u64>,
    pub from_status: String,
    pub to_status: String,
    /// Carries `trigger`, optional `exception`/`error`, optional `message`,
    /// and an optional `request_id` for correlation.
    #[serde(default)]
    pub detail: Value,
    #[serde(default)]
    pub metadata: Value,
}

impl ActivityLogEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        namespace: Uuid,
        node: Option<NodeId>,
        operator: impl Into<String>,
        created_at: u64,
        from_status: impl Into<String>,
        to_status: impl Into<String>,
        detail: Value,
    ) -> Self {
        Self {
            id: ActivityLogId::from_uuid(Uuid::new_v4()),
            namespace,
            node,
            operator: operator.into(),
            created_at,
            finished_at: None,
            from_status: from_status.into(),
            to_status: to_status.into(),
            detail,
            metadata: Value::Object(Default::default()),
        }
    }
}
