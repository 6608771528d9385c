// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Machine snapshot (§3, §9): an opaque, serialized copy of an FSM's
//! state, so a subsequent worker can resume a node's transition-local
//! context across process restarts without re-deriving it.

use crate::ids::MachineId;
use crate::status::{StatusEnum, Trigger};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the Node FSM persists after every committed transition. `transient`
/// is opaque to everything except the transition code that wrote it (e.g.
/// the in-progress anchor-group id while a Step is expanding).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub id: MachineId,
    pub status: StatusEnum,
    pub trigger: Trigger,
    #[serde(default)]
    pub transient: Value,
}

impl MachineSnapshot {
    pub fn new(status: StatusEnum, trigger: Trigger, transient: Value) -> Self {
        Self { id: MachineId::from_uuid(uuid::Uuid::new_v4()), status, trigger, transient }
    }
}
