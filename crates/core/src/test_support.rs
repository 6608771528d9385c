// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures for other crates' tests (gated by `test-support`).

use crate::{Campaign, CampaignStatus, Node, NodeKind};
use serde_json::Value;
use uuid::Uuid;

/// Build the two sentinel nodes every campaign owns (§3: exactly one
/// `START` version 1 and one `END` version 1).
pub fn sentinel_nodes(namespace: Uuid) -> (Node, Node) {
    (Node::new(namespace, "START", NodeKind::Start, Value::Null), Node::new(namespace, "END", NodeKind::End, Value::Null))
}

/// A ready-to-run campaign with just the sentinel pair, for tests that
/// build up a graph incrementally.
pub fn empty_campaign(name: &str) -> Campaign {
    Campaign::builder().name(name).status(CampaignStatus::Waiting).build()
}
