// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-row async locks standing in for `SELECT ... FOR UPDATE [SKIP LOCKED]`.
//!
//! The reference system runs against Postgres, where each campaign/node
//! mutation takes a row lock so concurrent workers don't race on the same
//! entity while still proceeding freely on unrelated ones. We have no
//! database here, so row locking is emulated with keyed `tokio::sync::Mutex`
//! guards: one per campaign id, one per node id, handed out from a registry
//! that's cleaned up lazily (an `Arc` with no other holders is dropped from
//! the map on release).

use cm_core::{CampaignId, NodeId};
use parking_lot::Mutex as SyncMutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct RowLocks {
    campaigns: SyncMutex<HashMap<CampaignId, Arc<Mutex<()>>>>,
    nodes: SyncMutex<HashMap<NodeId, Arc<Mutex<()>>>>,
}

/// Holds a row lock for as long as it's alive. Dropping it releases the row.
pub struct RowGuard(#[allow(dead_code)] OwnedMutexGuard<()>);

impl RowLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_campaign(&self, id: CampaignId) -> RowGuard {
        let mutex = {
            let mut table = self.campaigns.lock();
            table.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
        };
        let guard = mutex.lock_owned().await;
        self.evict_campaign_if_unused(id);
        RowGuard(guard)
    }

    pub async fn lock_node(&self, id: NodeId) -> RowGuard {
        let mutex = {
            let mut table = self.nodes.lock();
            table.entry(id).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
        };
        let guard = mutex.lock_owned().await;
        self.evict_node_if_unused(id);
        RowGuard(guard)
    }

    /// Lock several nodes at once, always in ascending id order, so two
    /// callers locking an overlapping set can never deadlock on each other.
    pub async fn lock_nodes(&self, mut ids: Vec<NodeId>) -> Vec<RowGuard> {
        ids.sort_unstable();
        ids.dedup();
        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            guards.push(self.lock_node(id).await);
        }
        guards
    }

    /// Best-effort shrink of the registry: drop entries nobody else holds a
    /// clone of. Racy by nature (another caller may grab a reference right
    /// after we check) but that only costs a map entry, never correctness.
    fn evict_campaign_if_unused(&self, id: CampaignId) {
        let mut table = self.campaigns.lock();
        if let Some(entry) = table.get(&id) {
            if Arc::strong_count(entry) == 1 {
                table.remove(&id);
            }
        }
    }

    fn evict_node_if_unused(&self, id: NodeId) {
        let mut table = self.nodes.lock();
        if let Some(entry) = table.get(&id) {
            if Arc::strong_count(entry) == 1 {
                table.remove(&id);
            }
        }
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
