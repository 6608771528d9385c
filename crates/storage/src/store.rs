// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Store`: the handle every other crate mutates state through. Bundles the
//! WAL, the materialized tables folded from it, and the row-lock registry
//! emulating `SELECT ... FOR UPDATE` behind one type.

use crate::error::StorageError;
use crate::event::Event;
use crate::locks::{RowGuard, RowLocks};
use crate::state::MaterializedState;
use crate::wal::Wal;
use cm_core::{
    ActivityLogEntry, Campaign, CampaignId, Edge, EdgeId, MachineSnapshot, Manifest, Node, NodeId, Task, TaskId,
};
use parking_lot::{Mutex, MutexGuard};
use std::path::Path;
use uuid::Uuid;

pub struct Store {
    wal: Mutex<Wal>,
    state: Mutex<MaterializedState>,
    locks: RowLocks,
}

impl Store {
    /// Open the store at `path`, replaying any existing WAL into a fresh
    /// `MaterializedState` before accepting new writes.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let mut state = MaterializedState::new();
        let write_seq = Wal::replay(path.as_ref(), |event| state.apply(event))?;
        let wal = Wal::open(path, write_seq)?;
        Ok(Self { wal: Mutex::new(wal), state: Mutex::new(state), locks: RowLocks::new() })
    }

    pub fn locks(&self) -> &RowLocks {
        &self.locks
    }

    pub async fn lock_campaign(&self, id: CampaignId) -> RowGuard {
        self.locks.lock_campaign(id).await
    }

    pub async fn lock_node(&self, id: NodeId) -> RowGuard {
        self.locks.lock_node(id).await
    }

    pub async fn lock_nodes(&self, ids: Vec<NodeId>) -> Vec<RowGuard> {
        self.locks.lock_nodes(ids).await
    }

    /// Read-only access to the materialized tables. Callers should extract
    /// what they need and drop the guard promptly; it holds the global state
    /// lock, not a per-row one.
    pub fn state(&self) -> MutexGuard<'_, MaterializedState> {
        self.state.lock()
    }

    /// Durably append one event, then fold it into state. The unit of
    /// atomicity for a single-row write (e.g. one task enqueue).
    pub fn commit(&self, event: Event) -> Result<u64, StorageError> {
        let seq = self.wal.lock().append(&event)?;
        self.state.lock().apply(event);
        Ok(seq)
    }

    /// Durably append several events as one WAL-ordered batch, then fold all
    /// of them into state under a single state-lock acquisition. Used by
    /// multi-row transactions (graph mutations, step expansion) that must
    /// never be observed half-applied.
    pub fn commit_all(&self, events: Vec<Event>) -> Result<Vec<u64>, StorageError> {
        let mut wal = self.wal.lock();
        let mut seqs = Vec::with_capacity(events.len());
        for event in &events {
            seqs.push(wal.append(event)?);
        }
        drop(wal);
        let mut state = self.state.lock();
        for event in events {
            state.apply(event);
        }
        Ok(seqs)
    }

    pub fn write_campaign(&self, campaign: Campaign) -> Result<u64, StorageError> {
        self.commit(Event::CampaignWritten(campaign))
    }

    pub fn write_node(&self, node: Node, activate: bool) -> Result<u64, StorageError> {
        self.commit(Event::NodeWritten { node, activate })
    }

    pub fn activate_node(&self, namespace: Uuid, name: String, node: NodeId) -> Result<u64, StorageError> {
        self.commit(Event::NodeActivated { namespace, name, node })
    }

    pub fn write_edge(&self, edge: Edge) -> Result<u64, StorageError> {
        self.commit(Event::EdgeWritten(edge))
    }

    pub fn remove_edge(&self, id: EdgeId) -> Result<u64, StorageError> {
        self.commit(Event::EdgeRemoved(id))
    }

    pub fn write_manifest(&self, manifest: Manifest) -> Result<u64, StorageError> {
        self.commit(Event::ManifestWritten(manifest))
    }

    pub fn write_task(&self, task: Task) -> Result<u64, StorageError> {
        self.commit(Event::TaskWritten(task))
    }

    pub fn remove_task(&self, id: TaskId) -> Result<u64, StorageError> {
        self.commit(Event::TaskRemoved(id))
    }

    pub fn append_activity_log(&self, entry: ActivityLogEntry) -> Result<u64, StorageError> {
        self.commit(Event::ActivityLogAppended(entry))
    }

    pub fn write_machine(&self, snapshot: MachineSnapshot) -> Result<u64, StorageError> {
        self.commit(Event::MachineWritten(snapshot))
    }

    /// Pop up to `limit` queued tasks for a namespace and mark them
    /// `InProgress` in one transaction, emulating
    /// `SELECT ... FOR UPDATE SKIP LOCKED LIMIT n` followed by an UPDATE:
    /// nothing else observes these rows as `Queued` once this returns.
    pub fn pop_tasks_for_update_skip_locked(&self, namespace: Uuid, limit: usize) -> Result<Vec<Task>, StorageError> {
        let mut candidates = {
            let state = self.state.lock();
            state.queued_tasks_in(namespace).into_iter().take(limit).cloned().collect::<Vec<_>>()
        };
        for task in &mut candidates {
            task.previous_status = Some(task.status);
            task.status = cm_core::TaskStatus::InProgress;
        }
        if !candidates.is_empty() {
            self.commit_all(candidates.iter().cloned().map(Event::TaskWritten).collect())?;
        }
        Ok(candidates)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
