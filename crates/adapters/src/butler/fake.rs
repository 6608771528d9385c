// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory Butler for Splitter and Group/Collect tests: data ids are
//! seeded directly, collections are tracked as name → member-list maps.

use super::Butler;
use async_trait::async_trait;
use cm_core::CoreError;
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};

#[derive(Default)]
pub struct FakeButler {
    /// `(dataset, collection)` → seeded data ids visible in that collection.
    dataids: Mutex<HashMap<(String, String), BTreeSet<i64>>>,
    chains: Mutex<HashMap<String, Vec<String>>>,
}

impl FakeButler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, dataset: &str, collection: &str, ids: impl IntoIterator<Item = i64>) {
        self.dataids.lock().entry((dataset.to_string(), collection.to_string())).or_default().extend(ids);
    }

    pub fn chain_members(&self, chain: &str) -> Vec<String> {
        self.chains.lock().get(chain).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Butler for FakeButler {
    async fn query_dataids(&self, _repo: &str, dataset: &str, collections: &[String], _where_clause: &str) -> Result<BTreeSet<i64>, CoreError> {
        let table = self.dataids.lock();
        let mut out = BTreeSet::new();
        for collection in collections {
            if let Some(ids) = table.get(&(dataset.to_string(), collection.clone())) {
                out.extend(ids.iter().copied());
            }
        }
        Ok(out)
    }

    async fn create_chained_collection(&self, _repo: &str, name: &str, members: &[String]) -> Result<(), CoreError> {
        self.chains.lock().insert(name.to_string(), members.to_vec());
        Ok(())
    }

    async fn add_to_chain(&self, _repo: &str, chain: &str, member: &str) -> Result<(), CoreError> {
        self.chains.lock().entry(chain.to_string()).or_default().push(member.to_string());
        Ok(())
    }
}
