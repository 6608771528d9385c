// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Butler adapter (§6): data-id queries and chained-collection
//! management, used only by Step and Group/Collect transitions.

use async_trait::async_trait;
use cm_core::CoreError;
use std::collections::BTreeSet;

#[async_trait]
pub trait Butler: Send + Sync {
    async fn query_dataids(&self, repo: &str, dataset: &str, collections: &[String], where_clause: &str) -> Result<BTreeSet<i64>, CoreError>;
    async fn create_chained_collection(&self, repo: &str, name: &str, members: &[String]) -> Result<(), CoreError>;
    async fn add_to_chain(&self, repo: &str, chain: &str, member: &str) -> Result<(), CoreError>;
}

/// Stands in for a deployment with no Butler backend wired up. Every call
/// fails; campaigns that never use a `query` splitter or Butler-backed
/// collections never reach it.
#[derive(Debug, Default)]
pub struct UnconfiguredButler;

#[async_trait]
impl Butler for UnconfiguredButler {
    async fn query_dataids(&self, _repo: &str, _dataset: &str, _collections: &[String], _where_clause: &str) -> Result<BTreeSet<i64>, CoreError> {
        Err(CoreError::InvalidRequest("no Butler backend is configured".into()))
    }

    async fn create_chained_collection(&self, _repo: &str, _name: &str, _members: &[String]) -> Result<(), CoreError> {
        Err(CoreError::InvalidRequest("no Butler backend is configured".into()))
    }

    async fn add_to_chain(&self, _repo: &str, _chain: &str, _member: &str) -> Result<(), CoreError> {
        Err(CoreError::InvalidRequest("no Butler backend is configured".into()))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeButler;
