// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::Splitter;
use async_trait::async_trait;
use cm_core::CoreError;
use serde_json::Value;

/// Yields exactly one predicate, `"1"`, matching every row.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSplitter;

impl NullSplitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Splitter for NullSplitter {
    async fn split(&self, _cfg: &Value) -> Result<Vec<String>, CoreError> {
        Ok(vec!["1".to_string()])
    }
}

#[cfg(test)]
#[path = "null_tests.rs"]
mod tests;
