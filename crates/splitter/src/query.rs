// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Butler-backed splitter: queries the matching `{field}` value set, then
//! partitions it into evenly spaced half-open ranges.

use super::{field_of, Splitter};
use async_trait::async_trait;
use cm_adapters::Butler;
use cm_core::CoreError;
use serde_json::Value;
use std::sync::Arc;

pub struct QuerySplitter {
    butler: Arc<dyn Butler>,
    repo: String,
}

impl QuerySplitter {
    pub fn new(butler: Arc<dyn Butler>, repo: impl Into<String>) -> Self {
        Self { butler, repo: repo.into() }
    }
}

#[async_trait]
impl Splitter for QuerySplitter {
    async fn split(&self, cfg: &Value) -> Result<Vec<String>, CoreError> {
        let field = field_of(cfg)?;
        let dataset = cfg
            .get("dataset")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::InvalidRequest("query splitter config missing \"dataset\"".into()))?;
        let min_groups = cfg.get("min_groups").and_then(Value::as_u64).unwrap_or(1) as usize;
        let max_size = cfg.get("max_size").and_then(Value::as_u64).unwrap_or(u64::MAX) as usize;
        let collections = string_list(cfg, "collections")?;
        let predicates = string_list(cfg, "predicates").unwrap_or_default();
        let where_clause = if predicates.is_empty() { "1".to_string() } else { predicates.join(" AND ") };

        let ids = self.butler.query_dataids(&self.repo, dataset, &collections, &where_clause).await?;
        let ids: Vec<i64> = ids.into_iter().collect();

        let cuts = partition_boundaries(&ids, min_groups, max_size)?;
        Ok(range_predicates(field, &ids, &cuts))
    }
}

fn string_list(cfg: &Value, key: &str) -> Result<Vec<String>, CoreError> {
    match cfg.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or_else(|| CoreError::InvalidRequest(format!("\"{key}\" must be a list of strings"))))
            .collect(),
        None => Ok(Vec::new()),
    }
}

/// Evenly spaced internal cut points over the sorted `ids`, such that the
/// resulting group count is at least `min_groups` and no group exceeds
/// `max_size` ids. Fails if there are fewer distinct ids than `min_groups`.
fn partition_boundaries(ids: &[i64], min_groups: usize, max_size: usize) -> Result<Vec<i64>, CoreError> {
    let n = ids.len();
    if n < min_groups.max(1) {
        return Err(CoreError::InvalidGrouping(format!("{n} matching value(s), fewer than min_groups {min_groups}")));
    }
    let groups_for_size = n.div_ceil(max_size.max(1));
    let group_count = min_groups.max(groups_for_size).max(1);

    let mut cuts = Vec::with_capacity(group_count.saturating_sub(1));
    for i in 1..group_count {
        let idx = (i * n) / group_count;
        let cut = ids[idx];
        if cuts.last() != Some(&cut) {
            cuts.push(cut);
        }
    }
    Ok(cuts)
}

fn range_predicates(field: &str, ids: &[i64], cuts: &[i64]) -> Vec<String> {
    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut lower = ids[0];
    for &cut in cuts {
        out.push(format!("{field} >= {lower} AND {field} < {cut}"));
        lower = cut;
    }
    out.push(format!("{field} >= {lower}"));
    out
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
