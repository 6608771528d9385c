// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Splitters (§4.7): strategy objects that expand a Step's
//! configuration into an ordered, finite sequence of Butler predicate
//! strings. One predicate becomes one Group node.
//!
//! `null` and `values` resolve eagerly from the config alone; `query` is
//! Butler-backed and needs I/O, so `Splitter::split` is async for all three
//! — the Step transition calls one trait method regardless of backend.

use async_trait::async_trait;
use cm_core::CoreError;
use serde_json::Value;

mod null;
mod query;
mod values;

pub use null::NullSplitter;
pub use query::QuerySplitter;
pub use values::ValuesSplitter;

#[async_trait]
pub trait Splitter: Send + Sync {
    /// `cfg` is the step's resolved configuration; each variant reads only
    /// the keys it needs from it.
    async fn split(&self, cfg: &Value) -> Result<Vec<String>, CoreError>;
}

fn field_of(cfg: &Value) -> Result<&str, CoreError> {
    cfg.get("field").and_then(Value::as_str).ok_or_else(|| CoreError::InvalidRequest("splitter config missing \"field\"".into()))
}
