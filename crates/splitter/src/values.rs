// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{field_of, Splitter};
use async_trait::async_trait;
use cm_core::CoreError;
use serde_json::Value;

/// Configured with `{field, values}`; yields `"{field} in ({value})"` for
/// each value in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValuesSplitter;

impl ValuesSplitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Splitter for ValuesSplitter {
    async fn split(&self, cfg: &Value) -> Result<Vec<String>, CoreError> {
        let field = field_of(cfg)?;
        let values = cfg
            .get("values")
            .and_then(Value::as_array)
            .ok_or_else(|| CoreError::InvalidRequest("values splitter config missing \"values\"".into()))?;
        if values.is_empty() {
            return Err(CoreError::InvalidRequest("values splitter config has an empty \"values\" list".into()));
        }
        values
            .iter()
            .map(|v| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Ok(format!("{field} in ({rendered})"))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "values_tests.rs"]
mod tests;
