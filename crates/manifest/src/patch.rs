// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RFC 7396 merge-patch and RFC 6902 json-patch application, shared between
//! manifest patching (§4.1) and campaign status patching (§4.4). Both patch
//! kinds operate on a document view of `{"spec": ..., "metadata": ...}` so a
//! single patch body can touch either half.

use cm_core::CoreError;
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum PatchRequest {
    /// RFC 7396: recursively merge `body` into the document; `null` deletes keys.
    Merge(Value),
    /// RFC 6902: an ordered list of `{op, path, value, from}` operations,
    /// applied all-or-nothing.
    JsonPatch(Value),
}

/// Apply `request` to `doc` in place. On any failure `doc` is left
/// untouched — callers never observe a partially patched document.
pub fn apply(doc: &mut Value, request: &PatchRequest) -> Result<(), CoreError> {
    match request {
        PatchRequest::Merge(body) => {
            let mut working = doc.clone();
            json_patch::merge(&mut working, body);
            *doc = working;
            Ok(())
        }
        PatchRequest::JsonPatch(ops) => {
            let patch: json_patch::Patch = serde_json::from_value(ops.clone())
                .map_err(|e| CoreError::InvalidRequest(format!("malformed json-patch body: {e}")))?;
            let mut working = doc.clone();
            json_patch::patch(&mut working, &patch).map_err(|e| {
                let msg = e.to_string();
                if msg.to_lowercase().contains("test") {
                    CoreError::PatchAssertionFailed { path: msg }
                } else {
                    CoreError::InvalidRequest(format!("json-patch failed: {msg}"))
                }
            })?;
            *doc = working;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_patch_deletes_null_keys() {
        let mut doc = json!({"spec": {"owner": "bob", "scope": "drp"}});
        apply(&mut doc, &PatchRequest::Merge(json!({"spec": {"scope": null}}))).unwrap();
        assert_eq!(doc, json!({"spec": {"owner": "bob"}}));
    }

    #[test]
    fn merge_patch_is_idempotent() {
        let original = json!({"spec": {"owner": "bob"}, "metadata": {"a": 1}});
        let patch_body = json!({"spec": {"owner": "alice"}});

        let mut once = original.clone();
        apply(&mut once, &PatchRequest::Merge(patch_body.clone())).unwrap();

        let mut twice = once.clone();
        apply(&mut twice, &PatchRequest::Merge(patch_body)).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn json_patch_test_failure_aborts_whole_patch_and_leaves_doc_untouched() {
        let mut doc = json!({"spec": {"owner": "bob_loblaw"}, "metadata": {}});
        let before = doc.clone();
        let ops = json!([
            {"op": "test", "path": "/spec/owner", "value": "bob"},
            {"op": "replace", "path": "/spec/owner", "value": "alice"},
            {"op": "add", "path": "/metadata/scope", "value": "drp"},
        ]);
        let err = apply(&mut doc, &PatchRequest::JsonPatch(ops)).unwrap_err();
        assert_eq!(err.kind(), "PatchAssertionFailed");
        assert_eq!(doc, before, "failed patch must not mutate the document, even partially");
    }

    #[test]
    fn json_patch_all_ops_apply_when_test_passes() {
        let mut doc = json!({"spec": {"owner": "bob"}, "metadata": {}});
        let ops = json!([
            {"op": "test", "path": "/spec/owner", "value": "bob"},
            {"op": "replace", "path": "/spec/owner", "value": "alice"},
            {"op": "add", "path": "/metadata/scope", "value": "drp"},
        ]);
        apply(&mut doc, &PatchRequest::JsonPatch(ops)).unwrap();
        assert_eq!(doc["spec"]["owner"], "alice");
        assert_eq!(doc["metadata"]["scope"], "drp");
    }
}
