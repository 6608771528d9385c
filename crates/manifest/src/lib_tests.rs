use super::*;
use cm_core::{namespace, Campaign};
use serde_json::json;
use tempfile::tempdir;

fn store() -> Store {
    let dir = tempdir().unwrap();
    Store::open(dir.path().join("wal.log")).unwrap()
}

#[test]
fn create_without_namespace_uses_library_namespace() {
    let store = store();
    let m = create(&store, ManifestKind::Bps, "defaults", None, json!({"retries": 3})).unwrap();
    assert_eq!(m.namespace, namespace::root());
    assert_eq!(m.version, 1);
}

#[test]
fn create_with_unknown_namespace_is_rejected() {
    let store = store();
    let err = create(&store, ManifestKind::Bps, "defaults", Some(Uuid::new_v4()), json!({})).unwrap_err();
    assert_eq!(err.kind(), "UnknownNamespace");
}

#[test]
fn create_with_known_campaign_namespace_succeeds() {
    let store = store();
    let campaign = Campaign::new("camp", namespace::root(), "tester", json!({}));
    let ns = campaign.id.as_uuid();
    store.write_campaign(campaign).unwrap();

    let m = create(&store, ManifestKind::Site, "site-a", Some(ns), json!({})).unwrap();
    assert_eq!(m.namespace, ns);
}

#[test]
fn get_without_name_returns_newest_of_kind() {
    let store = store();
    create(&store, ManifestKind::Lsst, "a", None, json!({"v": 1})).unwrap();
    let b = create(&store, ManifestKind::Lsst, "b", None, json!({"v": 2})).unwrap();

    let found = get(&store, namespace::root(), ManifestKind::Lsst, None, None).unwrap();
    assert_eq!(found.id, b.id);
}

#[test]
fn get_missing_manifest_is_not_found() {
    let store = store();
    let err = get(&store, namespace::root(), ManifestKind::Wms, Some("nope"), None).unwrap_err();
    assert_eq!(err.kind(), "NotFound");
}

#[test]
fn patch_merge_writes_new_version_and_preserves_old() {
    let store = store();
    let m = create(&store, ManifestKind::Bps, "defaults", None, json!({"owner": "bob"})).unwrap();

    let v2 = patch(&store, m.id, PatchRequest::Merge(json!({"owner": "alice"}))).unwrap();
    assert_eq!(v2.version, 2);
    assert_eq!(v2.spec["owner"], "alice");

    let v1 = get(&store, namespace::root(), ManifestKind::Bps, Some("defaults"), Some(1)).unwrap();
    assert_eq!(v1.spec["owner"], "bob");
}

#[test]
fn patch_json_patch_test_failure_does_not_create_new_version() {
    let store = store();
    let m = create(&store, ManifestKind::Bps, "defaults", None, json!({"owner": "bob_loblaw"})).unwrap();

    let ops = json!([
        {"op": "test", "path": "/spec/owner", "value": "bob"},
        {"op": "replace", "path": "/spec/owner", "value": "alice"},
    ]);
    let err = patch(&store, m.id, PatchRequest::JsonPatch(ops)).unwrap_err();
    assert_eq!(err.kind(), "PatchAssertionFailed");

    let versions = store.state().manifest_version_numbers(namespace::root(), ManifestKind::Bps, "defaults");
    assert_eq!(versions, vec![1]);
}

#[test]
fn copy_creates_version_one_in_target_namespace() {
    let store = store();
    let lib = create(&store, ManifestKind::Site, "summit", None, json!({"tag": "USDF"})).unwrap();
    let campaign = Campaign::new("camp", namespace::root(), "tester", json!({}));
    let ns = campaign.id.as_uuid();
    store.write_campaign(campaign).unwrap();

    let copied = copy(&store, lib.id, ns, None).unwrap();
    assert_eq!(copied.version, 1);
    assert_eq!(copied.namespace, ns);
    assert_eq!(copied.spec, lib.spec);
}
