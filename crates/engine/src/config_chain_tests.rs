use super::*;
use cm_core::{namespace::root, Campaign, NodeKind};
use serde_json::json;
use tempfile::tempdir;

fn fresh_store() -> Store {
    let dir = tempdir().unwrap();
    Store::open(dir.path().join("wal")).unwrap()
}

fn seed_campaign(store: &Store) -> Uuid {
    let campaign = Campaign::builder().name("camp").build();
    let ns = campaign.id.as_uuid();
    store.write_campaign(campaign).unwrap();
    ns
}

/// `resolve` requires every mandatory kind to be defined somewhere (library
/// or campaign); seed empty library defaults for every kind but the ones the
/// caller means to exercise directly.
fn seed_remaining_mandatory(store: &Store, except: &[ManifestKind]) {
    for kind in ManifestKind::MANDATORY {
        if !except.contains(&kind) {
            cm_manifest::create(store, kind, "defaults", None, json!({})).unwrap();
        }
    }
}

#[test]
fn library_defaults_merge_under_campaign_overrides() {
    let store = fresh_store();
    let ns = seed_campaign(&store);
    seed_remaining_mandatory(&store, &[ManifestKind::Bps]);

    cm_manifest::create(&store, ManifestKind::Bps, "defaults", None, json!({"site": "default-site", "predicates": ["p1"]})).unwrap();
    cm_manifest::create(&store, ManifestKind::Bps, "defaults", Some(ns), json!({"site": "camp-site", "predicates": ["p2"]})).unwrap();

    let step = Node::builder().namespace(ns).name("step").kind(NodeKind::Step).build();
    let config = resolve(&store, ns, &step, None).unwrap();

    assert_eq!(config["site"], json!("camp-site"), "scalar fields are overridden by higher precedence");
    assert_eq!(config["predicates"], json!(["p1", "p2"]), "list fields concatenate across levels");
}

#[test]
fn step_and_group_configuration_layer_on_top() {
    let store = fresh_store();
    let ns = seed_campaign(&store);
    seed_remaining_mandatory(&store, &[]);

    let step = Node::builder().namespace(ns).name("step").kind(NodeKind::Step).configuration(json!({"predicates": ["from-step"]})).build();
    let group = Node::builder().namespace(ns).name("group").kind(NodeKind::Group).configuration(json!({"predicates": ["from-group"]})).build();

    let config = resolve(&store, ns, &step, Some(&group)).unwrap();
    assert_eq!(config["predicates"], json!(["from-step", "from-group"]));
}

#[test]
fn extends_reference_is_followed_and_stripped() {
    let store = fresh_store();
    let ns = seed_campaign(&store);
    seed_remaining_mandatory(&store, &[ManifestKind::Wms]);
    cm_manifest::create(&store, ManifestKind::Wms, "base", None, json!({"site": "base-site"})).unwrap();
    cm_manifest::create(&store, ManifestKind::Wms, "derived", None, json!({"extends": "base", "queue": "fast"})).unwrap();

    // make "derived" the newest manifest of kind Wms so it's what config_chain picks up
    let step = Node::builder().namespace(ns).name("step").kind(NodeKind::Step).build();
    let config = resolve(&store, ns, &step, None).unwrap();
    assert_eq!(config["queue"], json!("fast"));
    assert!(config.get("extends").is_none());
}

#[test]
fn missing_mandatory_kind_is_unknown_manifest() {
    let store = fresh_store();
    let ns = seed_campaign(&store);
    seed_remaining_mandatory(&store, &[ManifestKind::Site]);

    let step = Node::builder().namespace(ns).name("step").kind(NodeKind::Step).build();
    let err = resolve(&store, ns, &step, None).unwrap_err();
    assert_eq!(err.kind(), "UnknownManifest");
}

#[test]
fn deep_extends_chain_beyond_max_depth_is_rejected() {
    let store = fresh_store();
    cm_manifest::create(&store, ManifestKind::Site, "l0", None, json!({"v": 0})).unwrap();
    for i in 1..8u32 {
        cm_manifest::create(&store, ManifestKind::Site, &format!("l{i}"), None, json!({"extends": format!("l{}", i - 1), "v": i})).unwrap();
    }
    let err = resolve_manifest_spec(&store, ManifestKind::Site, &root(), &json!({"extends": "l7"}), 0).unwrap_err();
    assert_eq!(err.kind(), "InvalidRequest");
}
