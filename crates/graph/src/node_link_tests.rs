use super::*;
use crate::build;
use cm_core::{namespace, Node, NodeKind};
use cm_storage::Store;
use serde_json::json;
use tempfile::tempdir;

fn store() -> Store {
    let dir = tempdir().unwrap();
    Store::open(dir.path().join("wal.log")).unwrap()
}

#[test]
fn round_trips_through_the_serialised_form() {
    let store = store();
    let ns = namespace::root();
    let start = Node::new(ns, "START", NodeKind::Start, json!({}));
    let mid = Node::new(ns, "N1", NodeKind::Action, json!({}));
    let end = Node::new(ns, "END", NodeKind::End, json!({}));
    store.write_node(start.clone(), true).unwrap();
    store.write_node(mid.clone(), true).unwrap();
    store.write_node(end.clone(), true).unwrap();
    store.write_edge(cm_core::Edge::new(ns, start.id, mid.id)).unwrap();
    store.write_edge(cm_core::Edge::new(ns, mid.id, end.id)).unwrap();

    let original = build(&store, ns);
    let link = to_node_link(&original);

    let as_json = serde_json::to_value(&link).unwrap();
    let roundtripped: NodeLink = serde_json::from_value(as_json).unwrap();
    let rebuilt = from_node_link(&roundtripped);

    assert!(isomorphic(&original, &rebuilt));
}

#[test]
fn differing_edge_sets_are_not_isomorphic() {
    let store = store();
    let ns = namespace::root();
    let start = Node::new(ns, "START", NodeKind::Start, json!({}));
    let end = Node::new(ns, "END", NodeKind::End, json!({}));
    store.write_node(start.clone(), true).unwrap();
    store.write_node(end.clone(), true).unwrap();
    store.write_edge(cm_core::Edge::new(ns, start.id, end.id)).unwrap();

    let wired = build(&store, ns);
    let mut unwired = wired.clone();
    unwired.edges.remove_edge(start.id, end.id);

    assert!(!isomorphic(&wired, &unwired));
}
