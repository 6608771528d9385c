use super::*;
use cm_core::{namespace, Campaign, NodeKind, StatusEnum};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn open_on_fresh_path_starts_empty() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("wal.log")).unwrap();
    assert!(store.state().all_campaigns().next().is_none());
}

#[test]
fn committed_campaign_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wal.log");
    let ns = namespace::root();
    let campaign = Campaign::new("demo", ns, "tester", json!({}));
    let id = campaign.id;

    {
        let store = Store::open(&path).unwrap();
        store.write_campaign(campaign).unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert_eq!(store.state().campaign(id).unwrap().name, "demo");
}

#[test]
fn commit_all_applies_every_event_before_returning() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("wal.log")).unwrap();
    let ns = namespace::root();
    let a = cm_core::Node::new(ns, "a", NodeKind::Action, json!({}));
    let b = cm_core::Node::new(ns, "b", NodeKind::Action, json!({}));
    let edge = Edge::new(ns, a.id, b.id);

    store
        .commit_all(vec![
            Event::NodeWritten { node: a.clone(), activate: true },
            Event::NodeWritten { node: b.clone(), activate: true },
            Event::EdgeWritten(edge.clone()),
        ])
        .unwrap();

    let state = store.state();
    assert!(state.node(a.id).is_some());
    assert!(state.node(b.id).is_some());
    assert!(state.edge(edge.id).is_some());
}

#[tokio::test]
async fn pop_tasks_marks_in_progress_and_excludes_them_from_next_pop() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("wal.log")).unwrap();
    let ns = namespace::root();
    let node = NodeId::new(ns, "n", 1);
    let task = Task::new(ns, node, 0);
    store.write_task(task.clone()).unwrap();

    let popped = store.pop_tasks_for_update_skip_locked(ns, 10).unwrap();
    assert_eq!(popped.len(), 1);
    assert_eq!(popped[0].status, cm_core::TaskStatus::InProgress);

    let again = store.pop_tasks_for_update_skip_locked(ns, 10).unwrap();
    assert!(again.is_empty());
}

#[test]
fn sentinel_detection_round_trips_through_store() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path().join("wal.log")).unwrap();
    let ns = namespace::root();
    let start = cm_core::Node::new(ns, "START", NodeKind::Start, json!({}));
    assert_eq!(start.status, StatusEnum::Waiting);
    store.write_node(start.clone(), true).unwrap();
    assert!(store.state().active_node(ns, "START").unwrap().is_sentinel());
}
