use super::*;
use crate::behavior::test_support::Harness;
use cm_core::{Campaign, CampaignStatus, Node, NodeKind};

fn seeded_namespace(harness: &Harness) -> uuid::Uuid {
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Paused).build();
    let ns = campaign.id.as_uuid();
    harness.store.write_campaign(campaign).unwrap();
    ns
}

#[tokio::test]
async fn prepare_commits_status_metadata_and_activity_log() {
    let harness = Harness::new();
    let ns = seeded_namespace(&harness);
    let node = Node::builder().namespace(ns).name("start").kind(NodeKind::Start).status(StatusEnum::Waiting).build();
    harness.store.write_node(node.clone(), true).unwrap();

    let outcome = process(
        &harness.store,
        harness.launcher.clone(),
        harness.butler.clone(),
        &harness.artifact_root,
        node.id,
        Trigger::Prepare,
        StatusEnum::Waiting,
        "operator",
        Some("req-1"),
        1_700_000_000_000,
    )
    .await
    .unwrap();

    let ProcessOutcome::Transitioned(entry) = outcome else { panic!("expected a committed transition") };
    assert_eq!(entry.from_status, "waiting");
    assert_eq!(entry.to_status, "ready");
    assert_eq!(entry.detail["trigger"], "prepare");
    assert_eq!(entry.detail["request_id"], "req-1");

    let stored = harness.store.state().node(node.id).cloned().unwrap();
    assert_eq!(stored.status, StatusEnum::Ready);
    assert!(stored.machine.is_some(), "a Machine snapshot is recorded for the transition");
}

#[tokio::test]
async fn stale_expected_status_is_a_silent_no_op() {
    let harness = Harness::new();
    let ns = seeded_namespace(&harness);
    let node = Node::builder().namespace(ns).name("start").kind(NodeKind::Start).status(StatusEnum::Waiting).build();
    harness.store.write_node(node.clone(), true).unwrap();

    let outcome = process(
        &harness.store,
        harness.launcher.clone(),
        harness.butler.clone(),
        &harness.artifact_root,
        node.id,
        Trigger::Prepare,
        StatusEnum::Ready,
        "operator",
        None,
        1_700_000_000_000,
    )
    .await
    .unwrap();

    assert!(matches!(outcome, ProcessOutcome::Stale));
    let stored = harness.store.state().node(node.id).cloned().unwrap();
    assert_eq!(stored.status, StatusEnum::Waiting, "nothing was committed");
}

#[tokio::test]
async fn trigger_not_legal_from_current_status_is_refused() {
    let harness = Harness::new();
    let ns = seeded_namespace(&harness);
    let node = Node::builder().namespace(ns).name("start").kind(NodeKind::Start).status(StatusEnum::Waiting).build();
    harness.store.write_node(node.clone(), true).unwrap();

    let err = process(
        &harness.store,
        harness.launcher.clone(),
        harness.butler.clone(),
        &harness.artifact_root,
        node.id,
        Trigger::Start,
        StatusEnum::Waiting,
        "operator",
        None,
        1_700_000_000_000,
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), "NotProcessable");
}

#[tokio::test]
async fn a_failing_action_is_committed_as_failed_with_the_error_recorded() {
    let harness = Harness::new();
    let ns = seeded_namespace(&harness);
    harness.launcher.script_next(cm_adapters::Scripted::Fail("nonzero exit".into()));
    let node = Node::builder()
        .namespace(ns)
        .name("action")
        .kind(NodeKind::Action)
        .status(StatusEnum::Running)
        .metadata(serde_json::json!({"wms_id": "fake-1"}))
        .build();
    harness.store.write_node(node.clone(), true).unwrap();

    let outcome = process(
        &harness.store,
        harness.launcher.clone(),
        harness.butler.clone(),
        &harness.artifact_root,
        node.id,
        Trigger::Finish,
        StatusEnum::Running,
        "operator",
        None,
        1_700_000_000_000,
    )
    .await
    .unwrap();

    let ProcessOutcome::Transitioned(entry) = outcome else { panic!("expected a committed transition") };
    assert_eq!(entry.to_status, "failed");
    assert_eq!(entry.detail["exception"], "LauncherCheckError");
    assert!(entry.detail["error"].as_str().unwrap().contains("nonzero exit"));

    let stored = harness.store.state().node(node.id).cloned().unwrap();
    assert_eq!(stored.status, StatusEnum::Failed);
}

#[tokio::test]
async fn no_change_outcome_commits_nothing() {
    let harness = Harness::new();
    let ns = seeded_namespace(&harness);
    let node = Node::builder().namespace(ns).name("bp").kind(NodeKind::Breakpoint).status(StatusEnum::Running).build();
    harness.store.write_node(node.clone(), true).unwrap();

    let outcome = process(
        &harness.store,
        harness.launcher.clone(),
        harness.butler.clone(),
        &harness.artifact_root,
        node.id,
        Trigger::Finish,
        StatusEnum::Running,
        "operator",
        None,
        1_700_000_000_000,
    )
    .await
    .unwrap();

    assert!(matches!(outcome, ProcessOutcome::NoChange));
    let stored = harness.store.state().node(node.id).cloned().unwrap();
    assert_eq!(stored.status, StatusEnum::Running, "a breakpoint never finishes on its own");
    assert!(stored.machine.is_none());
}
