use super::*;
use cm_core::{Edge, Node, NodeKind};
use cm_storage::Store;

fn open(dir: &tempfile::TempDir) -> Store {
    Store::open(dir.path().join("wal")).unwrap()
}

#[tokio::test]
async fn ready_to_running_requires_a_valid_graph() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Ready).build();
    let ns = campaign.namespace;
    store.write_campaign(campaign.clone()).unwrap();

    let err = drive(&store, campaign.id, CampaignStatus::Running, "operator", 1).await.unwrap_err();
    assert_eq!(err.kind(), "InvalidCampaignGraphError");

    let logged = store.state();
    assert!(logged.activity_log_for_namespace(ns).iter().any(|e| e.detail["exception"] == "InvalidCampaignGraphError"));
}

#[tokio::test]
async fn ready_to_running_succeeds_once_the_graph_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Ready).build();
    let ns = campaign.namespace;
    store.write_campaign(campaign.clone()).unwrap();
    let start = Node::builder().namespace(ns).name("start").kind(NodeKind::Start).build();
    let end = Node::builder().namespace(ns).name("end").kind(NodeKind::End).build();
    store.write_node(start.clone(), true).unwrap();
    store.write_node(end.clone(), true).unwrap();
    store.write_edge(Edge::new(ns, start.id, end.id)).unwrap();

    let entry = drive(&store, campaign.id, CampaignStatus::Running, "operator", 1).await.unwrap();
    assert_eq!(entry.to_status, "running");
    assert_eq!(store.state().campaign(campaign.id).unwrap().status, CampaignStatus::Running);
}

#[tokio::test]
async fn waiting_cannot_jump_straight_to_running() {
    let dir = tempfile::tempdir().unwrap();
    let store = open(&dir);
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Waiting).build();
    store.write_campaign(campaign.clone()).unwrap();

    let err = drive(&store, campaign.id, CampaignStatus::Running, "operator", 1).await.unwrap_err();
    assert_eq!(err.kind(), "NotProcessable");
}
