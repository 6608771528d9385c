use super::*;
use cm_adapters::{FakeButler, FakeLauncher};
use cm_core::{Campaign, CampaignStatus, Edge, Node, NodeKind};
use cm_storage::Store;

fn wired_campaign(store: &Store) -> Uuid {
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Running).build();
    let ns = campaign.namespace;
    store.write_campaign(campaign).unwrap();
    let start = Node::builder().namespace(ns).name("start").kind(NodeKind::Start).build();
    let end = Node::builder().namespace(ns).name("end").kind(NodeKind::End).build();
    store.write_node(start.clone(), true).unwrap();
    store.write_node(end.clone(), true).unwrap();
    store.write_edge(Edge::new(ns, start.id, end.id)).unwrap();
    ns
}

#[test]
fn consider_campaigns_enqueues_the_processable_set_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("wal")).unwrap();
    let ns = wired_campaign(&store);

    let first = consider_campaigns(&store, 1);
    assert_eq!(first, 1, "only START is processable before anything runs");
    let second = consider_campaigns(&store, 2);
    assert_eq!(second, 0, "re-running is a no-op: the task already exists");
    assert_eq!(store.state().queued_tasks_in(ns).len(), 1);
}

#[test]
fn non_schedulable_campaigns_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("wal")).unwrap();
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Waiting).build();
    let ns = campaign.namespace;
    store.write_campaign(campaign).unwrap();
    let start = Node::builder().namespace(ns).name("start").kind(NodeKind::Start).build();
    store.write_node(start, true).unwrap();

    assert_eq!(consider_campaigns(&store, 1), 0);
}

#[tokio::test]
async fn consider_nodes_drives_the_nominal_transition_and_clears_the_task() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("wal")).unwrap();
    let ns = wired_campaign(&store);
    consider_campaigns(&store, 1);

    let launcher: Arc<dyn Launcher> = Arc::new(FakeLauncher::new());
    let butler: Arc<dyn Butler> = Arc::new(FakeButler::new());
    let outcomes = consider_nodes(&store, launcher, butler, Path::new("/tmp"), ns, 8, 2).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_ok());
    assert!(store.state().queued_tasks_in(ns).is_empty(), "the task is cleared whether it succeeds or not");
}
