use super::*;
use cm_core::namespace;

#[tokio::test]
async fn same_campaign_lock_is_exclusive() {
    let locks = Arc::new(RowLocks::new());
    let id = CampaignId::new(namespace::root(), "camp-a");

    let guard = locks.lock_campaign(id).await;
    let locks2 = locks.clone();
    let second = tokio::spawn(async move {
        let _g = locks2.lock_campaign(id).await;
    });

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(!second.is_finished());

    drop(guard);
    second.await.unwrap();
}

#[tokio::test]
async fn distinct_nodes_do_not_block_each_other() {
    let locks = RowLocks::new();
    let a = NodeId::new(namespace::root(), "a", 1);
    let b = NodeId::new(namespace::root(), "b", 1);

    let _ga = locks.lock_node(a).await;
    let _gb = locks.lock_node(b).await;
}

#[tokio::test]
async fn lock_nodes_dedups_and_sorts_to_avoid_deadlock() {
    let locks = RowLocks::new();
    let a = NodeId::new(namespace::root(), "a", 1);
    let b = NodeId::new(namespace::root(), "b", 1);

    let guards = locks.lock_nodes(vec![b, a, a]).await;
    assert_eq!(guards.len(), 2);
}
