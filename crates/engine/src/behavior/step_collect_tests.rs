use super::*;
use crate::behavior::test_support::Harness;
use cm_core::{Campaign, CampaignStatus, Edge, Node, NodeKind};
use serde_json::json;

fn seeded(harness: &Harness) -> (Node, Node) {
    let campaign = Campaign::builder().name("camp").status(CampaignStatus::Paused).build();
    let ns = campaign.id.as_uuid();
    harness.store.write_campaign(campaign).unwrap();

    let group_a = Node::builder().namespace(ns).name("step.group.a").kind(NodeKind::Group).build();
    let group_b = Node::builder().namespace(ns).name("step.group.b").kind(NodeKind::Group).build();
    let collect = Node::builder().namespace(ns).name("step.collect").kind(NodeKind::StepCollect).build();
    harness.store.write_node(group_a.clone(), true).unwrap();
    harness.store.write_node(group_b.clone(), true).unwrap();
    harness.store.write_node(collect.clone(), true).unwrap();
    harness.store.write_edge(Edge::new(ns, group_a.id, collect.id)).unwrap();
    harness.store.write_edge(Edge::new(ns, group_b.id, collect.id)).unwrap();
    (collect, group_a)
}

#[tokio::test]
async fn prepare_enumerates_predecessor_groups() {
    let harness = Harness::new();
    let (collect, _) = seeded(&harness);
    let ctx = harness.ctx(collect);

    let outcome = StepCollect.run(&ctx, Trigger::Prepare).await.unwrap();
    let TransitionOutcome::Transition { to, transient } = outcome else { panic!("expected a transition") };
    assert_eq!(to, StatusEnum::Ready);
    assert_eq!(transient["members"], json!(["step.group.a", "step.group.b"]));
}

#[tokio::test]
async fn start_builds_a_chained_collection_over_every_member() {
    let harness = Harness::new();
    let (collect, _) = seeded(&harness);
    let ctx = harness.ctx(collect.clone());
    let prepared = StepCollect.run(&ctx, Trigger::Prepare).await.unwrap();
    let TransitionOutcome::Transition { transient, .. } = prepared else { panic!("expected a transition") };

    let mut ready = collect.clone();
    ready.status = StatusEnum::Ready;
    ready.metadata = transient;
    let ctx = harness.ctx(ready);

    let outcome = StepCollect.run(&ctx, Trigger::Start).await.unwrap();
    let TransitionOutcome::Transition { to, transient } = outcome else { panic!("expected a transition") };
    assert_eq!(to, StatusEnum::Running);
    let collection = transient["output_collection"].as_str().unwrap();
    assert_eq!(harness.butler.chain_members(collection), vec!["step.group.a.output", "step.group.b.output"]);
}

#[tokio::test]
async fn finish_succeeds_when_the_predecessor_set_is_unchanged() {
    let harness = Harness::new();
    let (collect, _) = seeded(&harness);
    let ctx = harness.ctx(collect.clone());
    let prepared = StepCollect.run(&ctx, Trigger::Prepare).await.unwrap();
    let TransitionOutcome::Transition { transient, .. } = prepared else { panic!("expected a transition") };

    let mut running = collect.clone();
    running.status = StatusEnum::Running;
    running.metadata = transient;
    let ctx = harness.ctx(running);

    let outcome = StepCollect.run(&ctx, Trigger::Finish).await.unwrap();
    assert!(matches!(outcome, TransitionOutcome::Transition { to: StatusEnum::Accepted, .. }));
}

#[tokio::test]
async fn finish_rejects_a_changed_predecessor_set() {
    let harness = Harness::new();
    let (collect, _) = seeded(&harness);

    let mut running = collect.clone();
    running.status = StatusEnum::Running;
    running.metadata = json!({"members": ["step.group.a"]});
    let ctx = harness.ctx(running);

    assert!(StepCollect.run(&ctx, Trigger::Finish).await.is_err());
}
