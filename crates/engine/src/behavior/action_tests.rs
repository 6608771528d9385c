use super::*;
use crate::behavior::test_support::Harness;
use cm_adapters::Scripted;
use cm_core::Node;
use serde_json::json;

#[tokio::test]
async fn start_submits_the_configured_script() {
    let harness = Harness::new();
    let node = Node::builder().kind(cm_core::NodeKind::Action).status(StatusEnum::Ready).configuration(json!({"script": "/bin/true"})).build();
    let ctx = harness.ctx(node);
    let outcome = Action.run(&ctx, Trigger::Start).await.unwrap();
    let TransitionOutcome::Transition { to, transient } = outcome else { panic!("expected a transition") };
    assert_eq!(to, StatusEnum::Running);
    assert!(transient["wms_id"].as_str().unwrap().starts_with("fake-"));
}

#[tokio::test]
async fn finish_is_gated_by_the_launcher_check() {
    let harness = Harness::new();
    harness.launcher.script_next(Scripted::Fail("nonzero exit".into()));
    let node = Node::builder().kind(cm_core::NodeKind::Action).status(StatusEnum::Ready).build();
    let ctx = harness.ctx(node);
    let started = Action.run(&ctx, Trigger::Start).await.unwrap();
    let TransitionOutcome::Transition { transient, .. } = started else { panic!("expected a transition") };

    let mut running = Node::builder().kind(cm_core::NodeKind::Action).status(StatusEnum::Running).metadata(transient).build();
    running.namespace = ctx.node.namespace;
    let ctx = harness.ctx(running);
    assert!(Action.run(&ctx, Trigger::Finish).await.is_err());
}
