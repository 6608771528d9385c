// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step (`grouped_step`) expansion (§4.3): `prepare` fans a step out
//! into one Group per splitter predicate plus a single collect node,
//! rewired in place; `unprepare` is the inverse.

use super::{generic_lifecycle, NodeBehavior, TransitionContext, TransitionOutcome};
use async_trait::async_trait;
use cm_core::{CoreError, Node, NodeId, NodeKind, StatusEnum, Trigger};
use cm_graph::mutations;
use cm_splitter::{NullSplitter, QuerySplitter, Splitter, ValuesSplitter};
use serde_json::{json, Value};
use uuid::Uuid;

pub struct Step;

#[async_trait]
impl NodeBehavior for Step {
    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError> {
        if let Some(outcome) = generic_lifecycle(ctx, trigger) {
            return Ok(outcome);
        }
        match trigger {
            Trigger::Prepare => prepare(ctx).await,
            Trigger::Unprepare => unprepare(ctx).await,
            // The step itself does no work beyond expanding the graph; the
            // expanded groups and collect node carry the real transitions.
            Trigger::Start => Ok(TransitionOutcome::Transition { to: StatusEnum::Running, transient: Value::Null }),
            Trigger::Finish => Ok(TransitionOutcome::Transition { to: StatusEnum::Accepted, transient: Value::Null }),
            Trigger::Reset => Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: Value::Null }),
            Trigger::Retry => Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null }),
            Trigger::Restart => Err(CoreError::InvalidRequest("restart is only legal for step_group nodes".into())),
            Trigger::Pause | Trigger::Resume | Trigger::Accept | Trigger::Reject => unreachable!("handled by generic_lifecycle"),
        }
    }
}

async fn prepare(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let config = crate::config_chain::resolve(ctx.store, ctx.namespace, &ctx.node, None)?;
    let predicates = split(ctx, &config).await?;
    if predicates.is_empty() {
        return Err(CoreError::InvalidRequest(format!("splitter for step {} produced no predicates", ctx.node.name)));
    }

    // On retry, the same predicates re-derive the same group/collect ids
    // (UUID5 of the predicate), so a prior partial expansion is simply
    // overwritten rather than needing an explicit rollback.
    let children = expand(ctx, &predicates).await?;
    let transient = json!({
        "groups": children.groups.iter().map(NodeId::to_string).collect::<Vec<_>>(),
        "collect": children.collect.to_string(),
    });
    Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient })
}

async fn split(ctx: &TransitionContext<'_>, config: &Value) -> Result<Vec<String>, CoreError> {
    let splitter_cfg = config.get("splitter").cloned().unwrap_or_else(|| json!({"kind": "null"}));
    let kind = splitter_cfg.get("kind").and_then(Value::as_str).unwrap_or("null");
    match kind {
        "null" => NullSplitter::new().split(&splitter_cfg).await,
        "values" => ValuesSplitter::new().split(&splitter_cfg).await,
        "query" => {
            let repo = splitter_cfg.get("repo").and_then(Value::as_str).unwrap_or("default").to_string();
            QuerySplitter::new(ctx.butler.clone(), repo).split(&splitter_cfg).await
        }
        other => Err(CoreError::InvalidRequest(format!("unknown splitter kind \"{other}\""))),
    }
}

struct ExpandedChildren {
    groups: Vec<NodeId>,
    collect: NodeId,
}

/// `step -> {anchor, group2, group3, ...} -> collect -> (step's old successors)`.
/// Each group's id is `UUID5(step.id, predicate)` so re-preparing with the
/// same configuration re-derives the same nodes (idempotent).
async fn expand(ctx: &TransitionContext<'_>, predicates: &[String]) -> Result<ExpandedChildren, CoreError> {
    let anchor = group_node(&ctx.node, &predicates[0]);
    ctx.store.write_node(anchor.clone(), true)?;
    mutations::insert(ctx.store, ctx.namespace, ctx.node.id, anchor.id).await?;

    let collect = Node::new(ctx.namespace, format!("{}.collect", ctx.node.name), NodeKind::StepCollect, Value::Null);
    ctx.store.write_node(collect.clone(), true)?;
    mutations::insert(ctx.store, ctx.namespace, anchor.id, collect.id).await?;

    let mut groups = vec![anchor.id];
    for predicate in &predicates[1..] {
        let group = group_node(&ctx.node, predicate);
        ctx.store.write_node(group.clone(), true)?;
        mutations::append(ctx.store, ctx.namespace, anchor.id, group.id).await?;
        groups.push(group.id);
    }

    Ok(ExpandedChildren { groups, collect: collect.id })
}

/// `UUID5(step.id, hash(predicate))`: the group's id is derived from the
/// step's own id, not its namespace, so two steps with different names but
/// an identical predicate never collide.
fn group_node(step: &Node, predicate: &str) -> Node {
    let id = NodeId::derive(step.id.as_uuid(), predicate);
    Node {
        id,
        namespace: step.namespace,
        name: format!("{}.group.{id}", step.name),
        version: 1,
        kind: NodeKind::Group,
        status: StatusEnum::Waiting,
        metadata: Value::Object(Default::default()),
        configuration: json!({"predicate": predicate}),
        machine: None,
    }
}

async fn unprepare(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let groups = node_ids(&ctx.node, "groups");
    let collect = ctx.node.metadata.get("collect").and_then(Value::as_str).and_then(|s| s.parse::<Uuid>().ok()).map(NodeId::from_uuid);

    for id in &groups {
        delete_if_waiting(ctx, *id).await?;
    }
    if let Some(id) = collect {
        delete_if_waiting(ctx, id).await?;
    }

    Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: json!({"groups": Value::Null, "collect": Value::Null}) })
}

fn node_ids(node: &Node, key: &str) -> Vec<NodeId> {
    node.metadata
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str().and_then(|s| s.parse::<Uuid>().ok())).map(NodeId::from_uuid).collect())
        .unwrap_or_default()
}

async fn delete_if_waiting(ctx: &TransitionContext<'_>, id: NodeId) -> Result<(), CoreError> {
    let still_waiting = ctx.store.state().node(id).is_some_and(|n| n.status == StatusEnum::Waiting);
    if still_waiting {
        mutations::delete(ctx.store, ctx.namespace, id, true).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
