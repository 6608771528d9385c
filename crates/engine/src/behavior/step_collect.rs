// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! StepCollect (`collect_groups`) transitions (§4.3): recombines the
//! expanded groups' output collections into one step-level chained
//! collection.

use super::{generic_lifecycle, NodeBehavior, TransitionContext, TransitionOutcome};
use async_trait::async_trait;
use cm_core::{CoreError, NodeKind, StatusEnum, Trigger};
use serde_json::{json, Value};

pub struct StepCollect;

#[async_trait]
impl NodeBehavior for StepCollect {
    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError> {
        if let Some(outcome) = generic_lifecycle(ctx, trigger) {
            return Ok(outcome);
        }
        match trigger {
            Trigger::Prepare => prepare(ctx).await,
            Trigger::Start => start(ctx).await,
            Trigger::Finish => finish(ctx).await,
            Trigger::Reset => Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: json!({"members": Value::Null, "output_collection": Value::Null}) }),
            Trigger::Retry => Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null }),
            Trigger::Restart => Err(CoreError::InvalidRequest("restart is only legal for step_group nodes".into())),
            Trigger::Unprepare => Err(CoreError::InvalidRequest("collect_groups nodes are never unprepared directly; unprepare the owning step".into())),
            Trigger::Pause | Trigger::Resume | Trigger::Accept | Trigger::Reject => unreachable!("handled by generic_lifecycle"),
        }
    }
}

/// Every group feeding this collect node is a direct graph predecessor
/// (`Step::prepare` wires `group -> collect` directly).
fn predecessor_groups(ctx: &TransitionContext<'_>) -> Vec<String> {
    let g = cm_graph::build(ctx.store, ctx.namespace);
    let state = ctx.store.state();
    let mut names: Vec<String> = g
        .edges
        .neighbors_directed(ctx.node.id, petgraph::Direction::Incoming)
        .filter_map(|id| state.node(id))
        .filter(|n| n.kind == NodeKind::Group)
        .map(|n| n.name.clone())
        .collect();
    names.sort();
    names
}

async fn prepare(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let members = predecessor_groups(ctx);
    if members.is_empty() {
        return Err(CoreError::NotFound { kind: "Node", id: format!("group predecessors of {}", ctx.node.id) });
    }
    Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: json!({"members": members}) })
}

async fn start(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let members = members_of(ctx)?;
    let repo = "default";
    let collection_name = format!("{}.output", ctx.node.name);
    ctx.butler.create_chained_collection(repo, &collection_name, &[]).await?;
    for member in &members {
        ctx.butler.add_to_chain(repo, &collection_name, &format!("{member}.output")).await?;
    }
    Ok(TransitionOutcome::Transition { to: StatusEnum::Running, transient: json!({"output_collection": collection_name}) })
}

/// Asserts the chain built during `start` still matches the current
/// predecessor set; no separate Butler read-back, since this adapter only
/// exposes writes to a chain, not a query over its members.
async fn finish(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let recorded = members_of(ctx)?;
    let current = predecessor_groups(ctx);
    if recorded != current {
        return Err(CoreError::Conflict(format!(
            "collect node {} was started against {:?} but the step now has predecessors {:?}",
            ctx.node.name, recorded, current
        )));
    }
    Ok(TransitionOutcome::Transition { to: StatusEnum::Accepted, transient: Value::Null })
}

fn members_of(ctx: &TransitionContext<'_>) -> Result<Vec<String>, CoreError> {
    ctx.node
        .metadata
        .get("members")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .ok_or_else(|| CoreError::InvalidRequest("collect node has no recorded member groups; prepare was never run".into()))
}

#[cfg(test)]
#[path = "step_collect_tests.rs"]
mod tests;
