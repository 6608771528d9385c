// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Group (`step_group`) transitions (§4.3): one WMS submission per
//! expanded step predicate. `restart` is the only trigger this kind widens
//! beyond the nominal table — it's otherwise never legal.

use super::{generic_lifecycle, NodeBehavior, TransitionContext, TransitionOutcome};
use async_trait::async_trait;
use cm_core::{CoreError, Node, NodeKind, StatusEnum, Trigger};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;

const SUBMIT_SCRIPT: &str = "submit.sh";
const RESTARTABLE_MARKER: &str = "quantum_graph.qgraph";

pub struct Group;

#[async_trait]
impl NodeBehavior for Group {
    fn applies(&self, trigger: Trigger, from: StatusEnum) -> bool {
        if trigger == Trigger::Restart {
            from == StatusEnum::Failed
        } else {
            super::default_applies(trigger, from)
        }
    }

    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError> {
        if let Some(outcome) = generic_lifecycle(ctx, trigger) {
            return Ok(outcome);
        }
        match trigger {
            Trigger::Prepare => prepare(ctx).await,
            Trigger::Start => start(ctx).await,
            Trigger::Finish => finish(ctx).await,
            Trigger::Reset => reset(ctx).await,
            Trigger::Retry => Ok(retry(ctx)),
            Trigger::Restart => restart(ctx).await,
            Trigger::Unprepare => Err(CoreError::InvalidRequest("step_group nodes are never unprepared directly; unprepare the owning step".into())),
            Trigger::Pause | Trigger::Resume | Trigger::Accept | Trigger::Reject => unreachable!("handled by generic_lifecycle"),
        }
    }
}

fn artifact_dir(ctx: &TransitionContext<'_>) -> PathBuf {
    ctx.artifact_root.join(ctx.node.id.to_string())
}

/// The step this group was expanded from is its direct graph predecessor
/// (`Step::prepare` wires `step -> group` directly, never through a
/// go-between).
fn parent_step(ctx: &TransitionContext<'_>) -> Result<Node, CoreError> {
    let g = cm_graph::build(ctx.store, ctx.namespace);
    let state = ctx.store.state();
    g.edges
        .neighbors_directed(ctx.node.id, petgraph::Direction::Incoming)
        .filter_map(|id| state.node(id))
        .find(|n| n.kind == NodeKind::Step)
        .cloned()
        .ok_or_else(|| CoreError::NotFound { kind: "Node", id: format!("step predecessor of {}", ctx.node.id) })
}

async fn prepare(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let step = parent_step(ctx)?;
    let config = crate::config_chain::resolve(ctx.store, ctx.namespace, &step, Some(&ctx.node))?;

    let dir = artifact_dir(ctx);
    tokio::fs::create_dir_all(&dir).await.map_err(io_err)?;
    let script = render_submission_script(&ctx.node, &config);
    tokio::fs::write(dir.join(SUBMIT_SCRIPT), script).await.map_err(io_err)?;

    if let Some(members) = input_collection_members(&config) {
        let repo = config.get("butler").and_then(|b| b.get("repo")).and_then(Value::as_str).unwrap_or("default");
        ctx.butler.create_chained_collection(repo, &format!("{}.input", ctx.node.name), &members).await?;
    }

    Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null })
}

fn input_collection_members(config: &Value) -> Option<Vec<String>> {
    let items = config.get("input_collections")?.as_array()?;
    let members: Vec<String> = items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect();
    if members.is_empty() {
        None
    } else {
        Some(members)
    }
}

fn render_submission_script(node: &Node, config: &Value) -> String {
    let predicate = node.configuration.get("predicate").and_then(Value::as_str).unwrap_or("1");
    format!("#!/bin/sh\n# bps submission for {}\n# predicate: {predicate}\nexec bps submit '{}'\n", node.name, config)
}

async fn start(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let script = artifact_dir(ctx).join(SUBMIT_SCRIPT);
    let submit_id = ctx.launcher.submit(&script, &HashMap::new()).await?;
    Ok(TransitionOutcome::Transition { to: StatusEnum::Running, transient: json!({"wms_id": submit_id}) })
}

async fn finish(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let wms_id = ctx
        .node
        .metadata
        .get("wms_id")
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::InvalidRequest("group has no in-flight wms_id to check".into()))?;
    let result = ctx.launcher.check(wms_id).await?;
    if result.success {
        Ok(TransitionOutcome::Transition { to: StatusEnum::Accepted, transient: Value::Null })
    } else if result.running {
        Ok(TransitionOutcome::NoChange)
    } else {
        Err(CoreError::LauncherCheckError(result.reason.unwrap_or_else(|| "wms reported failure with no reason".into())))
    }
}

async fn reset(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let dir = artifact_dir(ctx);
    if tokio::fs::try_exists(&dir).await.unwrap_or(false) {
        tokio::fs::remove_dir_all(&dir).await.map_err(io_err)?;
    }
    Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: json!({"wms_id": Value::Null, "retries": Value::Null}) })
}

fn retry(ctx: &TransitionContext<'_>) -> TransitionOutcome {
    let retries = ctx.node.metadata.get("retries").and_then(Value::as_u64).unwrap_or(0) + 1;
    TransitionOutcome::Transition { to: StatusEnum::Ready, transient: json!({"retries": retries}) }
}

async fn restart(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let dir = artifact_dir(ctx);
    let marker = dir.join(RESTARTABLE_MARKER);
    if !tokio::fs::try_exists(&marker).await.unwrap_or(false) {
        return Err(CoreError::InvalidRequest("no restartable quantum-graph artifact for this group".into()));
    }
    let restarts = ctx.node.metadata.get("restarts").and_then(Value::as_u64).unwrap_or(0) + 1;
    let script = format!("#!/bin/sh\n# bps restart attempt {restarts}\nexec bps restart '{}'\n", marker.display());
    tokio::fs::write(dir.join(SUBMIT_SCRIPT), script).await.map_err(io_err)?;
    Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: json!({"restarts": restarts}) })
}

fn io_err(e: std::io::Error) -> CoreError {
    CoreError::InvalidRequest(format!("artifact directory error: {e}"))
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
