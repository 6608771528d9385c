// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action transitions (§4.3): a generic one-shot Launcher job, used for
//! `action` nodes and anything the model doesn't otherwise recognise
//! (`other`).

use super::{generic_lifecycle, NodeBehavior, TransitionContext, TransitionOutcome};
use async_trait::async_trait;
use cm_core::{CoreError, StatusEnum, Trigger};
use serde_json::{json, Value};
use std::collections::HashMap;

pub struct Action;

#[async_trait]
impl NodeBehavior for Action {
    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError> {
        if let Some(outcome) = generic_lifecycle(ctx, trigger) {
            return Ok(outcome);
        }
        match trigger {
            Trigger::Prepare => Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null }),
            Trigger::Start => start(ctx).await,
            Trigger::Finish => finish(ctx).await,
            Trigger::Reset => Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: json!({"wms_id": Value::Null}) }),
            Trigger::Retry => Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null }),
            Trigger::Unprepare => Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: Value::Null }),
            Trigger::Restart => Err(CoreError::InvalidRequest("restart is only legal for step_group nodes".into())),
            Trigger::Pause | Trigger::Resume | Trigger::Accept | Trigger::Reject => unreachable!("handled by generic_lifecycle"),
        }
    }
}

async fn start(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let script = ctx.node.configuration.get("script").and_then(Value::as_str).unwrap_or("/bin/true");
    let submit_id = ctx.launcher.submit(std::path::Path::new(script), &HashMap::new()).await?;
    Ok(TransitionOutcome::Transition { to: StatusEnum::Running, transient: json!({"wms_id": submit_id}) })
}

async fn finish(ctx: &TransitionContext<'_>) -> Result<TransitionOutcome, CoreError> {
    let wms_id = ctx
        .node
        .metadata
        .get("wms_id")
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::InvalidRequest("action has no in-flight wms_id to check".into()))?;
    let result = ctx.launcher.check(wms_id).await?;
    if result.success {
        Ok(TransitionOutcome::Transition { to: StatusEnum::Accepted, transient: Value::Null })
    } else if result.running {
        Ok(TransitionOutcome::NoChange)
    } else {
        Err(CoreError::LauncherCheckError(result.reason.unwrap_or_else(|| "launcher reported failure with no reason".into())))
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
