// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Start/End sentinels (§4.3): every nominal trigger is a noop action,
//! they only exist to anchor traversal.

use super::{generic_lifecycle, NodeBehavior, TransitionContext, TransitionOutcome};
use async_trait::async_trait;
use cm_core::{CoreError, StatusEnum, Trigger};
use serde_json::Value;

pub struct Sentinel;

#[async_trait]
impl NodeBehavior for Sentinel {
    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError> {
        if let Some(outcome) = generic_lifecycle(ctx, trigger) {
            return Ok(outcome);
        }
        let to = match trigger {
            Trigger::Prepare => StatusEnum::Ready,
            Trigger::Start => StatusEnum::Running,
            Trigger::Finish => StatusEnum::Accepted,
            Trigger::Reset => StatusEnum::Waiting,
            Trigger::Retry => StatusEnum::Ready,
            Trigger::Unprepare => StatusEnum::Waiting,
            Trigger::Restart => return Err(CoreError::InvalidRequest("sentinel nodes are never restartable".into())),
            Trigger::Pause | Trigger::Resume | Trigger::Accept | Trigger::Reject => unreachable!("handled by generic_lifecycle"),
        };
        Ok(TransitionOutcome::Transition { to, transient: Value::Null })
    }
}

#[cfg(test)]
#[path = "sentinel_tests.rs"]
mod tests;
