// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Breakpoint transitions (§4.3): behaves like a sentinel up through
//! `start`, then parks in `running` until an operator forces `accept`.

use super::{generic_lifecycle, NodeBehavior, TransitionContext, TransitionOutcome};
use async_trait::async_trait;
use cm_core::{CoreError, StatusEnum, Trigger};
use serde_json::Value;

pub struct Breakpoint;

#[async_trait]
impl NodeBehavior for Breakpoint {
    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError> {
        if let Some(outcome) = generic_lifecycle(ctx, trigger) {
            return Ok(outcome);
        }
        match trigger {
            Trigger::Prepare => Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null }),
            Trigger::Start => Ok(TransitionOutcome::Transition { to: StatusEnum::Running, transient: Value::Null }),
            // Never fires spontaneously; only the operator's forced `accept`
            // (handled above by `generic_lifecycle`) closes a breakpoint.
            Trigger::Finish => Ok(TransitionOutcome::NoChange),
            Trigger::Reset => Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: Value::Null }),
            Trigger::Retry => Ok(TransitionOutcome::Transition { to: StatusEnum::Ready, transient: Value::Null }),
            Trigger::Unprepare => Ok(TransitionOutcome::Transition { to: StatusEnum::Waiting, transient: Value::Null }),
            Trigger::Restart => Err(CoreError::InvalidRequest("restart is only legal for step_group nodes".into())),
            Trigger::Pause | Trigger::Resume | Trigger::Accept | Trigger::Reject => unreachable!("handled by generic_lifecycle"),
        }
    }
}

#[cfg(test)]
#[path = "breakpoint_tests.rs"]
mod tests;
