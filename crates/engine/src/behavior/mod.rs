// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-kind Node FSM specializations (§4.3). One [`NodeBehavior`] impl
//! per [`NodeKind`]; the executor dispatches to it, never branching on kind
//! itself.

mod action;
mod breakpoint;
mod group;
mod sentinel;
mod step;
mod step_collect;

use async_trait::async_trait;
use cm_adapters::{Butler, Launcher};
use cm_core::{CoreError, Node, NodeKind, StatusEnum, Trigger};
use cm_storage::Store;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Everything a `before_*` action needs, borrowed for the duration of one
/// transition. The node is the fresh, row-locked copy loaded by the executor.
/// Launcher/Butler are `Arc`, not borrowed, so `Step::prepare` can hand one
/// to a `QuerySplitter` that may outlive this call inside a spawned retry.
pub struct TransitionContext<'a> {
    pub store: &'a Store,
    pub launcher: Arc<dyn Launcher>,
    pub butler: Arc<dyn Butler>,
    pub artifact_root: &'a Path,
    pub namespace: Uuid,
    pub node: Node,
    pub now_ms: u64,
}

/// What a `before_*` action decided. `NoChange` is a legal outcome (e.g.
/// polling `finish` on a still-running WMS job) and commits nothing.
pub enum TransitionOutcome {
    Transition { to: StatusEnum, transient: Value },
    NoChange,
}

#[async_trait]
pub trait NodeBehavior: Send + Sync {
    /// Whether `trigger` is legal from `from` for this kind. Consulted by
    /// the executor (precondition) and by `rpc_process`/the scheduler.
    fn applies(&self, trigger: Trigger, from: StatusEnum) -> bool {
        default_applies(trigger, from)
    }

    /// Run the transition's side-effecting action. `Err` becomes the
    /// node's `failed` status, per the transition contract (§4.3 item 2);
    /// the error's `kind()` is recorded verbatim as the ActivityLog exception.
    async fn run(&self, ctx: &TransitionContext<'_>, trigger: Trigger) -> Result<TransitionOutcome, CoreError>;
}

/// The nominal trigger table shared by every kind (§4.3), before
/// per-kind narrowing (sentinels) or widening (Group's `restart`).
pub fn default_applies(trigger: Trigger, from: StatusEnum) -> bool {
    use StatusEnum::*;
    use Trigger::*;
    match trigger {
        Prepare => from == Waiting,
        Start => from == Ready,
        Finish => from == Running,
        Pause => matches!(from, Ready | Running),
        Resume => from == Paused,
        Retry => from == Failed,
        Reset => matches!(from, Failed | Ready | Prepared | Running | Paused | Reviewable | Rescuable),
        Unprepare => from == Ready,
        Accept => !matches!(from, Accepted | Rescued),
        Reject => !from.is_terminal(),
        Restart => false,
    }
}

pub fn behavior_for(kind: NodeKind) -> Box<dyn NodeBehavior> {
    match kind {
        NodeKind::Start | NodeKind::End => Box::new(sentinel::Sentinel),
        NodeKind::Step => Box::new(step::Step),
        NodeKind::Group => Box::new(group::Group),
        NodeKind::StepCollect => Box::new(step_collect::StepCollect),
        NodeKind::Breakpoint => Box::new(breakpoint::Breakpoint),
        NodeKind::Action | NodeKind::Other => Box::new(action::Action),
    }
}

pub(crate) fn transient_children(node: &Node) -> Vec<Uuid> {
    node.metadata
        .get("children")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_str().and_then(|s| s.parse().ok())).collect())
        .unwrap_or_default()
}

/// `pause`/`resume`/`accept`/`reject` behave identically for every kind, so
/// each behavior's `run` tries this first and only falls through to its own
/// per-kind logic for the remaining triggers.
pub(crate) fn generic_lifecycle(ctx: &TransitionContext<'_>, trigger: Trigger) -> Option<TransitionOutcome> {
    match trigger {
        Trigger::Pause => {
            Some(TransitionOutcome::Transition { to: StatusEnum::Paused, transient: serde_json::json!({"paused_from": ctx.node.status.to_string()}) })
        }
        Trigger::Resume => {
            let from = ctx.node.metadata.get("paused_from").and_then(Value::as_str).and_then(parse_status).unwrap_or(StatusEnum::Waiting);
            Some(TransitionOutcome::Transition { to: from, transient: Value::Null })
        }
        Trigger::Accept => Some(TransitionOutcome::Transition { to: StatusEnum::Accepted, transient: Value::Null }),
        Trigger::Reject => Some(TransitionOutcome::Transition { to: StatusEnum::Rejected, transient: Value::Null }),
        _ => None,
    }
}

pub(crate) fn parse_status(s: &str) -> Option<StatusEnum> {
    match s {
        "waiting" => Some(StatusEnum::Waiting),
        "ready" => Some(StatusEnum::Ready),
        "running" => Some(StatusEnum::Running),
        "prepared" => Some(StatusEnum::Prepared),
        "reviewable" => Some(StatusEnum::Reviewable),
        "rescuable" => Some(StatusEnum::Rescuable),
        _ => None,
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::{Node, TransitionContext};
    use cm_adapters::{FakeButler, FakeLauncher};
    use cm_storage::Store;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// A fully wired, disposable set of engine dependencies for behavior
    /// and executor tests.
    pub struct Harness {
        pub store: Store,
        pub launcher: Arc<FakeLauncher>,
        pub butler: Arc<FakeButler>,
        pub artifact_root: PathBuf,
        _dir: TempDir,
    }

    impl Default for Harness {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Harness {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().expect("tempdir");
            let store = Store::open(dir.path().join("wal")).expect("open store");
            let artifact_root = dir.path().join("artifacts");
            Self { store, launcher: Arc::new(FakeLauncher::new()), butler: Arc::new(FakeButler::new()), artifact_root, _dir: dir }
        }

        pub fn ctx(&self, node: Node) -> TransitionContext<'_> {
            TransitionContext {
                store: &self.store,
                launcher: self.launcher.clone(),
                butler: self.butler.clone(),
                artifact_root: &self.artifact_root,
                namespace: node.namespace,
                node,
                now_ms: 1_700_000_000_000,
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
