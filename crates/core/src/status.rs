// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node and campaign status enums, and the node/manifest kind taxonomies.

use serde::{Deserialize, Serialize};

/// Node status (the `StatusEnum` of §4.3), ordered by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEnum {
    Failed,
    Rejected,
    Paused,
    Rescuable,
    Waiting,
    Ready,
    Prepared,
    Running,
    Reviewable,
    Accepted,
    Rescued,
}

crate::simple_display! {
    StatusEnum {
        Failed => "failed",
        Rejected => "rejected",
        Paused => "paused",
        Rescuable => "rescuable",
        Waiting => "waiting",
        Ready => "ready",
        Prepared => "prepared",
        Running => "running",
        Reviewable => "reviewable",
        Accepted => "accepted",
        Rescued => "rescued",
    }
}

impl StatusEnum {
    /// Terminal-successful statuses satisfy a predecessor for the
    /// processable-set rule (§4.2).
    pub fn is_terminal_successful(self) -> bool {
        matches!(self, StatusEnum::Accepted | StatusEnum::Rescued)
    }

    /// Terminal statuses (successful or not) never re-enter the processable set
    /// on their own.
    pub fn is_terminal(self) -> bool {
        matches!(self, StatusEnum::Accepted | StatusEnum::Rescued | StatusEnum::Failed | StatusEnum::Rejected)
    }
}

/// Named FSM triggers (§4.3 table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Prepare,
    Start,
    Finish,
    Pause,
    Resume,
    Retry,
    Reset,
    Unprepare,
    Accept,
    Reject,
    Restart,
}

crate::simple_display! {
    Trigger {
        Prepare => "prepare",
        Start => "start",
        Finish => "finish",
        Pause => "pause",
        Resume => "resume",
        Retry => "retry",
        Reset => "reset",
        Unprepare => "unprepare",
        Accept => "accept",
        Reject => "reject",
        Restart => "restart",
    }
}

/// Node kind. `Step` ("grouped_step") expands into `Group` ("step_group")
/// children plus one `StepCollect` node; see §9's Open Question resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    End,
    Step,
    Group,
    StepCollect,
    Breakpoint,
    Action,
    Other,
}

crate::simple_display! {
    NodeKind {
        Start => "start",
        End => "end",
        Step => "grouped_step",
        Group => "step_group",
        StepCollect => "collect_groups",
        Breakpoint => "breakpoint",
        Action => "action",
        Other => "other",
    }
}

/// Campaign status (§4.4); reuses node triggers where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Waiting,
    Ready,
    Running,
    Paused,
    Accepted,
    Failed,
}

crate::simple_display! {
    CampaignStatus {
        Waiting => "waiting",
        Ready => "ready",
        Running => "running",
        Paused => "paused",
        Accepted => "accepted",
        Failed => "failed",
    }
}

impl CampaignStatus {
    /// Campaigns the daemon's `consider_campaigns` loop considers at all.
    pub fn is_schedulable(self) -> bool {
        matches!(self, CampaignStatus::Ready | CampaignStatus::Running)
    }

    /// Graph/node mutations are only legal while the campaign is paused or
    /// has not yet started running (§4.2).
    pub fn accepts_mutation(self) -> bool {
        matches!(self, CampaignStatus::Waiting | CampaignStatus::Ready | CampaignStatus::Paused)
    }
}

/// Manifest kind (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestKind {
    Lsst,
    Bps,
    Butler,
    Wms,
    Site,
    Step,
    Node,
    Edge,
    Other,
}

crate::simple_display! {
    ManifestKind {
        Lsst => "lsst",
        Bps => "bps",
        Butler => "butler",
        Wms => "wms",
        Site => "site",
        Step => "step",
        Node => "node",
        Edge => "edge",
        Other => "other",
    }
}

impl ManifestKind {
    /// The mandatory library-default kinds chained in §4.6.
    pub const MANDATORY: [ManifestKind; 5] =
        [ManifestKind::Lsst, ManifestKind::Bps, ManifestKind::Butler, ManifestKind::Wms, ManifestKind::Site];
}

/// Task status (§3 Task entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Queued,
    InProgress,
    Submitted,
    Finished,
}

crate::simple_display! {
    TaskStatus {
        Queued => "queued",
        InProgress => "in_progress",
        Submitted => "submitted",
        Finished => "finished",
    }
}
