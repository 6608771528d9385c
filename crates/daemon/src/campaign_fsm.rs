// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Campaign FSM (§4.4): the same shape as the Node FSM — row-locked
//! load, legality check, commit — narrowed to the handful of transitions a
//! whole campaign can make. `ready/paused -> running` is the one gated
//! transition (`validate_graph`); everything else is unconditional once
//! legal.

use cm_core::{ActivityLogEntry, Campaign, CampaignId, CampaignStatus, CoreError};
use cm_storage::{Event, Store};
use serde_json::json;

/// Whether a campaign may move directly from `from` to `to`. `failed` is
/// reachable from anything non-terminal (an operator or monitoring hook
/// giving up on the campaign); `accepted` only follows `running`, driven by
/// the scheduler noticing the END node has itself reached a terminal
/// successful status.
pub fn legal_transition(from: CampaignStatus, to: CampaignStatus) -> bool {
    use CampaignStatus::*;
    match (from, to) {
        (Waiting, Ready) => true,
        (Ready, Running) | (Paused, Running) => true,
        (Running, Paused) => true,
        (Running, Accepted) => true,
        (_, Failed) => !matches!(from, Accepted | Failed),
        _ => false,
    }
}

/// Drive a campaign to `to`. Refuses with `NotProcessable` if the
/// transition isn't in the legal table; refuses entry into `running` with
/// the graph's own `InvalidCampaignGraphError` if `validate_graph` fails,
/// recording an ActivityLog row for the refusal without changing status
/// (§4.4).
pub async fn drive(store: &Store, campaign_id: CampaignId, to: CampaignStatus, operator: &str, now_ms: u64) -> Result<ActivityLogEntry, CoreError> {
    let _guard = store.lock_campaign(campaign_id).await;
    let campaign = store.state().campaign(campaign_id).cloned().ok_or_else(|| CoreError::NotFound { kind: "Campaign", id: campaign_id.to_string() })?;

    if !legal_transition(campaign.status, to) {
        return Err(CoreError::NotProcessable(format!("campaign cannot go from {} to {to}", campaign.status)));
    }

    if to == CampaignStatus::Running {
        let graph = cm_graph::build(store, campaign.namespace);
        if let Err(error) = cm_graph::validate(&graph) {
            let entry = ActivityLogEntry::new(
                campaign.namespace,
                None,
                operator,
                now_ms,
                campaign.status.to_string(),
                campaign.status.to_string(),
                json!({"exception": "InvalidCampaignGraphError", "error": error.to_string()}),
            );
            store.append_activity_log(entry)?;
            return Err(error);
        }
    }

    let mut updated = campaign.clone();
    updated.status = to;
    let entry =
        ActivityLogEntry::new(campaign.namespace, None, operator, now_ms, campaign.status.to_string(), to.to_string(), json!({"trigger": "campaign_status_change"}));
    store.commit_all(vec![Event::CampaignWritten(updated), Event::ActivityLogAppended(entry.clone())])?;
    Ok(entry)
}

#[cfg(test)]
#[path = "campaign_fsm_tests.rs"]
mod tests;
