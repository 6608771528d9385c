// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{Campaign, CampaignId};
use uuid::Uuid;

impl MaterializedState {
    pub(super) fn put_campaign(&mut self, campaign: Campaign) {
        self.campaigns.insert(campaign.id, campaign);
    }

    pub fn campaign(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns.get(&id)
    }

    pub fn campaign_by_name(&self, namespace: Uuid, name: &str) -> Option<&Campaign> {
        self.campaigns.get(&CampaignId::new(namespace, name))
    }

    pub fn campaigns_with_status(&self, f: impl Fn(cm_core::CampaignStatus) -> bool) -> Vec<&Campaign> {
        self.campaigns.values().filter(|c| f(c.status)).collect()
    }

    pub fn all_campaigns(&self) -> impl Iterator<Item = &Campaign> {
        self.campaigns.values()
    }
}
