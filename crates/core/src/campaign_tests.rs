// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_campaign_starts_waiting() {
    let c = Campaign::new("demo", crate::namespace::root(), "alice", Value::Object(Default::default()));
    assert_eq!(c.status, CampaignStatus::Waiting);
    assert_eq!(c.id, CampaignId::new(crate::namespace::root(), "demo"));
}

#[test]
fn same_name_and_namespace_derive_same_id() {
    let ns = Uuid::new_v4();
    let a = Campaign::new("demo", ns, "alice", Value::Null);
    let b = Campaign::new("demo", ns, "bob", Value::Null);
    assert_eq!(a.id, b.id, "id depends only on (name, namespace), not owner");
}

#[test]
fn builder_recomputes_id_from_name() {
    let c = Campaign::builder().name("other").build();
    assert_eq!(c.id, CampaignId::new(crate::namespace::root(), "other"));
}
