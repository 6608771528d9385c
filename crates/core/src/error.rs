// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds surfaced by the campaign-manager core (§7).

use thiserror::Error;

/// Errors propagated to a caller outside a Node FSM transition.
///
/// Failures *inside* a transition are caught and converted to the node's
/// `failed` status (see `cm_engine::executor`); they never reach this type.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("campaign is locked: {0}")]
    CampaignLocked(String),

    #[error("node is not processable: {0}")]
    NotProcessable(String),

    #[error("campaign graph is invalid: {0}")]
    InvalidCampaignGraphError(String),

    #[error("splitter cannot satisfy min_groups: {0}")]
    InvalidGrouping(String),

    #[error("json-patch test assertion failed at {path}")]
    PatchAssertionFailed { path: String },

    #[error("launcher submit failed: {0}")]
    LauncherSubmitError(String),

    #[error("launcher check failed: {0}")]
    LauncherCheckError(String),

    #[error("unknown manifest: {0}")]
    UnknownManifest(String),

    #[error("unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CoreError {
    /// Stable discriminator string for HTTP response bodies (§6).
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NotFound",
            CoreError::Conflict(_) => "Conflict",
            CoreError::CampaignLocked(_) => "CampaignLocked",
            CoreError::NotProcessable(_) => "NotProcessable",
            CoreError::InvalidCampaignGraphError(_) => "InvalidCampaignGraphError",
            CoreError::InvalidGrouping(_) => "InvalidGrouping",
            CoreError::PatchAssertionFailed { .. } => "PatchAssertionFailed",
            CoreError::LauncherSubmitError(_) => "LauncherSubmitError",
            CoreError::LauncherCheckError(_) => "LauncherCheckError",
            CoreError::UnknownManifest(_) => "UnknownManifest",
            CoreError::UnknownNamespace(_) => "UnknownNamespace",
            CoreError::InvalidRequest(_) => "InvalidRequest",
        }
    }
}
