// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("wal entry at seq {0} is corrupt: {1}")]
    Corrupt(u64, String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("unique constraint violated: {0}")]
    Conflict(String),
}

impl From<StorageError> for cm_core::CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { kind, id } => cm_core::CoreError::NotFound { kind, id },
            StorageError::Conflict(msg) => cm_core::CoreError::Conflict(msg),
            other => cm_core::CoreError::Conflict(other.to_string()),
        }
    }
}
