// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only write-ahead log of `Event`s, one JSON object per line.
//!
//! `open` creates or resumes a log file, `append` assigns a monotonic
//! sequence number and durably writes before returning, and replay on open
//! rebuilds in-memory state by folding every entry in order.

use crate::event::Event;
use crate::error::StorageError;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct WalEntry {
    pub seq: u64,
    pub event: Event,
}

pub struct Wal {
    path: PathBuf,
    file: File,
    write_seq: u64,
}

impl Wal {
    /// Open (creating if absent) the log at `path`. `write_seq` is the
    /// highest sequence number already durable in the file, as determined by
    /// the caller's prior replay (0 for a fresh log).
    pub fn open(path: impl AsRef<Path>, write_seq: u64) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file, write_seq })
    }

    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    /// Append one event, returning its assigned sequence number. Flushes
    /// immediately — durability matters more than batching here, since an
    /// unflushed Task/ActivityLog write would silently vanish on restart.
    pub fn append(&mut self, event: &Event) -> Result<u64, StorageError> {
        self.write_seq += 1;
        let entry = WalEntry { seq: self.write_seq, event: event.clone() };
        let line = serde_json::to_string(&SerEntry { seq: entry.seq, event: &entry.event })?;
        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        Ok(entry.seq)
    }

    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.file.flush()?;
        Ok(())
    }

    /// Replay every durable entry in order, folding `apply` over each.
    /// Used once at startup to rebuild `MaterializedState`.
    pub fn replay(path: impl AsRef<Path>, mut apply: impl FnMut(Event)) -> Result<u64, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(0);
        }
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut last_seq = 0u64;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let de: DeEntry = serde_json::from_str(&line)
                .map_err(|e| StorageError::Corrupt(line_no as u64 + 1, e.to_string()))?;
            last_seq = de.seq;
            apply(de.event);
        }
        Ok(last_seq)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(serde::Serialize)]
struct SerEntry<'a> {
    seq: u64,
    event: &'a Event,
}

#[derive(serde::Deserialize)]
struct DeEntry {
    seq: u64,
    event: Event,
}

#[cfg(test)]
#[path = "wal_tests.rs"]
mod tests;
