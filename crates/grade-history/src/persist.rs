//! Persistence of history stacks to an external key-value cache.
//!
//! The payload layout is `{undo_stack, redo_stack, timestamp}` (epoch
//! milliseconds) keyed by image identity. Entries older than the 24-hour
//! freshness window load as empty, as do missing or unparsable entries -
//! a cache problem is never an error to the caller.

use crate::HistoryResult;
use grade_core::ImageIdent;
use grade_model::AdjustmentRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Freshness window for persisted entries, in milliseconds (24 hours).
pub const FRESHNESS_MS: u64 = 24 * 60 * 60 * 1000;

/// External key-value cache seam.
///
/// The engine never talks to storage directly; the host application
/// provides whatever backing it has (browser storage, Redis, a file).
pub trait HistoryStore {
    /// Fetches the raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store for tests and standalone use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedHistory {
    undo_stack: Vec<AdjustmentRecord>,
    redo_stack: Vec<AdjustmentRecord>,
    timestamp: u64,
}

fn cache_key(id: &ImageIdent) -> String {
    format!("grade:history:{id}")
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Persists both stacks for `id` with the current timestamp.
pub fn save(
    store: &mut dyn HistoryStore,
    id: &ImageIdent,
    undo: &[AdjustmentRecord],
    redo: &[AdjustmentRecord],
) -> HistoryResult<()> {
    save_at(store, id, undo, redo, now_ms())
}

/// Loads both stacks for `id`, applying the freshness window.
pub fn load(
    store: &dyn HistoryStore,
    id: &ImageIdent,
) -> (Vec<AdjustmentRecord>, Vec<AdjustmentRecord>) {
    load_at(store, id, now_ms())
}

fn save_at(
    store: &mut dyn HistoryStore,
    id: &ImageIdent,
    undo: &[AdjustmentRecord],
    redo: &[AdjustmentRecord],
    timestamp: u64,
) -> HistoryResult<()> {
    let payload = PersistedHistory {
        undo_stack: undo.to_vec(),
        redo_stack: redo.to_vec(),
        timestamp,
    };
    store.set(&cache_key(id), serde_json::to_string(&payload)?);
    Ok(())
}

fn load_at(
    store: &dyn HistoryStore,
    id: &ImageIdent,
    now: u64,
) -> (Vec<AdjustmentRecord>, Vec<AdjustmentRecord>) {
    let Some(raw) = store.get(&cache_key(id)) else {
        debug!(image = %id, "history cache miss");
        return (Vec::new(), Vec::new());
    };

    let parsed: PersistedHistory = match serde_json::from_str(&raw) {
        Ok(p) => p,
        Err(err) => {
            debug!(image = %id, %err, "unreadable history entry, treating as empty");
            return (Vec::new(), Vec::new());
        }
    };

    if now.saturating_sub(parsed.timestamp) > FRESHNESS_MS {
        debug!(image = %id, "stale history entry, treating as empty");
        return (Vec::new(), Vec::new());
    }

    (parsed.undo_stack, parsed.redo_stack)
}
