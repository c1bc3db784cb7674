//! # grade-history
//!
//! Bounded undo/redo stacks of adjustment snapshots, scoped per image and
//! persisted to an external key-value cache with a freshness window.
//!
//! The stacks hold pre-mutation snapshots: `push` is called with the state
//! that is about to be replaced. `undo`/`redo` take the caller's current
//! record so the round-trip law holds without the manager duplicating the
//! engine's "current" state.
//!
//! # Example
//!
//! ```rust
//! use grade_core::ImageIdent;
//! use grade_history::HistoryManager;
//! use grade_model::AdjustmentRecord;
//!
//! let id = ImageIdent::file("shot.png", 1024);
//! let mut history = HistoryManager::new();
//!
//! let before = AdjustmentRecord::default();
//! let after = AdjustmentRecord { exposure: 20.0, ..before };
//!
//! history.push(&id, before);
//! let restored = history.undo(&id, &after).unwrap();
//! assert_eq!(restored, before);
//! ```

#![warn(missing_docs)]

mod error;
mod manager;
mod persist;

pub use error::{HistoryError, HistoryResult};
pub use manager::{HistoryManager, MAX_ENTRIES};
pub use persist::{FRESHNESS_MS, HistoryStore, MemoryStore, load, save};
