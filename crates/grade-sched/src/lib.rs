//! # grade-sched
//!
//! Debounces rapid adjustment changes and guarantees at most one in-flight
//! pixel recompute per image, superseding stale work.
//!
//! The design is a single-slot mailbox, not a queue: every [`submit`]
//! replaces the pending record and re-arms a 50 ms quiescence timer. When
//! the timer fires, a dedicated worker thread materializes the latest
//! record into pixels; a submit arriving mid-flight raises the run's
//! cancellation token so partial results are never delivered. Intermediate
//! records are visually skipped by design.
//!
//! The scheduler is also the only history writer: the first submit of a
//! burst pushes the pre-burst state, so a run of rapid slider drags
//! collapses into exactly one undo entry.
//!
//! [`submit`]: Scheduler::submit

#![warn(missing_docs)]

mod scheduler;

pub use scheduler::{DEBOUNCE_WINDOW, Scheduler, SchedulerEvent};
