//! Worker thread, mailbox, and event plumbing.

use grade_core::{ImageIdent, PixelBuffer};
use grade_history::HistoryManager;
use grade_lut::Lut3D;
use grade_model::AdjustmentRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Quiescence window: a recompute fires only after this long without a
/// newer submit.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(50);

/// Progress and completion signals for the orchestration layer.
#[derive(Debug)]
pub enum SchedulerEvent {
    /// A recompute began for `record`.
    Started {
        /// The record being materialized.
        record: AdjustmentRecord,
    },
    /// A recompute finished and produced pixels.
    Completed {
        /// The record that was materialized.
        record: AdjustmentRecord,
        /// The transformed image.
        buffer: PixelBuffer,
    },
    /// A recompute was cancelled because newer input arrived. A normal
    /// outcome of latest-wins scheduling, not a failure.
    Superseded {
        /// The record whose recompute was abandoned.
        record: AdjustmentRecord,
    },
}

struct Pending {
    record: AdjustmentRecord,
    deadline: Instant,
}

struct Inner {
    current: AdjustmentRecord,
    pending: Option<Pending>,
    inflight_cancel: Option<Arc<AtomicBool>>,
    active_lut: Option<(Lut3D, f32)>,
    burst_open: bool,
    shutdown: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    cond: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Debounced recompute scheduler for one open image.
///
/// # Example
///
/// ```rust,no_run
/// use grade_core::{ImageIdent, PixelBuffer};
/// use grade_history::HistoryManager;
/// use grade_model::AdjustmentRecord;
/// use grade_sched::{Scheduler, SchedulerEvent};
/// use std::sync::{Arc, Mutex, mpsc};
///
/// let source = PixelBuffer::new(640, 480, 4).unwrap();
/// let history = Arc::new(Mutex::new(HistoryManager::new()));
/// let (tx, rx) = mpsc::channel();
///
/// let sched = Scheduler::new(ImageIdent::project("shot"), source, history, tx);
/// sched.submit(AdjustmentRecord { exposure: 10.0, ..Default::default() });
///
/// if let Ok(SchedulerEvent::Completed { buffer, .. }) = rx.recv() {
///     // hand `buffer` to the viewport
/// }
/// ```
pub struct Scheduler {
    shared: Arc<Shared>,
    image: ImageIdent,
    history: Arc<Mutex<HistoryManager>>,
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawns the worker for `image`, recomputing against `source`.
    pub fn new(
        image: ImageIdent,
        source: PixelBuffer,
        history: Arc<Mutex<HistoryManager>>,
        events: Sender<SchedulerEvent>,
    ) -> Self {
        let shared = Arc::new(Shared {
            inner: Mutex::new(Inner {
                current: AdjustmentRecord::default(),
                pending: None,
                inflight_cancel: None,
                active_lut: None,
                burst_open: false,
                shutdown: false,
            }),
            cond: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name(format!("grade-sched:{image}"))
            .spawn(move || worker_loop(worker_shared, source, events))
            .ok();

        Self {
            shared,
            image,
            history,
            worker,
        }
    }

    /// Submits a new adjustment record.
    ///
    /// The current record is updated synchronously (UI state is always
    /// consistent); the pixel recompute is deferred until the record has
    /// been quiescent for [`DEBOUNCE_WINDOW`]. An in-flight recompute is
    /// superseded. The first submit of a burst pushes the pre-burst state
    /// onto the undo history.
    pub fn submit(&self, record: AdjustmentRecord) {
        let mut inner = self.shared.lock();

        if !inner.burst_open {
            self.history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(&self.image, inner.current);
            inner.burst_open = true;
            trace!(image = %self.image, "burst opened, pre-burst state pushed");
        }

        inner.current = record;
        inner.pending = Some(Pending {
            record,
            deadline: Instant::now() + DEBOUNCE_WINDOW,
        });
        if let Some(token) = &inner.inflight_cancel {
            token.store(true, Ordering::Relaxed);
            debug!(image = %self.image, "superseding in-flight recompute");
        }

        drop(inner);
        self.shared.cond.notify_one();
    }

    /// The record as of the most recent submit (or undo/redo).
    pub fn current(&self) -> AdjustmentRecord {
        self.shared.lock().current
    }

    /// Sets or clears the active LUT applied after the pipeline.
    pub fn set_lut(&self, lut: Option<(Lut3D, f32)>) {
        self.shared.lock().active_lut = lut;
    }

    /// Steps history back one entry and schedules an immediate recompute.
    ///
    /// Returns the restored record, or `None` when there is nothing to
    /// undo. Undo commits on its own; it does not open a burst.
    pub fn undo(&self) -> Option<AdjustmentRecord> {
        self.step_history(|history, image, current| history.undo(image, current))
    }

    /// Mirror of [`undo`](Self::undo).
    pub fn redo(&self) -> Option<AdjustmentRecord> {
        self.step_history(|history, image, current| history.redo(image, current))
    }

    fn step_history(
        &self,
        step: impl FnOnce(
            &mut HistoryManager,
            &ImageIdent,
            &AdjustmentRecord,
        ) -> Option<AdjustmentRecord>,
    ) -> Option<AdjustmentRecord> {
        let mut inner = self.shared.lock();
        let restored = {
            let mut history = self
                .history
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            step(&mut history, &self.image, &inner.current)?
        };

        inner.current = restored;
        inner.burst_open = false;
        inner.pending = Some(Pending {
            record: restored,
            deadline: Instant::now(),
        });
        if let Some(token) = &inner.inflight_cancel {
            token.store(true, Ordering::Relaxed);
        }

        drop(inner);
        self.shared.cond.notify_one();
        Some(restored)
    }

    /// Stops the worker, abandoning any pending recompute.
    pub fn shutdown(&mut self) {
        {
            let mut inner = self.shared.lock();
            inner.shutdown = true;
            inner.pending = None;
            if let Some(token) = &inner.inflight_cancel {
                token.store(true, Ordering::Relaxed);
            }
        }
        self.shared.cond.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(shared: Arc<Shared>, source: PixelBuffer, events: Sender<SchedulerEvent>) {
    loop {
        // Wait for a pending record to come due, always materializing the
        // latest one.
        let (record, cancel, lut) = {
            let mut inner = shared.lock();
            loop {
                if inner.shutdown {
                    return;
                }
                match inner.pending.as_ref().map(|p| p.deadline) {
                    None => {
                        inner = shared
                            .cond
                            .wait(inner)
                            .unwrap_or_else(PoisonError::into_inner);
                    }
                    Some(deadline) => {
                        let now = Instant::now();
                        if now < deadline {
                            let (guard, _) = shared
                                .cond
                                .wait_timeout(inner, deadline - now)
                                .unwrap_or_else(PoisonError::into_inner);
                            inner = guard;
                            continue;
                        }
                        let Some(pending) = inner.pending.take() else {
                            continue;
                        };
                        let cancel = Arc::new(AtomicBool::new(false));
                        inner.inflight_cancel = Some(Arc::clone(&cancel));
                        inner.burst_open = false;
                        break (pending.record, cancel, inner.active_lut.clone());
                    }
                }
            }
        };

        let _ = events.send(SchedulerEvent::Started { record });
        debug!("recompute started");

        let buffer = grade_ops::apply_cancellable(&source, &record, &cancel).and_then(|buf| {
            match &lut {
                Some((lut, intensity)) => {
                    let sampled = grade_lut::sample(&buf, lut, *intensity);
                    // The sampler is not token-aware; honor a late cancel
                    // by dropping its output.
                    (!cancel.load(Ordering::Relaxed)).then_some(sampled)
                }
                None => Some(buf),
            }
        });

        shared.lock().inflight_cancel = None;

        match buffer {
            Some(buffer) => {
                debug!("recompute completed");
                let _ = events.send(SchedulerEvent::Completed { record, buffer });
            }
            None => {
                debug!("recompute superseded");
                let _ = events.send(SchedulerEvent::Superseded { record });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    fn setup() -> (
        Scheduler,
        mpsc::Receiver<SchedulerEvent>,
        Arc<Mutex<HistoryManager>>,
        ImageIdent,
    ) {
        let image = ImageIdent::project("test");
        let source = PixelBuffer::filled(8, 8, 4, [128, 128, 128, 255]).unwrap();
        let history = Arc::new(Mutex::new(HistoryManager::new()));
        let (tx, rx) = mpsc::channel();
        let sched = Scheduler::new(image.clone(), source, Arc::clone(&history), tx);
        (sched, rx, history, image)
    }

    fn rec(exposure: f32) -> AdjustmentRecord {
        AdjustmentRecord {
            exposure,
            ..Default::default()
        }
    }

    fn drain_completed(rx: &mpsc::Receiver<SchedulerEvent>) -> Vec<AdjustmentRecord> {
        let mut completed = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_millis(400)) {
            if let SchedulerEvent::Completed { record, .. } = event {
                completed.push(record);
                // Debounce has passed and nothing else is pending; give
                // stragglers a short grace period.
                while let Ok(event) = rx.recv_timeout(Duration::from_millis(150)) {
                    if let SchedulerEvent::Completed { record, .. } = event {
                        completed.push(record);
                    }
                }
                break;
            }
        }
        completed
    }

    #[test]
    fn burst_collapses_to_one_recompute_and_one_history_entry() {
        let (sched, rx, history, image) = setup();

        for i in 1..=5 {
            sched.submit(rec(i as f32 * 10.0));
            std::thread::sleep(Duration::from_millis(2));
        }

        let completed = drain_completed(&rx);
        assert_eq!(completed.len(), 1, "burst must materialize exactly once");
        assert_eq!(completed[0].exposure, 50.0, "latest record wins");

        let history = history.lock().unwrap();
        assert_eq!(history.undo_len(&image), 1, "one undo entry per burst");
    }

    #[test]
    fn current_is_synchronous() {
        let (sched, _rx, _history, _image) = setup();
        sched.submit(rec(33.0));
        assert_eq!(sched.current().exposure, 33.0);
    }

    #[test]
    fn separate_bursts_make_separate_history_entries() {
        let (sched, rx, history, image) = setup();

        sched.submit(rec(10.0));
        assert_eq!(drain_completed(&rx).len(), 1);

        sched.submit(rec(20.0));
        assert_eq!(drain_completed(&rx).len(), 1);

        let history = history.lock().unwrap();
        assert_eq!(history.undo_len(&image), 2);
    }

    #[test]
    fn undo_restores_pre_burst_state() {
        let (sched, rx, _history, _image) = setup();

        sched.submit(rec(40.0));
        assert_eq!(drain_completed(&rx).len(), 1);

        let restored = sched.undo().expect("undo should restore");
        assert_eq!(restored.exposure, 0.0);
        assert_eq!(sched.current().exposure, 0.0);

        // Undo schedules its own recompute
        assert_eq!(drain_completed(&rx).len(), 1);

        let replayed = sched.redo().expect("redo should replay");
        assert_eq!(replayed.exposure, 40.0);
    }

    #[test]
    fn shutdown_joins_cleanly() {
        let (mut sched, _rx, _history, _image) = setup();
        sched.submit(rec(5.0));
        sched.shutdown();
    }

    #[test]
    fn lut_stage_applies_when_set() {
        let (sched, rx, _history, _image) = setup();

        // An inverting LUT makes mid-gray flip; intensity 100 uses the
        // pure LUT color.
        let inverted = {
            let rows = grade_lut::Lut3D::identity(16)
                .rows()
                .iter()
                .map(|rgb| [1.0 - rgb[0], 1.0 - rgb[1], 1.0 - rgb[2]])
                .collect();
            grade_lut::Lut3D::from_rows(rows).unwrap()
        };
        sched.set_lut(Some((inverted, 100.0)));
        sched.submit(rec(0.0001));

        let mut buffers = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_millis(400)) {
            if let SchedulerEvent::Completed { buffer, .. } = event {
                buffers.push(buffer);
                break;
            }
        }
        assert_eq!(buffers.len(), 1);
        // 128 maps near its inverse
        assert!(buffers[0].pixel(0, 0)[0] < 135);
        assert!(buffers[0].pixel(0, 0)[0] > 115);
    }
}
