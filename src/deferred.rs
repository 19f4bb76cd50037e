//! # Deferred Module
//!
//! Scheduling capability for UI bindings that re-render on router events.
//! A binding that updates synchronously from inside a `push` listener can
//! trigger another `push` and recurse without bound; deferring the update onto
//! the next tick, and cancelling any update still pending, breaks the cycle.
//! The router itself never schedules anything.
//!
//! - [`Scheduler`] is the injected capability (`schedule`/`cancel`).
//! - [`ManualScheduler`] queues callbacks until [`ManualScheduler::run_pending`].
//! - [`DeferredUpdate`] keeps at most one pending task per binding.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::trace;

/// Handle of a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Runs callbacks at some later point on the same thread
pub trait Scheduler {
    /// Queue `callback`; returns a handle that can cancel it
    fn schedule(&self, callback: Box<dyn FnOnce()>) -> TaskId;

    /// Cancel a task that has not run yet; returns whether it was pending
    fn cancel(&self, task: TaskId) -> bool;
}

/// Scheduler driven explicitly by its owner
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    queue: RefCell<Vec<(TaskId, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued callbacks
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every callback queued so far; returns how many ran
    ///
    /// Callbacks scheduled while running wait for the next call.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, callback: Box<dyn FnOnce()>) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push((id, callback));
        id
    }

    fn cancel(&self, task: TaskId) -> bool {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|(id, _)| *id != task);
        queue.len() != before
    }
}

/// Debounced update: scheduling replaces whatever is still pending
pub struct DeferredUpdate {
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<Option<TaskId>>>,
}

impl DeferredUpdate {
    #[must_use]
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Cancel the pending update, if any, and schedule `update`
    pub fn request(&self, update: impl FnOnce() + 'static) {
        if let Some(task) = self.pending.take() {
            let cancelled = self.scheduler.cancel(task);
            trace!(cancelled, "Superseded pending deferred update");
        }
        let pending = Rc::clone(&self.pending);
        let task = self.scheduler.schedule(Box::new(move || {
            pending.set(None);
            update();
        }));
        self.pending.set(Some(task));
    }

    /// Whether an update is waiting to run
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Drop the pending update without running it
    pub fn cancel(&self) {
        if let Some(task) = self.pending.take() {
            self.scheduler.cancel(task);
        }
    }
}
