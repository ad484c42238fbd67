//! FIFO deferred-execution queue
//!
//! Models the "run after the current synchronous execution" turn: `defer`
//! only enqueues, never runs anything in the calling turn, and the host
//! drains the queue once its own work is done. Tasks run in the order they
//! were scheduled; a task scheduled while draining runs in the same drain,
//! after everything queued before it. There is no cancellation and no
//! timeout.

use std::collections::VecDeque;

use parking_lot::Mutex;

type Task = Box<dyn FnOnce() + Send>;

/// FIFO queue of single-shot deferred tasks
///
/// # Example
///
/// ```
/// use lodestore_live::DeferQueue;
///
/// let queue = DeferQueue::new();
/// queue.defer(|| println!("runs later"));
/// assert_eq!(queue.pending(), 1);
/// queue.run_until_idle();
/// ```
#[derive(Default)]
pub struct DeferQueue {
    tasks: Mutex<VecDeque<Task>>,
}

impl DeferQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `task` to run in a strictly later turn
    ///
    /// Never runs the task synchronously, even when the queue is empty.
    pub fn defer(&self, task: impl FnOnce() + Send + 'static) {
        self.tasks.lock().push_back(Box::new(task));
    }

    /// Number of tasks currently queued
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run queued tasks in FIFO order until none remain
    ///
    /// Tasks scheduled by running tasks are picked up in the same drain.
    /// The lock is not held while a task runs, so tasks may re-enter the
    /// queue freely. Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.tasks.lock().pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}
