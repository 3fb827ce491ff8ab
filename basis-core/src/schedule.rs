//! The scheduling port.
//!
//! Promises never run their callbacks on the stack of the call that settled
//! them. Instead every callback becomes a [`Task`] handed to a [`Schedule`]
//! implementation, which runs it on a later turn. Executors (see
//! `basis-executor`) implement this trait; tests typically use one with a
//! virtual clock so that timers fire without real waiting.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{Error, UnhandledRejection};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + 'static>;

/// A single-threaded cooperative scheduler.
pub trait Schedule {
    /// Queues `task` to run on a later turn. Tasks queued from the same turn
    /// run in the order they were queued.
    fn schedule(&self, task: Task) -> Result<(), Error>;

    /// Queues `task` to run once at least `delay` has elapsed on the
    /// scheduler's clock. Timers with equal deadlines run in the order they
    /// were queued.
    fn schedule_after(&self, delay: Duration, task: Task) -> Result<(), Error>;

    /// The scheduler's current timestamp in milliseconds.
    fn now(&self) -> u64;

    /// Top-level error channel for rejections nobody was listening to.
    fn report_unhandled(&self, rejection: UnhandledRejection);
}

impl<S: ?Sized + Schedule> Schedule for Rc<S> {
    fn schedule(&self, task: Task) -> Result<(), Error> {
        (**self).schedule(task)
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> Result<(), Error> {
        (**self).schedule_after(delay, task)
    }

    fn now(&self) -> u64 {
        (**self).now()
    }

    fn report_unhandled(&self, rejection: UnhandledRejection) {
        (**self).report_unhandled(rejection)
    }
}

/// A cloneable, type-erased handle to a [`Schedule`].
///
/// Every promise keeps the spawner it was created with, and derived promises
/// inherit it.
#[derive(Clone)]
pub struct Spawner {
    inner: Rc<dyn Schedule>,
}

impl Spawner {
    /// Wraps a scheduler.
    pub fn new<S: Schedule + 'static>(schedule: S) -> Spawner {
        Spawner { inner: Rc::new(schedule) }
    }

    /// Queues a closure to run on a later turn.
    pub fn spawn_fn<F: FnOnce() + 'static>(&self, f: F) -> Result<(), Error> {
        self.inner.schedule(Box::new(f))
    }

    /// Returns `true` if both handles point at the same scheduler.
    pub fn ptr_eq(&self, other: &Spawner) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Schedule for Spawner {
    fn schedule(&self, task: Task) -> Result<(), Error> {
        self.inner.schedule(task)
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> Result<(), Error> {
        self.inner.schedule_after(delay, task)
    }

    fn now(&self) -> u64 {
        self.inner.now()
    }

    fn report_unhandled(&self, rejection: UnhandledRejection) {
        self.inner.report_unhandled(rejection)
    }
}

impl fmt::Debug for Spawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spawner").field("now", &self.inner.now()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Fifo {
        tasks: RefCell<VecDeque<Task>>,
        reported: RefCell<Vec<UnhandledRejection>>,
    }

    impl Schedule for Fifo {
        fn schedule(&self, task: Task) -> Result<(), Error> {
            self.tasks.borrow_mut().push_back(task);
            Ok(())
        }

        fn schedule_after(&self, _delay: Duration, task: Task) -> Result<(), Error> {
            self.schedule(task)
        }

        fn now(&self) -> u64 {
            0
        }

        fn report_unhandled(&self, rejection: UnhandledRejection) {
            self.reported.borrow_mut().push(rejection);
        }
    }

    #[test]
    fn spawner_forwards_to_schedule() {
        let fifo = Rc::new(Fifo::default());
        let spawner = Spawner::new(fifo.clone());
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            spawner.spawn_fn(move || log.borrow_mut().push(i)).unwrap();
        }
        assert!(log.borrow().is_empty());
        loop {
            let task = fifo.tasks.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        assert_eq!(*log.borrow(), [0, 1, 2]);

        spawner.report_unhandled(UnhandledRejection::new("x", 0));
        assert_eq!(fifo.reported.borrow().len(), 1);
        assert!(spawner.ptr_eq(&spawner.clone()));
    }
}
