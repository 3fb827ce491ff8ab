//! Utilities to make testing promises and sequences easier.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use basis_core::Spawner;
use basis_executor::{Clock, LocalPool, UnhandledPolicy};
use basis_util::promise::Promise;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[doc(hidden)]
pub mod __private {
    pub use basis_util::promise::State;
}

/// Installs a `tracing` subscriber that writes through the test harness,
/// filtered by `RUST_LOG`. Calling it more than once is harmless.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A pool on a virtual clock starting at 0, so that timers fire as soon as
/// the pool runs out of other work.
pub fn virtual_pool() -> LocalPool {
    init_test_logging();
    LocalPool::builder().clock(Clock::Virtual).name("test").build()
}

/// Like [`virtual_pool`], but panics on the first unhandled rejection.
pub fn strict_pool() -> LocalPool {
    init_test_logging();
    LocalPool::builder()
        .clock(Clock::Virtual)
        .name("test-strict")
        .unhandled_rejections(UnhandledPolicy::Panic)
        .build()
}

/// A promise rejected with `reason` through the regular transition, with a
/// no-op failure callback registered first so that it is not reported as
/// unhandled.
pub fn rejected_handled<T, E>(spawner: &Spawner, reason: E) -> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + fmt::Debug + 'static,
{
    let promise = Promise::new(spawner);
    promise.fail(|_| {}).reject(reason);
    promise
}

/// A deterministic random source for sampling tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Collects the values callbacks are invoked with, in call order.
///
/// # Examples
///
/// ```
/// use basis_test::Recorder;
///
/// let recorder = Recorder::new();
/// let record = recorder.sink();
/// record(1);
/// recorder.push(2);
/// assert_eq!(recorder.take(), [1, 2]);
/// assert!(recorder.is_empty());
/// ```
pub struct Recorder<T> {
    log: Rc<RefCell<Vec<T>>>,
}

impl<T> Recorder<T> {
    /// An empty recorder.
    pub fn new() -> Self {
        Recorder { log: Rc::new(RefCell::new(Vec::new())) }
    }

    /// Records `value`.
    pub fn push(&self, value: T) {
        self.log.borrow_mut().push(value);
    }

    /// A callback recording its argument.
    pub fn sink(&self) -> impl Fn(T) + 'static
    where
        T: 'static,
    {
        let log = self.log.clone();
        move |value| log.borrow_mut().push(value)
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<T> {
        self.log.take()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Number of recorded values.
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }
}

impl<T: Clone> Recorder<T> {
    /// A copy of everything recorded so far.
    pub fn values(&self) -> Vec<T> {
        self.log.borrow().clone()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Recorder { log: self.log.clone() }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Recorder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Recorder").field(&self.log.borrow()).finish()
    }
}

/// Assert that the promise is resolved, optionally with the given value.
#[macro_export]
macro_rules! assert_resolved {
    ($promise:expr) => {{
        let state = $promise.state();
        if state != $crate::__private::State::Resolved {
            panic!("assertion failed: expected a resolved promise, got a {} one", state);
        }
    }};
    ($promise:expr, $value:expr) => {{
        $crate::assert_resolved!($promise);
        assert_eq!($promise.value(), Some($value));
    }};
}

/// Assert that the promise is rejected, optionally with the given reason.
#[macro_export]
macro_rules! assert_rejected {
    ($promise:expr) => {{
        let state = $promise.state();
        if state != $crate::__private::State::Rejected {
            panic!("assertion failed: expected a rejected promise, got a {} one", state);
        }
    }};
    ($promise:expr, $reason:expr) => {{
        $crate::assert_rejected!($promise);
        assert_eq!($promise.reason(), Some($reason));
    }};
}

/// Assert that the promise is cancelled, optionally with the given reason.
#[macro_export]
macro_rules! assert_cancelled {
    ($promise:expr) => {{
        let state = $promise.state();
        if state != $crate::__private::State::Cancelled {
            panic!("assertion failed: expected a cancelled promise, got a {} one", state);
        }
    }};
    ($promise:expr, $reason:expr) => {{
        $crate::assert_cancelled!($promise);
        assert_eq!($promise.reason(), Some($reason));
    }};
}

/// Assert that the promise has not settled yet.
#[macro_export]
macro_rules! assert_pending {
    ($promise:expr) => {{
        let state = $promise.state();
        if state != $crate::__private::State::Pending {
            panic!("assertion failed: expected a pending promise, got a {} one", state);
        }
    }};
}
