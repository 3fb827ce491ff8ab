use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::pin::{pin, Pin};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use basis_core::{Error, Schedule, Spawner, Task, UnhandledRejection};
use tracing::{debug, error, trace, warn};

use crate::builder::{Clock, PoolBuilder, UnhandledHook, UnhandledPolicy};
use crate::timer::{millis_ceil, TimerQueue};
use crate::waker::WakeQueue;

type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

// Wake id of the future driven by `run_until`.
const MAIN: usize = usize::MAX;

enum ClockState {
    Virtual(Cell<u64>),
    System { origin: Instant, epoch: u64 },
}

impl ClockState {
    fn new(clock: Clock, start_time: Option<u64>) -> ClockState {
        match clock {
            Clock::Virtual => ClockState::Virtual(Cell::new(start_time.unwrap_or(0))),
            Clock::System => {
                let epoch = start_time.unwrap_or_else(|| {
                    SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .map_or(0, |since| u64::try_from(since.as_millis()).unwrap_or(u64::MAX))
                });
                ClockState::System { origin: Instant::now(), epoch }
            }
        }
    }

    fn now(&self) -> u64 {
        match self {
            ClockState::Virtual(now) => now.get(),
            ClockState::System { origin, epoch } => {
                epoch.saturating_add(u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX))
            }
        }
    }

    fn is_virtual(&self) -> bool {
        matches!(self, ClockState::Virtual(_))
    }

    // Lets `at` become the present: jumps a virtual clock there, sleeps
    // until then on a system clock. Returns early if a waker fires.
    fn wait_until(&self, at: u64) {
        match self {
            ClockState::Virtual(now) => {
                if at > now.get() {
                    now.set(at);
                }
            }
            ClockState::System { .. } => {
                let now = self.now();
                if at > now {
                    thread::park_timeout(Duration::from_millis(at - now));
                }
            }
        }
    }
}

// State reachable from spawners. The pool owns the only strong reference.
struct Shared {
    name: String,
    ready: RefCell<VecDeque<Task>>,
    timers: RefCell<TimerQueue>,
    clock: ClockState,
    unhandled: RefCell<Vec<UnhandledRejection>>,
    policy: UnhandledPolicy,
    on_unhandled: Option<UnhandledHook>,
    panic_pending: RefCell<Option<UnhandledRejection>>,
}

/// A single-threaded task pool.
///
/// This executor runs the callbacks promises schedule through a
/// [`Spawner`], their timers, and any number of non-`Send` futures, all on
/// the current thread. Tasks run in the order they were queued; nothing
/// runs until one of the `run*` methods is called.
///
/// To get a handle to the pool that promises can be created with, use the
/// [`spawner()`](LocalPool::spawner) method. A handle outliving its pool
/// refuses new work with [`Error::Shutdown`].
///
/// With a [virtual clock](Clock::Virtual) time never passes on its own:
/// whenever the pool runs out of work it jumps straight to the next timer
/// deadline, which makes timing-dependent code deterministic to test.
pub struct LocalPool {
    shared: Rc<Shared>,
    spawner: Spawner,
    futures: RefCell<HashMap<usize, LocalFuture>>,
    next_id: Cell<usize>,
    wake: Arc<WakeQueue>,
    main_woken: Cell<bool>,
}

struct LocalSpawner {
    shared: Weak<Shared>,
}

impl LocalPool {
    /// Create a new, empty pool with a system clock.
    pub fn new() -> LocalPool {
        PoolBuilder::new().build()
    }

    /// Create a [`PoolBuilder`] to configure a pool.
    pub fn builder() -> PoolBuilder {
        PoolBuilder::new()
    }

    pub(crate) fn with_config(config: PoolBuilder) -> LocalPool {
        let shared = Rc::new(Shared {
            name: config.name.unwrap_or_else(|| "basis-local".to_string()),
            ready: RefCell::new(VecDeque::new()),
            timers: RefCell::new(TimerQueue::default()),
            clock: ClockState::new(config.clock, config.start_time),
            unhandled: RefCell::new(Vec::new()),
            policy: config.policy,
            on_unhandled: config.on_unhandled,
            panic_pending: RefCell::new(None),
        });
        let spawner = Spawner::new(LocalSpawner { shared: Rc::downgrade(&shared) });
        LocalPool {
            shared,
            spawner,
            futures: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
            wake: WakeQueue::new(),
            main_woken: Cell::new(false),
        }
    }

    /// Get a clonable handle to the pool. Every call returns a handle to the
    /// same scheduler.
    pub fn spawner(&self) -> Spawner {
        self.spawner.clone()
    }

    /// The pool's current timestamp in milliseconds.
    pub fn now(&self) -> u64 {
        self.shared.clock.now()
    }

    /// Spawn a future onto the pool. It is first polled on the next run.
    pub fn spawn_local<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.futures.borrow_mut().insert(id, Box::pin(future));
        self.wake.push(id);
    }

    /// Removes and returns the rejections reported as unhandled so far.
    pub fn take_unhandled(&self) -> Vec<UnhandledRejection> {
        self.shared.unhandled.take()
    }

    /// Runs every task that is ready without letting time pass, including
    /// the ones queued while doing so. Timers already due are fired.
    ///
    /// Returns the number of tasks that ran.
    pub fn run_until_stalled(&mut self) -> usize {
        let ran = self.run_ready();
        trace!(pool = %self.shared.name, ran, "pool stalled");
        ran
    }

    /// Run all tasks in the pool to completion, including timers and any
    /// newly queued tasks.
    ///
    /// With a virtual clock this returns once nothing is left that could
    /// ever run; spawned futures still waiting on a waker are left in the
    /// pool. With a system clock the function blocks the calling thread
    /// until every spawned future has completed too.
    pub fn run(&mut self) {
        let mut ran = 0;
        loop {
            ran += self.run_ready();
            if self.wait_for_timer() {
                continue;
            }
            if !self.shared.clock.is_virtual() && !self.futures.borrow().is_empty() {
                thread::park();
                continue;
            }
            break;
        }
        debug!(pool = %self.shared.name, ran, now = self.now(), "pool ran to completion");
    }

    /// Runs all the tasks in the pool until the given future completes, and
    /// returns its output.
    ///
    /// Other tasks and spawned futures make progress while this runs, and
    /// whatever is left over stays in the pool for a later run. With a
    /// virtual clock, `None` is returned if the pool runs out of work before
    /// `future` completes. With a system clock the calling thread blocks
    /// until it does.
    pub fn run_until<F: Future>(&mut self, future: F) -> Option<F::Output> {
        let mut future = pin!(future);
        let waker = self.wake.waker(MAIN);
        let mut cx = Context::from_waker(&waker);
        self.main_woken.set(true);
        loop {
            if self.main_woken.replace(false) {
                if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                    return Some(output);
                }
            }
            self.run_ready();
            if self.main_woken.get() || self.wait_for_timer() {
                continue;
            }
            if self.shared.clock.is_virtual() {
                debug!(pool = %self.shared.name, "pool stalled before the future completed");
                return None;
            }
            thread::park();
        }
    }

    /// Lets `dur` pass on the pool's clock, firing every timer that comes
    /// due along the way in deadline order and running whatever they queue.
    ///
    /// A virtual clock jumps from deadline to deadline and ends up exactly
    /// `dur` later. A system clock sleeps.
    pub fn advance(&mut self, dur: Duration) {
        let target = self.now().saturating_add(millis_ceil(dur));
        debug!(pool = %self.shared.name, from = self.now(), to = target, "advancing clock");
        loop {
            self.run_ready();
            let next = self.shared.timers.borrow().next_deadline();
            match next {
                Some(deadline) if deadline <= target => self.shared.clock.wait_until(deadline),
                _ => break,
            }
        }
        while self.now() < target {
            self.shared.clock.wait_until(target);
        }
        self.run_ready();
    }

    // Runs ready tasks, due timers and woken futures until none are left.
    fn run_ready(&mut self) -> usize {
        let mut ran = 0;
        loop {
            self.fire_due_timers();
            self.poll_woken();
            let task = self.shared.ready.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                    self.check_unhandled_panic();
                }
                None if self.wake.is_empty() => return ran,
                None => {}
            }
        }
    }

    // Moves the earliest timer's deadline into the present. Returns `false`
    // if there are no timers.
    fn wait_for_timer(&self) -> bool {
        let next = self.shared.timers.borrow().next_deadline();
        match next {
            Some(deadline) => {
                trace!(pool = %self.shared.name, deadline, "waiting for timer");
                self.shared.clock.wait_until(deadline);
                true
            }
            None => false,
        }
    }

    fn fire_due_timers(&self) {
        let now = self.now();
        let mut fired = 0;
        loop {
            let task = self.shared.timers.borrow_mut().pop_due(now);
            match task {
                Some(task) => self.shared.ready.borrow_mut().push_back(task),
                None => break,
            }
            fired += 1;
        }
        if fired > 0 {
            debug!(pool = %self.shared.name, fired, now, "timers fired");
        }
    }

    fn poll_woken(&self) {
        while let Some(id) = self.wake.pop() {
            if id == MAIN {
                self.main_woken.set(true);
                continue;
            }
            // Taken out while polling, so that the future may spawn more.
            let future = self.futures.borrow_mut().remove(&id);
            let Some(mut future) = future else { continue };
            let waker = self.wake.waker(id);
            let mut cx = Context::from_waker(&waker);
            if future.as_mut().poll(&mut cx).is_pending() {
                self.futures.borrow_mut().insert(id, future);
            }
            self.check_unhandled_panic();
        }
    }

    fn check_unhandled_panic(&self) {
        if let Some(rejection) = self.shared.panic_pending.take() {
            panic!("{}", rejection);
        }
    }
}

impl Default for LocalPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LocalPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPool")
            .field("name", &self.shared.name)
            .field("now", &self.now())
            .field("ready", &self.shared.ready.borrow().len())
            .field("timers", &self.shared.timers.borrow().len())
            .field("futures", &self.futures.borrow().len())
            .finish()
    }
}

impl Schedule for LocalSpawner {
    fn schedule(&self, task: Task) -> Result<(), Error> {
        let shared = self.shared.upgrade().ok_or(Error::Shutdown)?;
        shared.ready.borrow_mut().push_back(task);
        Ok(())
    }

    fn schedule_after(&self, delay: Duration, task: Task) -> Result<(), Error> {
        let shared = self.shared.upgrade().ok_or(Error::Shutdown)?;
        let deadline = shared.clock.now().saturating_add(millis_ceil(delay));
        shared.timers.borrow_mut().push(deadline, task);
        Ok(())
    }

    fn now(&self) -> u64 {
        self.shared.upgrade().map_or(0, |shared| shared.clock.now())
    }

    fn report_unhandled(&self, rejection: UnhandledRejection) {
        let Some(shared) = self.shared.upgrade() else {
            warn!(%rejection, "unhandled rejection after pool shutdown");
            return;
        };
        if let Some(hook) = &shared.on_unhandled {
            hook(&rejection);
        }
        error!(pool = %shared.name, at = rejection.at(), reason = rejection.reason(), "unhandled promise rejection");
        if shared.policy == UnhandledPolicy::Panic {
            let mut pending = shared.panic_pending.borrow_mut();
            if pending.is_none() {
                *pending = Some(rejection.clone());
            }
        }
        shared.unhandled.borrow_mut().push(rejection);
    }
}

impl fmt::Debug for LocalSpawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSpawner").field("alive", &(self.shared.strong_count() > 0)).finish()
    }
}

/// Run a future to completion on the current thread.
///
/// This function will block the caller until the given future has completed.
/// Promises the future waits on must be created with a spawner of a pool
/// that is being run; use [`LocalPool::run_until`] for that.
pub fn block_on<F: Future>(future: F) -> F::Output {
    let mut pool = LocalPool::new();
    let mut future = pin!(future);
    loop {
        if let Some(output) = pool.run_until(future.as_mut()) {
            return output;
        }
    }
}
