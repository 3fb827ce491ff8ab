use std::fmt;
use std::rc::Rc;

use basis_core::UnhandledRejection;

use crate::LocalPool;

/// The clock a [`LocalPool`] reads time from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Time only moves when the pool has nothing else to do, jumping
    /// straight to the next timer deadline, or when
    /// [`advance`](LocalPool::advance) is called. Nothing ever sleeps.
    Virtual,
    /// Wall-clock time. The pool sleeps the thread until the next timer.
    #[default]
    System,
}

/// What a [`LocalPool`] does about a rejection nobody was listening to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnhandledPolicy {
    /// Log it at `error` level and keep it for
    /// [`take_unhandled`](LocalPool::take_unhandled).
    #[default]
    Log,
    /// Like `Log`, then panic once the task that caused it returns, like an
    /// uncaught exception would.
    Panic,
}

pub(crate) type UnhandledHook = Rc<dyn Fn(&UnhandledRejection)>;

/// Pool configuration.
///
/// `PoolBuilder` is used to set up a [`LocalPool`] before it is created.
///
/// ```
/// use basis_executor::{Clock, LocalPool, UnhandledPolicy};
///
/// let pool = LocalPool::builder()
///     .clock(Clock::Virtual)
///     .start_time(1_000)
///     .unhandled_rejections(UnhandledPolicy::Panic)
///     .build();
/// assert_eq!(pool.now(), 1_000);
/// ```
#[derive(Clone)]
pub struct PoolBuilder {
    pub(crate) clock: Clock,
    pub(crate) start_time: Option<u64>,
    pub(crate) policy: UnhandledPolicy,
    pub(crate) name: Option<String>,
    pub(crate) on_unhandled: Option<UnhandledHook>,
}

impl fmt::Debug for PoolBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolBuilder")
            .field("clock", &self.clock)
            .field("start_time", &self.start_time)
            .field("policy", &self.policy)
            .field("name", &self.name)
            .field("on_unhandled", &self.on_unhandled.is_some())
            .finish()
    }
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolBuilder {
    /// Create a builder for a system-clock pool that logs unhandled
    /// rejections.
    pub fn new() -> PoolBuilder {
        PoolBuilder {
            clock: Clock::default(),
            start_time: None,
            policy: UnhandledPolicy::default(),
            name: None,
            on_unhandled: None,
        }
    }

    /// Set the clock of the pool.
    pub fn clock(&mut self, clock: Clock) -> &mut Self {
        self.clock = clock;
        self
    }

    /// Set the timestamp, in milliseconds, the pool's clock starts at.
    ///
    /// Defaults to 0 for a virtual clock and to the current Unix time for a
    /// system clock.
    pub fn start_time(&mut self, millis: u64) -> &mut Self {
        self.start_time = Some(millis);
        self
    }

    /// Set what happens to rejections nobody listens to.
    pub fn unhandled_rejections(&mut self, policy: UnhandledPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Set the name the pool logs under.
    pub fn name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Execute `f` for every unhandled rejection, right when it is
    /// reported and before the configured policy applies.
    pub fn on_unhandled<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&UnhandledRejection) + 'static,
    {
        self.on_unhandled = Some(Rc::new(f));
        self
    }

    /// Create a [`LocalPool`] with the configured parameters.
    pub fn build(&mut self) -> LocalPool {
        LocalPool::with_config(self.clone())
    }
}
