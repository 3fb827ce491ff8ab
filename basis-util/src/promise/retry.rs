use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use basis_core::Spawner;
use tracing::debug;

use super::{delay, invoke, Awaitable, Promise};

/// How [`retrying`] spaces out its attempts.
///
/// The first retry waits `delay`; each later one waits `factor` times longer
/// than the one before, never more than `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    times: u32,
    delay: Duration,
    factor: f64,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            times: 10,
            delay: Duration::from_millis(100),
            factor: 2.0,
            max_delay: Duration::from_secs(300),
        }
    }
}

impl RetryPolicy {
    /// Creates the default policy: 10 attempts, starting at 100ms, doubling
    /// up to 5 minutes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of attempts. At least one attempt is always
    /// made.
    pub fn times(mut self, times: u32) -> Self {
        self.times = times;
        self
    }

    /// Sets the wait before the first retry.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the growth factor between consecutive waits.
    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the longest wait between two attempts.
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    fn first_delay(&self) -> Duration {
        self.delay.min(self.max_delay)
    }

    fn next_delay(&self, wait: Duration) -> Duration {
        Duration::try_from_secs_f64(wait.as_secs_f64() * self.factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

fn attempt<F, A>(
    spawner: Spawner,
    f: Rc<RefCell<F>>,
    left: u32,
    wait: Duration,
    policy: RetryPolicy,
) -> Promise<A::Ok, A::Err>
where
    F: FnMut() -> A + 'static,
    A: Awaitable + 'static,
{
    let tried = invoke(&spawner, || {
        let mut f = f.borrow_mut();
        (*f)()
    });
    if left <= 1 {
        return tried;
    }

    tried.or_else(move |reason| {
        debug!(?reason, ?wait, left = left - 1, "attempt failed, retrying");
        let next = policy.next_delay(wait);
        let again = spawner.clone();
        delay::<(), A::Err>(&spawner, wait, ()).then(move |()| attempt(again, f, left - 1, next, policy))
    })
}

/// Calls `f` until the promise it returns resolves, at most as many times
/// as `policy` allows, waiting between attempts.
///
/// Once the attempts are exhausted the last rejection is passed on.
/// Cancellation of an attempt is passed on right away.
pub fn retrying<F, A>(spawner: &Spawner, policy: RetryPolicy, f: F) -> Promise<A::Ok, A::Err>
where
    F: FnMut() -> A + 'static,
    A: Awaitable + 'static,
{
    let wait = policy.first_delay();
    attempt(spawner.clone(), Rc::new(RefCell::new(f)), policy.times.max(1), wait, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_up_to_the_cap() {
        let policy = RetryPolicy::new()
            .delay(Duration::from_millis(100))
            .factor(3.0)
            .max_delay(Duration::from_millis(500));
        let first = policy.first_delay();
        let second = policy.next_delay(first);
        let third = policy.next_delay(second);
        assert_eq!(first, Duration::from_millis(100));
        assert_eq!(second, Duration::from_millis(300));
        assert_eq!(third, Duration::from_millis(500));
    }

    #[test]
    fn nonsense_factor_falls_back_to_the_cap() {
        let policy = RetryPolicy::new().factor(-1.0).max_delay(Duration::from_secs(1));
        assert_eq!(policy.next_delay(Duration::from_millis(100)), Duration::from_secs(1));
    }
}
