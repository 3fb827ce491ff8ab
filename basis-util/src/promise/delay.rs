use std::cmp;
use std::fmt::Debug;
use std::time::Duration;

use basis_core::{Schedule, Spawner};
use tracing::warn;

use super::Promise;

/// The shortest wait [`delay`] will schedule.
pub const MIN_DELAY: Duration = Duration::from_millis(10);

/// Creates a promise resolved with `value` once at least `dur` (and never
/// less than [`MIN_DELAY`]) has elapsed on the spawner's clock.
///
/// If the scheduler has already shut down the promise stays pending.
pub fn delay<T, E>(spawner: &Spawner, dur: Duration, value: T) -> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    let result = Promise::new(spawner);
    let target = result.clone();
    let dur = cmp::max(dur, MIN_DELAY);
    if let Err(err) = spawner.schedule_after(
        dur,
        Box::new(move || {
            target.resolve(value);
        }),
    ) {
        warn!(%err, ?dur, "dropping delay timer");
    }
    result
}

/// [`delay`] resolving with the timestamp, in milliseconds, at which it was
/// called.
pub fn delay_now<E>(spawner: &Spawner, dur: Duration) -> Promise<u64, E>
where
    E: Clone + Debug + 'static,
{
    delay(spawner, dur, spawner.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_executor::{Clock, LocalPool};

    #[test]
    fn waits_at_least_the_minimum() {
        let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
        let p = delay::<_, ()>(&pool.spawner(), Duration::ZERO, "tick");
        pool.advance(Duration::from_millis(9));
        assert!(p.is_pending());
        pool.advance(Duration::from_millis(1));
        assert_eq!(p.value(), Some("tick"));
    }

    #[test]
    fn delay_now_resolves_with_the_start_time() {
        let mut pool = LocalPool::builder().clock(Clock::Virtual).start_time(1_000).build();
        let p = delay_now::<()>(&pool.spawner(), Duration::from_millis(50));
        pool.run();
        assert_eq!(pool.now(), 1_050);
        assert_eq!(p.value(), Some(1_000));
    }
}
