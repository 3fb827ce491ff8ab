use std::fmt::Debug;

use basis_core::Spawner;

use super::Promise;

/// A value that can stand for a [`Promise`].
///
/// Continuations passed to [`Promise::then`] and the elements handed to the
/// aggregate combinators are `Awaitable`. A promise stands for itself, so a
/// continuation returning a promise makes the derived promise follow it; a
/// `Result` stands for a promise that is already settled.
pub trait Awaitable {
    /// The resolution value.
    type Ok: Clone + 'static;
    /// The rejection and cancellation payload.
    type Err: Clone + Debug + 'static;

    /// Returns the promise representing `self`.
    fn into_promise(self, spawner: &Spawner) -> Promise<Self::Ok, Self::Err>;

    /// Makes `target` settle the way `self` does.
    fn settle(self, target: &Promise<Self::Ok, Self::Err>)
    where
        Self: Sized,
    {
        let promise = self.into_promise(target.spawner());
        target.bind(&promise);
    }
}

impl<T, E> Awaitable for Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    type Ok = T;
    type Err = E;

    fn into_promise(self, _: &Spawner) -> Promise<T, E> {
        self
    }
}

impl<T, E> Awaitable for &Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    type Ok = T;
    type Err = E;

    fn into_promise(self, _: &Spawner) -> Promise<T, E> {
        self.clone()
    }
}

impl<T, E> Awaitable for Result<T, E>
where
    T: Clone + 'static,
    E: Clone + Debug + 'static,
{
    type Ok = T;
    type Err = E;

    fn into_promise(self, spawner: &Spawner) -> Promise<T, E> {
        match self {
            Ok(value) => Promise::resolved(spawner, value),
            Err(reason) => Promise::rejected(spawner, reason),
        }
    }

    fn settle(self, target: &Promise<T, E>) {
        match self {
            Ok(value) => target.resolve(value),
            Err(reason) => target.reject(reason),
        };
    }
}

/// Coerces `x` into a promise.
///
/// A promise comes back unchanged (the very same promise, see
/// [`Promise::ptr_eq`]); a `Result` becomes an already settled promise.
pub fn when<A: Awaitable>(spawner: &Spawner, x: A) -> Promise<A::Ok, A::Err> {
    x.into_promise(spawner)
}

/// Calls `f` and coerces what it returns into a promise.
///
/// An `Err` returned by `f` becomes an already rejected promise; nothing
/// `f` reports ever escapes to the caller.
pub fn invoke<F, A>(spawner: &Spawner, f: F) -> Promise<A::Ok, A::Err>
where
    F: FnOnce() -> A,
    A: Awaitable,
{
    when(spawner, f())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_executor::{Clock, LocalPool};

    #[test]
    fn when_returns_promises_unchanged() {
        let pool = LocalPool::builder().clock(Clock::Virtual).build();
        let spawner = pool.spawner();
        let p = when(&spawner, Ok::<_, ()>(1));
        assert!(when(&spawner, p.clone()).ptr_eq(&p));
        assert!(when(&spawner, &p).ptr_eq(&p));
    }

    #[test]
    fn invoke_turns_errors_into_rejections() {
        let pool = LocalPool::builder().clock(Clock::Virtual).build();
        let spawner = pool.spawner();
        let p = invoke(&spawner, || "x".parse::<i32>().map_err(|e| e.to_string()));
        assert!(p.is_rejected());
        assert!(pool_is_quiet(&pool));
    }

    fn pool_is_quiet(pool: &LocalPool) -> bool {
        pool.take_unhandled().is_empty()
    }
}
