use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::mem;
use std::rc::Rc;

use basis_core::{Schedule, Spawner, Task, UnhandledRejection};
use thiserror::Error;
use tracing::{trace, warn};

use super::Awaitable;

/// The lifecycle of a [`Promise`].
///
/// `Pending` is the only non-terminal state; a promise leaves it at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The computation has not finished.
    Pending,
    /// The computation finished successfully.
    Resolved,
    /// The computation failed.
    Rejected,
    /// The computation was aborted.
    Cancelled,
}

impl State {
    /// Returns `true` for every state but `Pending`.
    pub fn is_settled(self) -> bool {
        self != State::Pending
    }

    fn as_str(self) -> &'static str {
        match self {
            State::Pending => "pending",
            State::Resolved => "resolved",
            State::Rejected => "rejected",
            State::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The failure side of awaiting a [`Promise`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection<E> {
    /// The promise was rejected with this reason.
    #[error("promise rejected: {0:?}")]
    Rejected(E),
    /// The promise was cancelled with this reason.
    #[error("promise cancelled: {0:?}")]
    Cancelled(E),
}

impl<E> Rejection<E> {
    /// The payload, whichever way the promise failed.
    pub fn into_inner(self) -> E {
        match self {
            Rejection::Rejected(e) | Rejection::Cancelled(e) => e,
        }
    }

    /// Returns `true` for a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Rejection::Cancelled(_))
    }
}

type Callback<V> = Box<dyn FnOnce(V)>;

struct Callbacks<T, E> {
    resolved: Vec<Callback<T>>,
    rejected: Vec<Callback<E>>,
    cancelled: Vec<Callback<E>>,
}

impl<T, E> Default for Callbacks<T, E> {
    fn default() -> Self {
        Callbacks { resolved: Vec::new(), rejected: Vec::new(), cancelled: Vec::new() }
    }
}

enum Slot<T, E> {
    Pending(Callbacks<T, E>),
    Resolved(T),
    Rejected(E),
    Cancelled(E),
}

impl<T, E> Slot<T, E> {
    fn state(&self) -> State {
        match self {
            Slot::Pending(_) => State::Pending,
            Slot::Resolved(_) => State::Resolved,
            Slot::Rejected(_) => State::Rejected,
            Slot::Cancelled(_) => State::Cancelled,
        }
    }
}

struct Inner<T, E> {
    slot: Slot<T, E>,
    // Set once anything listens for a rejection: a `fail` callback or a task
    // awaiting the promise.
    handled: bool,
    wakers: Vec<Waker>,
}

/// A single-assignment container for a value that becomes available later,
/// or for the reason it never will.
///
/// A promise starts [`Pending`](State::Pending) and is settled by its
/// producer exactly once through [`resolve`](Promise::resolve),
/// [`reject`](Promise::reject) or [`cancel`](Promise::cancel); every later
/// attempt is ignored. Consumers register callbacks with
/// [`done`](Promise::done), [`fail`](Promise::fail) and
/// [`on_cancel`](Promise::on_cancel), or derive new promises with
/// [`then`](Promise::then).
///
/// Callbacks never run inside the call that triggered them: each one is
/// queued on the promise's [`Spawner`] and runs on a later turn, in
/// registration order. Callbacks registered after settlement run (later) if
/// they match the final state and are dropped otherwise.
///
/// `Promise` is a cheap handle: clones refer to the same state.
pub struct Promise<T, E> {
    inner: Rc<RefCell<Inner<T, E>>>,
    spawner: Spawner,
}

impl<T, E> Clone for Promise<T, E> {
    fn clone(&self) -> Self {
        Promise { inner: self.inner.clone(), spawner: self.spawner.clone() }
    }
}

impl<T, E> Promise<T, E> {
    fn with_slot(spawner: &Spawner, slot: Slot<T, E>) -> Self {
        Promise {
            inner: Rc::new(RefCell::new(Inner { slot, handled: false, wakers: Vec::new() })),
            spawner: spawner.clone(),
        }
    }

    /// Creates a pending promise whose callbacks run on `spawner`.
    pub fn new(spawner: &Spawner) -> Self {
        Self::with_slot(spawner, Slot::Pending(Callbacks::default()))
    }

    /// Creates a promise already resolved with `value`.
    pub fn resolved(spawner: &Spawner, value: T) -> Self {
        Self::with_slot(spawner, Slot::Resolved(value))
    }

    /// Creates a promise already rejected with `reason`.
    ///
    /// Unlike [`reject`](Promise::reject), this is never reported as an
    /// unhandled rejection: nobody could have listened before it existed.
    pub fn rejected(spawner: &Spawner, reason: E) -> Self {
        Self::with_slot(spawner, Slot::Rejected(reason))
    }

    /// Creates a promise already cancelled with `reason`.
    pub fn cancelled(spawner: &Spawner, reason: E) -> Self {
        Self::with_slot(spawner, Slot::Cancelled(reason))
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.inner.borrow().slot.state()
    }

    /// Returns `true` while the promise has not been settled.
    pub fn is_pending(&self) -> bool {
        self.state() == State::Pending
    }

    /// Returns `true` if the promise was resolved.
    pub fn is_resolved(&self) -> bool {
        self.state() == State::Resolved
    }

    /// Returns `true` if the promise was rejected.
    pub fn is_rejected(&self) -> bool {
        self.state() == State::Rejected
    }

    /// Returns `true` if the promise was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.state() == State::Cancelled
    }

    /// Returns `true` if both handles refer to the same promise.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The spawner this promise dispatches its callbacks on.
    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    fn dispatch(&self, task: Task) {
        trace!(promise = ?Rc::as_ptr(&self.inner), "scheduling callback");
        if let Err(err) = self.spawner.schedule(task) {
            warn!(%err, "dropping promise callback");
        }
    }
}

impl<T: Clone, E: Clone> Promise<T, E> {
    /// The resolution value, if resolved.
    pub fn value(&self) -> Option<T> {
        match &self.inner.borrow().slot {
            Slot::Resolved(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// The rejection or cancellation reason, if any.
    pub fn reason(&self) -> Option<E> {
        match &self.inner.borrow().slot {
            Slot::Rejected(reason) | Slot::Cancelled(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

impl<T, E> Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + fmt::Debug + 'static,
{
    /// Settles the promise as resolved, queueing its `done` callbacks.
    /// Ignored unless the promise is pending.
    pub fn resolve(&self, value: T) -> &Self {
        self.complete(Slot::Resolved(value));
        self
    }

    /// Settles the promise as rejected, queueing its `fail` callbacks.
    /// Ignored unless the promise is pending.
    ///
    /// If nothing is listening for the rejection at this moment (no `fail`
    /// callback and no task awaiting the promise) the rejection is reported
    /// to the spawner's [`report_unhandled`](Schedule::report_unhandled).
    pub fn reject(&self, reason: E) -> &Self {
        let rendered = format!("{:?}", reason);
        if let Some(false) = self.complete(Slot::Rejected(reason)) {
            self.spawner
                .report_unhandled(UnhandledRejection::new(rendered, self.spawner.now()));
        }
        self
    }

    /// Settles the promise as cancelled, queueing its cancellation callbacks
    /// and dropping every `done` and `fail` callback. Ignored unless the
    /// promise is pending.
    pub fn cancel(&self, reason: E) -> &Self {
        self.complete(Slot::Cancelled(reason));
        self
    }

    // Performs the one state transition, if still pending. Returns whether
    // anything was listening for a rejection, or `None` if the promise had
    // already been settled.
    fn complete(&self, completion: Slot<T, E>) -> Option<bool> {
        let (callbacks, wakers, handled) = {
            let mut inner = self.inner.borrow_mut();
            let callbacks = match &mut inner.slot {
                Slot::Pending(callbacks) => mem::take(callbacks),
                _ => return None,
            };
            let handled = inner.handled || !callbacks.rejected.is_empty();
            inner.slot = completion;
            (callbacks, mem::take(&mut inner.wakers), handled)
        };

        let state = self.state();
        trace!(promise = ?Rc::as_ptr(&self.inner), %state, "promise settled");

        match &self.inner.borrow().slot {
            Slot::Resolved(value) => self.dispatch_all(callbacks.resolved, value),
            Slot::Rejected(reason) => self.dispatch_all(callbacks.rejected, reason),
            Slot::Cancelled(reason) => self.dispatch_all(callbacks.cancelled, reason),
            Slot::Pending(_) => {}
        }
        for waker in wakers {
            waker.wake();
        }
        Some(handled)
    }

    fn dispatch_all<V: Clone + 'static>(&self, callbacks: Vec<Callback<V>>, payload: &V) {
        for callback in callbacks {
            let payload = payload.clone();
            self.dispatch(Box::new(move || callback(payload)));
        }
    }

    /// Registers a callback for when the promise resolves.
    pub fn done<F>(&self, f: F) -> &Self
    where
        F: FnOnce(T) + 'static,
    {
        let value = {
            let mut inner = self.inner.borrow_mut();
            match &mut inner.slot {
                Slot::Pending(callbacks) => {
                    callbacks.resolved.push(Box::new(f));
                    return self;
                }
                Slot::Resolved(value) => value.clone(),
                _ => return self,
            }
        };
        self.dispatch(Box::new(move || f(value)));
        self
    }

    /// Registers a callback for when the promise is rejected.
    pub fn fail<F>(&self, f: F) -> &Self
    where
        F: FnOnce(E) + 'static,
    {
        let reason = {
            let mut inner = self.inner.borrow_mut();
            inner.handled = true;
            match &mut inner.slot {
                Slot::Pending(callbacks) => {
                    callbacks.rejected.push(Box::new(f));
                    return self;
                }
                Slot::Rejected(reason) => reason.clone(),
                _ => return self,
            }
        };
        self.dispatch(Box::new(move || f(reason)));
        self
    }

    /// Registers a callback for when the promise is cancelled.
    pub fn on_cancel<F>(&self, f: F) -> &Self
    where
        F: FnOnce(E) + 'static,
    {
        let reason = {
            let mut inner = self.inner.borrow_mut();
            match &mut inner.slot {
                Slot::Pending(callbacks) => {
                    callbacks.cancelled.push(Box::new(f));
                    return self;
                }
                Slot::Cancelled(reason) => reason.clone(),
                _ => return self,
            }
        };
        self.dispatch(Box::new(move || f(reason)));
        self
    }

    /// Registers one callback for both resolution and rejection.
    pub fn always<F>(&self, f: F) -> &Self
    where
        F: FnOnce(Result<T, E>) + 'static,
    {
        let on_done = Rc::new(Cell::new(Some(f)));
        let on_fail = on_done.clone();
        self.done(move |value| {
            if let Some(f) = on_done.take() {
                f(Ok(value))
            }
        });
        self.fail(move |reason| {
            if let Some(f) = on_fail.take() {
                f(Err(reason))
            }
        })
    }

    /// Ties this promise to `other`: once `other` resolves, rejects or is
    /// cancelled, this promise does the same.
    pub fn bind(&self, other: &Promise<T, E>) -> &Self {
        let (on_done, on_fail, on_cancel) = (self.clone(), self.clone(), self.clone());
        other
            .done(move |value| {
                on_done.resolve(value);
            })
            .fail(move |reason| {
                on_fail.reject(reason);
            })
            .on_cancel(move |reason| {
                on_cancel.cancel(reason);
            });
        self
    }

    fn forward_cancel<U>(&self, result: &Promise<U, E>)
    where
        U: Clone + 'static,
    {
        let result = result.clone();
        self.on_cancel(move |reason| {
            result.cancel(reason);
        });
    }

    /// Derives a promise from the resolution of this one.
    ///
    /// When this promise resolves, `on_resolved` maps the value to anything
    /// [`Awaitable`]: returning `Ok(v)` resolves the result with `v`,
    /// returning `Err(e)` rejects it, and returning another promise binds the
    /// result to it. Rejection and cancellation pass through unchanged.
    pub fn then<F, A>(&self, on_resolved: F) -> Promise<A::Ok, E>
    where
        F: FnOnce(T) -> A + 'static,
        A: Awaitable<Err = E>,
    {
        let result = Promise::new(&self.spawner);
        let target = result.clone();
        self.done(move |value| on_resolved(value).settle(&target));
        let target = result.clone();
        self.fail(move |reason| {
            target.reject(reason);
        });
        self.forward_cancel(&result);
        result
    }

    /// Like [`then`](Promise::then), with `on_rejected` mapping a rejection
    /// the same way `on_resolved` maps a value.
    pub fn then_or_else<F, G, A, B>(&self, on_resolved: F, on_rejected: G) -> Promise<A::Ok, E>
    where
        F: FnOnce(T) -> A + 'static,
        G: FnOnce(E) -> B + 'static,
        A: Awaitable<Err = E>,
        B: Awaitable<Ok = A::Ok, Err = E>,
    {
        let result = Promise::new(&self.spawner);
        let target = result.clone();
        self.done(move |value| on_resolved(value).settle(&target));
        let target = result.clone();
        self.fail(move |reason| on_rejected(reason).settle(&target));
        self.forward_cancel(&result);
        result
    }

    /// Derives a promise that recovers from a rejection of this one through
    /// `on_rejected`. Resolution and cancellation pass through unchanged.
    pub fn or_else<G, B>(&self, on_rejected: G) -> Promise<T, E>
    where
        G: FnOnce(E) -> B + 'static,
        B: Awaitable<Ok = T, Err = E>,
    {
        let result = Promise::new(&self.spawner);
        let target = result.clone();
        self.done(move |value| {
            target.resolve(value);
        });
        let target = result.clone();
        self.fail(move |reason| on_rejected(reason).settle(&target));
        self.forward_cancel(&result);
        result
    }

    /// Derives a promise resolved with `f` applied to this one's value.
    pub fn map<F, U>(&self, f: F) -> Promise<U, E>
    where
        F: FnOnce(T) -> U + 'static,
        U: Clone + 'static,
    {
        self.then(move |value| Ok::<U, E>(f(value)))
    }
}

impl<T, E> Future for Promise<T, E>
where
    T: Clone + 'static,
    E: Clone + fmt::Debug + 'static,
{
    type Output = Result<T, Rejection<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        inner.handled = true;
        match &inner.slot {
            Slot::Pending(_) => {
                if !inner.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
                    inner.wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
            Slot::Resolved(value) => Poll::Ready(Ok(value.clone())),
            Slot::Rejected(reason) => Poll::Ready(Err(Rejection::Rejected(reason.clone()))),
            Slot::Cancelled(reason) => Poll::Ready(Err(Rejection::Cancelled(reason.clone()))),
        }
    }
}

impl<T, E> fmt::Display for Promise<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Promise:{}", self.state())
    }
}

impl<T, E> fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.state())
            .field("spawner", &self.spawner)
            .finish()
    }
}
