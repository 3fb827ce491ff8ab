//! Asynchronous loops whose body and condition may both return promises.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use basis_core::{Spawner, Truthy};

use super::{invoke, Awaitable, Promise};

struct Loop<F, G, A: Awaitable> {
    action: RefCell<F>,
    condition: RefCell<G>,
    result: Promise<A::Ok, A::Err>,
}

// Rejections and cancellations of any step end the whole loop.
fn forward_failure<T, U, E>(step: &Promise<T, E>, result: &Promise<U, E>)
where
    T: Clone + 'static,
    U: Clone + 'static,
    E: Clone + Debug + 'static,
{
    let (on_fail, on_cancel) = (result.clone(), result.clone());
    step.fail(move |reason| {
        on_fail.reject(reason);
    })
    .on_cancel(move |reason| {
        on_cancel.cancel(reason);
    });
}

fn run<F, G, A, C>(state: Rc<Loop<F, G, A>>, previous: Option<A::Ok>)
where
    F: FnMut(Option<A::Ok>) -> A + 'static,
    G: FnMut(&A::Ok) -> C + 'static,
    A: Awaitable + 'static,
    C: Awaitable<Ok = bool, Err = A::Err> + 'static,
{
    let spawner = state.result.spawner().clone();
    let step = invoke(&spawner, || {
        let mut action = state.action.borrow_mut();
        (*action)(previous)
    });
    forward_failure(&step, &state.result);
    step.done(move |value| check(state, value));
}

fn check<F, G, A, C>(state: Rc<Loop<F, G, A>>, value: A::Ok)
where
    F: FnMut(Option<A::Ok>) -> A + 'static,
    G: FnMut(&A::Ok) -> C + 'static,
    A: Awaitable + 'static,
    C: Awaitable<Ok = bool, Err = A::Err> + 'static,
{
    let spawner = state.result.spawner().clone();
    let checks = invoke(&spawner, || {
        let mut condition = state.condition.borrow_mut();
        (*condition)(&value)
    });
    forward_failure(&checks, &state.result);
    checks.done(move |more| {
        if more {
            run(state, Some(value));
        } else {
            state.result.resolve(value);
        }
    });
}

/// Performs `action` until `condition` fails, then resolves with the last
/// value `action` produced.
///
/// `action` is first called with `None` and afterwards with the previous
/// value; `condition` sees every value `action` produces. Both may return
/// promises. A rejection or cancellation from either ends the loop the same
/// way.
pub fn do_while<F, G, A, C>(spawner: &Spawner, action: F, condition: G) -> Promise<A::Ok, A::Err>
where
    F: FnMut(Option<A::Ok>) -> A + 'static,
    G: FnMut(&A::Ok) -> C + 'static,
    A: Awaitable + 'static,
    C: Awaitable<Ok = bool, Err = A::Err> + 'static,
{
    let result = Promise::new(spawner);
    let state = Rc::new(Loop {
        action: RefCell::new(action),
        condition: RefCell::new(condition),
        result: result.clone(),
    });
    run(state, None);
    result
}

/// [`do_while`] with the truthiness of each value as the condition.
pub fn do_while_truthy<F, A>(spawner: &Spawner, action: F) -> Promise<A::Ok, A::Err>
where
    F: FnMut(Option<A::Ok>) -> A + 'static,
    A: Awaitable + 'static,
    A::Ok: Truthy,
{
    do_while(spawner, action, |value: &A::Ok| Ok::<bool, A::Err>(value.is_truthy()))
}

/// Like [`do_while`], but checks `condition` before the first action.
///
/// The first check is passed `None`. If it fails, the returned promise
/// resolves with `None` and `action` never runs.
pub fn while_do<G, F, A, C>(
    spawner: &Spawner,
    condition: G,
    action: F,
) -> Promise<Option<A::Ok>, A::Err>
where
    G: FnMut(Option<&A::Ok>) -> C + 'static,
    F: FnMut(Option<A::Ok>) -> A + 'static,
    A: Awaitable + 'static,
    C: Awaitable<Ok = bool, Err = A::Err> + 'static,
{
    let condition = Rc::new(RefCell::new(condition));
    let first = condition.clone();
    let checks = invoke(spawner, move || {
        let mut condition = first.borrow_mut();
        (*condition)(None)
    });

    let spawner = spawner.clone();
    checks.then(move |more| {
        if more {
            let body = do_while(&spawner, action, move |value: &A::Ok| {
                let mut condition = condition.borrow_mut();
                (*condition)(Some(value))
            });
            body.map(Some)
        } else {
            Promise::resolved(&spawner, None)
        }
    })
}
