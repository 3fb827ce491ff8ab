//! Definition of the `any` combinator, settling with the first element to
//! resolve.

use std::cell::Cell;
use std::rc::Rc;

use basis_core::{IntoSequence, Sequence, Spawner};

use super::{when, Awaitable, Promise};

/// Creates a promise resolved by the first of the given elements to resolve.
///
/// Each element is coerced with [`when`]. The returned promise is rejected
/// only once every element has been rejected, with `Some` of the last
/// reason, and is rejected with `None` right away if there are no elements.
/// A cancelled element cancels it.
pub fn any<S>(
    spawner: &Spawner,
    xs: S,
) -> Promise<<S::Item as Awaitable>::Ok, Option<<S::Item as Awaitable>::Err>>
where
    S: IntoSequence,
    S::Item: Awaitable,
{
    let elems: Vec<_> = xs.into_sequence().cursor().map(|x| when(spawner, x)).collect();
    if elems.is_empty() {
        return Promise::rejected(spawner, None);
    }

    let result = Promise::new(spawner);
    let remaining = Rc::new(Cell::new(elems.len()));
    for elem in &elems {
        let (on_done, on_fail, on_cancel) = (result.clone(), result.clone(), result.clone());
        let remaining = remaining.clone();
        elem.done(move |value| {
            on_done.resolve(value);
        })
        .fail(move |reason| {
            remaining.set(remaining.get() - 1);
            if remaining.get() == 0 {
                on_fail.reject(Some(reason));
            }
        })
        .on_cancel(move |reason| {
            on_cancel.cancel(Some(reason));
        });
    }
    result
}
