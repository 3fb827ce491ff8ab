//! Definition of the `all` combinator, waiting for all of a list of promises
//! to resolve.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use basis_core::{IntoSequence, Sequence, Spawner};

use super::{when, Awaitable, Promise};

struct Join<T> {
    values: Vec<Option<T>>,
    remaining: usize,
}

/// Creates a promise which represents a collection of the results of the
/// elements given.
///
/// Each element is coerced with [`when`]. The returned promise resolves with
/// the values in input order once every element has resolved, and resolves
/// right away with an empty vector if there are no elements.
///
/// The first rejection rejects the returned promise; whatever the other
/// elements do afterwards is ignored. A cancelled element cancels it.
pub fn all<S>(
    spawner: &Spawner,
    xs: S,
) -> Promise<Vec<<S::Item as Awaitable>::Ok>, <S::Item as Awaitable>::Err>
where
    S: IntoSequence,
    S::Item: Awaitable,
{
    let elems: Vec<_> = xs.into_sequence().cursor().map(|x| when(spawner, x)).collect();
    let result = Promise::new(spawner);
    if elems.is_empty() {
        result.resolve(Vec::new());
        return result;
    }

    let join = Rc::new(RefCell::new(Join { values: vec![None; elems.len()], remaining: elems.len() }));
    for (i, elem) in elems.iter().enumerate() {
        let (on_done, on_fail, on_cancel) = (result.clone(), result.clone(), result.clone());
        let join = join.clone();
        elem.done(move |value| {
            let values = {
                let mut join = join.borrow_mut();
                join.values[i] = Some(value);
                join.remaining -= 1;
                if join.remaining > 0 {
                    return;
                }
                mem::take(&mut join.values)
            };
            on_done.resolve(values.into_iter().flatten().collect());
        })
        .fail(move |reason| {
            on_fail.reject(reason);
        })
        .on_cancel(move |reason| {
            on_cancel.cancel(reason);
        });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_executor::{Clock, LocalPool};

    #[test]
    fn results_keep_input_order() {
        let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
        let spawner = pool.spawner();
        let slow = Promise::<u32, ()>::new(&spawner);
        let p = all(&spawner, vec![slow.clone(), Promise::resolved(&spawner, 2)]);
        pool.run_until_stalled();
        assert!(p.is_pending());
        slow.resolve(1);
        pool.run_until_stalled();
        assert_eq!(p.value(), Some(vec![1, 2]));
    }

    #[test]
    fn cancelled_element_cancels_the_aggregate() {
        let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
        let spawner = pool.spawner();
        let a = Promise::<u32, &str>::new(&spawner);
        let p = all(&spawner, [a.clone()]);
        a.cancel("stop");
        pool.run_until_stalled();
        assert!(p.is_cancelled());
        assert_eq!(p.reason(), Some("stop"));
    }
}
