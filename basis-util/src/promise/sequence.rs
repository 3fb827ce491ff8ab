use std::cell::RefCell;
use std::rc::Rc;

use basis_core::{IntoSequence, Sequence, Spawner};

use super::{when, Awaitable, Promise};

struct Driver<C, F, A: Awaitable> {
    cursor: RefCell<C>,
    f: RefCell<F>,
    result: Promise<Option<A::Ok>, A::Err>,
}

fn advance<C, F, A>(driver: Rc<Driver<C, F, A>>, last: Option<A::Ok>)
where
    C: Iterator + 'static,
    C::Item: Awaitable<Err = A::Err>,
    F: FnMut(<C::Item as Awaitable>::Ok) -> A + 'static,
    A: Awaitable + 'static,
{
    let next = driver.cursor.borrow_mut().next();
    let x = match next {
        Some(x) => x,
        None => {
            driver.result.resolve(last);
            return;
        }
    };

    let spawner = driver.result.spawner().clone();
    let apply = driver.clone();
    let step = when(&spawner, x).then(move |value| {
        let mut f = apply.f.borrow_mut();
        (*f)(value)
    });
    let (on_fail, on_cancel) = (driver.clone(), driver.clone());
    step.done(move |value| advance(driver, Some(value)))
        .fail(move |reason| {
            on_fail.result.reject(reason);
        })
        .on_cancel(move |reason| {
            on_cancel.result.cancel(reason);
        });
}

/// Awaits every element of `xs` strictly in order, then resolves with the
/// last value, or with `None` if there were no elements.
///
/// An element is not even pulled from the sequence until the one before it
/// has resolved. The first rejection or cancellation settles the returned
/// promise the same way and stops the traversal.
pub fn sequence<S>(
    spawner: &Spawner,
    xs: S,
) -> Promise<Option<<S::Item as Awaitable>::Ok>, <S::Item as Awaitable>::Err>
where
    S: IntoSequence,
    S::Item: Awaitable,
    <S::IntoSeq as Sequence>::Cursor: 'static,
{
    sequence_with(spawner, xs, Ok::<_, <S::Item as Awaitable>::Err>)
}

/// Like [`sequence`], but passes each resolved element through `f` before
/// advancing. `f` may itself return a promise, which is awaited too.
pub fn sequence_with<S, F, A>(spawner: &Spawner, xs: S, f: F) -> Promise<Option<A::Ok>, A::Err>
where
    S: IntoSequence,
    S::Item: Awaitable<Err = A::Err>,
    <S::IntoSeq as Sequence>::Cursor: 'static,
    F: FnMut(<S::Item as Awaitable>::Ok) -> A + 'static,
    A: Awaitable + 'static,
{
    let result = Promise::new(spawner);
    let driver = Rc::new(Driver {
        cursor: RefCell::new(xs.into_sequence().cursor()),
        f: RefCell::new(f),
        result: result.clone(),
    });
    advance(driver, None);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use basis_executor::{Clock, LocalPool};
    use std::cell::Cell;

    #[test]
    fn next_element_waits_for_the_previous_one() {
        let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
        let spawner = pool.spawner();
        let first = Promise::<u32, ()>::new(&spawner);
        let pulled = Rc::new(Cell::new(0));
        let counter = pulled.clone();
        let (head, s) = (first.clone(), spawner.clone());
        let xs = crate::sequence::from_fn(move || {
            let (counter, head, s) = (counter.clone(), head.clone(), s.clone());
            (0..2u32).map(move |i| {
                counter.set(counter.get() + 1);
                if i == 0 {
                    head.clone()
                } else {
                    Promise::resolved(&s, 2)
                }
            })
        });
        let p = sequence(&spawner, xs);
        pool.run_until_stalled();
        assert_eq!(pulled.get(), 1);
        first.resolve(1);
        pool.run_until_stalled();
        assert_eq!(pulled.get(), 2);
        assert_eq!(p.value(), Some(Some(2)));
    }

    #[test]
    fn empty_input_resolves_with_none() {
        let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
        let p = sequence(&pool.spawner(), Vec::<Result<u8, ()>>::new());
        pool.run();
        assert_eq!(p.value(), Some(None));
    }
}
