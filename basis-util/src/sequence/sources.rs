//! Sequences generated from scratch rather than from a collection.

use core::fmt;
use core::iter;
use core::marker::PhantomData;
use std::option;
use std::rc::Rc;

use basis_core::Sequence;

/// Sequence for the [`from_fn`] function.
#[derive(Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct FromFn<F> {
    factory: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish()
    }
}

/// Creates a sequence whose traversals are the iterators `factory` returns.
///
/// `factory` is called once per traversal, so it should return a fresh
/// iterator starting from the beginning every time.
///
/// # Examples
///
/// ```
/// use basis_util::sequence::{self, SequenceExt};
///
/// let squares = sequence::from_fn(|| (1..4).map(|x| x * x));
/// assert_eq!(squares.to_vec(), vec![1, 4, 9]);
/// assert_eq!(squares.to_vec(), vec![1, 4, 9]);
/// ```
pub fn from_fn<F, I>(factory: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FromFn { factory }
}

impl<F, I> Sequence for FromFn<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor = I::IntoIter;

    fn cursor(&self) -> Self::Cursor {
        (self.factory)().into_iter()
    }
}

/// Sequence for the [`once`] function.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Once<T> {
    value: T,
}

/// Creates a sequence of exactly one element.
pub fn once<T: Clone>(value: T) -> Once<T> {
    Once { value }
}

impl<T: Clone> Sequence for Once<T> {
    type Item = T;
    type Cursor = option::IntoIter<T>;

    fn cursor(&self) -> Self::Cursor {
        Some(self.value.clone()).into_iter()
    }
}

/// Sequence for the [`empty`] function.
#[must_use = "sequences do nothing unless iterated"]
pub struct Empty<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        empty()
    }
}

impl<T> fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Empty").finish()
    }
}

/// Creates a sequence with no elements.
pub fn empty<T>() -> Empty<T> {
    Empty { _marker: PhantomData }
}

impl<T> Sequence for Empty<T> {
    type Item = T;
    type Cursor = iter::Empty<T>;

    fn cursor(&self) -> Self::Cursor {
        iter::empty()
    }
}

/// Sequence for the [`repeat`] and [`repeat_n`] functions.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Repeat<T> {
    value: T,
    times: Option<usize>,
}

/// Creates a sequence repeating `value` forever.
pub fn repeat<T: Clone>(value: T) -> Repeat<T> {
    Repeat { value, times: None }
}

/// Creates a sequence repeating `value` `n` times.
pub fn repeat_n<T: Clone>(value: T, n: usize) -> Repeat<T> {
    Repeat { value, times: Some(n) }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;
    type Cursor = RepeatCursor<T>;

    fn cursor(&self) -> Self::Cursor {
        RepeatCursor { value: self.value.clone(), left: self.times }
    }
}

/// Cursor for [`Repeat`].
#[derive(Debug, Clone)]
pub struct RepeatCursor<T> {
    value: T,
    left: Option<usize>,
}

impl<T: Clone> Iterator for RepeatCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(left) = &mut self.left {
            *left = left.checked_sub(1)?;
        }
        Some(self.value.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.left {
            Some(left) => (left, Some(left)),
            None => (usize::MAX, None),
        }
    }
}

/// Sequence for the [`iterate`] and [`iterate_n`] functions.
#[must_use = "sequences do nothing unless iterated"]
pub struct Iterate<T, F> {
    seed: T,
    f: Rc<F>,
    times: Option<usize>,
}

impl<T: Clone, F> Clone for Iterate<T, F> {
    fn clone(&self) -> Self {
        Iterate { seed: self.seed.clone(), f: self.f.clone(), times: self.times }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Iterate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iterate")
            .field("seed", &self.seed)
            .field("times", &self.times)
            .finish()
    }
}

/// Creates the infinite sequence `seed`, `f(seed)`, `f(f(seed))`, ...
pub fn iterate<T, F>(f: F, seed: T) -> Iterate<T, F>
where
    T: Clone,
    F: Fn(&T) -> T,
{
    Iterate { seed, f: Rc::new(f), times: None }
}

/// Like [`iterate`], stopping after `n` elements.
pub fn iterate_n<T, F>(f: F, seed: T, n: usize) -> Iterate<T, F>
where
    T: Clone,
    F: Fn(&T) -> T,
{
    Iterate { seed, f: Rc::new(f), times: Some(n) }
}

impl<T, F> Sequence for Iterate<T, F>
where
    T: Clone,
    F: Fn(&T) -> T,
{
    type Item = T;
    type Cursor = IterateCursor<T, F>;

    fn cursor(&self) -> Self::Cursor {
        IterateCursor { current: self.seed.clone(), started: false, f: self.f.clone(), left: self.times }
    }
}

/// Cursor for [`Iterate`].
pub struct IterateCursor<T, F> {
    current: T,
    started: bool,
    f: Rc<F>,
    left: Option<usize>,
}

impl<T: fmt::Debug, F> fmt::Debug for IterateCursor<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterateCursor")
            .field("current", &self.current)
            .field("left", &self.left)
            .finish()
    }
}

impl<T, F> Iterator for IterateCursor<T, F>
where
    T: Clone,
    F: Fn(&T) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(left) = &mut self.left {
            *left = left.checked_sub(1)?;
        }
        if self.started {
            self.current = (self.f)(&self.current);
        }
        self.started = true;
        Some(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceExt;

    #[test]
    fn repeat_and_iterate_honour_counts() {
        assert_eq!(repeat_n(1, 5).to_vec(), [1, 1, 1, 1, 1]);
        assert!(repeat_n(1, 0).is_empty());
        assert_eq!(iterate_n(|x| x * 2, 1, 6).to_vec(), [1, 2, 4, 8, 16, 32]);
        assert_eq!(iterate_n(|x| x * 2, 1, 1).to_vec(), [1]);
        assert!(iterate_n(|x: &i32| x * 2, 1, 0).is_empty());
    }

    #[test]
    fn infinite_sources_are_lazy() {
        let naturals = iterate(|x| x + 1, 0u64);
        assert_eq!(naturals.iter().take(3).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(repeat('x').iter().nth(1_000), Some('x'));
    }

    #[test]
    fn once_and_empty() {
        assert_eq!(once(7).to_vec(), [7]);
        assert_eq!(empty::<u8>().count(), 0);
    }
}
