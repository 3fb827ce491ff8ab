use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

use crate::sequence::fns::Fn2;

/// Sequence for the [`scanl`](super::SequenceExt::scanl) and
/// [`scanr`](super::SequenceExt::scanr) methods.
///
/// Yields the initial value, then every intermediate accumulator.
#[must_use = "sequences do nothing unless iterated"]
pub struct Scanl<S, B, F> {
    seq: S,
    init: B,
    f: Rc<F>,
}

impl<S, B, F> Scanl<S, B, F> {
    pub(super) fn new(seq: S, init: B, f: F) -> Scanl<S, B, F> {
        Scanl { seq, init, f: Rc::new(f) }
    }
}

impl<S: fmt::Debug, B: fmt::Debug, F> fmt::Debug for Scanl<S, B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanl").field("seq", &self.seq).field("init", &self.init).finish()
    }
}

impl<S, B, F> Sequence for Scanl<S, B, F>
where
    S: Sequence,
    B: Clone,
    F: Fn2<B, S::Item, Output = B>,
{
    type Item = B;
    type Cursor = ScanlCursor<S::Cursor, B, F>;

    fn cursor(&self) -> Self::Cursor {
        ScanlCursor {
            cursor: self.seq.cursor(),
            acc: Some(self.init.clone()),
            started: false,
            f: self.f.clone(),
        }
    }
}

/// Cursor for [`Scanl`].
pub struct ScanlCursor<C, B, F> {
    cursor: C,
    acc: Option<B>,
    started: bool,
    f: Rc<F>,
}

impl<C: fmt::Debug, B: fmt::Debug, F> fmt::Debug for ScanlCursor<C, B, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanlCursor")
            .field("cursor", &self.cursor)
            .field("acc", &self.acc)
            .finish()
    }
}

impl<C, B, F> Iterator for ScanlCursor<C, B, F>
where
    C: Iterator,
    B: Clone,
    F: Fn2<B, C::Item, Output = B>,
{
    type Item = B;

    fn next(&mut self) -> Option<B> {
        if !self.started {
            self.started = true;
            return self.acc.clone();
        }
        let x = self.cursor.next()?;
        let acc = self.f.call(self.acc.take()?, x);
        self.acc = Some(acc.clone());
        Some(acc)
    }
}

/// Sequence for the [`scanl1`](super::SequenceExt::scanl1) and
/// [`scanr1`](super::SequenceExt::scanr1) methods.
///
/// Like [`Scanl`], using the first element as the initial value.
#[must_use = "sequences do nothing unless iterated"]
pub struct Scanl1<S, F> {
    seq: S,
    f: Rc<F>,
}

impl<S, F> Scanl1<S, F> {
    pub(super) fn new(seq: S, f: F) -> Scanl1<S, F> {
        Scanl1 { seq, f: Rc::new(f) }
    }
}

impl<S: fmt::Debug, F> fmt::Debug for Scanl1<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanl1").field("seq", &self.seq).finish()
    }
}

impl<S, F> Sequence for Scanl1<S, F>
where
    S: Sequence,
    S::Item: Clone,
    F: Fn2<S::Item, S::Item, Output = S::Item>,
{
    type Item = S::Item;
    type Cursor = Scanl1Cursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        Scanl1Cursor { cursor: self.seq.cursor(), acc: None, f: self.f.clone() }
    }
}

/// Cursor for [`Scanl1`].
pub struct Scanl1Cursor<C: Iterator, F> {
    cursor: C,
    acc: Option<C::Item>,
    f: Rc<F>,
}

impl<C, F> fmt::Debug for Scanl1Cursor<C, F>
where
    C: Iterator + fmt::Debug,
    C::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanl1Cursor")
            .field("cursor", &self.cursor)
            .field("acc", &self.acc)
            .finish()
    }
}

impl<C, F> Iterator for Scanl1Cursor<C, F>
where
    C: Iterator,
    C::Item: Clone,
    F: Fn2<C::Item, C::Item, Output = C::Item>,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let x = self.cursor.next()?;
        let acc = match self.acc.take() {
            Some(acc) => self.f.call(acc, x),
            None => x,
        };
        self.acc = Some(acc.clone());
        Some(acc)
    }
}
