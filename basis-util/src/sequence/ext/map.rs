use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

/// Sequence for the [`map`](super::SequenceExt::map) method.
#[must_use = "sequences do nothing unless iterated"]
pub struct Map<S, F> {
    seq: S,
    f: Rc<F>,
}

impl<S, F> Map<S, F> {
    pub(super) fn new(seq: S, f: F) -> Map<S, F> {
        Map { seq, f: Rc::new(f) }
    }
}

impl<S: Clone, F> Clone for Map<S, F> {
    fn clone(&self) -> Self {
        Map { seq: self.seq.clone(), f: self.f.clone() }
    }
}

impl<S: fmt::Debug, F> fmt::Debug for Map<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("seq", &self.seq).finish()
    }
}

impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;
    type Cursor = MapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        MapCursor { cursor: self.seq.cursor(), f: self.f.clone() }
    }
}

/// Cursor for [`Map`].
pub struct MapCursor<C, F> {
    cursor: C,
    f: Rc<F>,
}

impl<C: fmt::Debug, F> fmt::Debug for MapCursor<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapCursor").field("cursor", &self.cursor).finish()
    }
}

impl<C, F, U> Iterator for MapCursor<C, F>
where
    C: Iterator,
    F: Fn(C::Item) -> U,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        self.cursor.next().map(|x| (self.f)(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}
