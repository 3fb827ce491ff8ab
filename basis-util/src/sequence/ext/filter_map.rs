use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

/// Sequence for the [`filter_map`](super::SequenceExt::filter_map) method.
#[must_use = "sequences do nothing unless iterated"]
pub struct FilterMap<S, F> {
    seq: S,
    f: Rc<F>,
}

impl<S, F> FilterMap<S, F> {
    pub(super) fn new(seq: S, f: F) -> FilterMap<S, F> {
        FilterMap { seq, f: Rc::new(f) }
    }
}

impl<S: Clone, F> Clone for FilterMap<S, F> {
    fn clone(&self) -> Self {
        FilterMap { seq: self.seq.clone(), f: self.f.clone() }
    }
}

impl<S: fmt::Debug, F> fmt::Debug for FilterMap<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterMap").field("seq", &self.seq).finish()
    }
}

impl<S, F, U> Sequence for FilterMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> Option<U>,
{
    type Item = U;
    type Cursor = FilterMapCursor<S::Cursor, F>;

    fn cursor(&self) -> Self::Cursor {
        FilterMapCursor { cursor: self.seq.cursor(), f: self.f.clone() }
    }
}

/// Cursor for [`FilterMap`].
pub struct FilterMapCursor<C, F> {
    cursor: C,
    f: Rc<F>,
}

impl<C: fmt::Debug, F> fmt::Debug for FilterMapCursor<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterMapCursor").field("cursor", &self.cursor).finish()
    }
}

impl<C, F, U> Iterator for FilterMapCursor<C, F>
where
    C: Iterator,
    F: Fn(C::Item) -> Option<U>,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        let f = &*self.f;
        self.cursor.find_map(f)
    }
}
