use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

/// Sequence for the [`filter`](super::SequenceExt::filter) method.
#[must_use = "sequences do nothing unless iterated"]
pub struct Filter<S, P> {
    seq: S,
    pred: Rc<P>,
}

impl<S, P> Filter<S, P> {
    pub(super) fn new(seq: S, pred: P) -> Filter<S, P> {
        Filter { seq, pred: Rc::new(pred) }
    }
}

impl<S: Clone, P> Clone for Filter<S, P> {
    fn clone(&self) -> Self {
        Filter { seq: self.seq.clone(), pred: self.pred.clone() }
    }
}

impl<S: fmt::Debug, P> fmt::Debug for Filter<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("seq", &self.seq).finish()
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;
    type Cursor = FilterCursor<S::Cursor, P>;

    fn cursor(&self) -> Self::Cursor {
        FilterCursor { cursor: self.seq.cursor(), pred: self.pred.clone() }
    }
}

/// Cursor for [`Filter`].
pub struct FilterCursor<C, P> {
    cursor: C,
    pred: Rc<P>,
}

impl<C: fmt::Debug, P> fmt::Debug for FilterCursor<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCursor").field("cursor", &self.cursor).finish()
    }
}

impl<C, P> Iterator for FilterCursor<C, P>
where
    C: Iterator,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        let pred = &*self.pred;
        self.cursor.find(|x| pred(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.size_hint().1)
    }
}
