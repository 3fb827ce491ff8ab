use std::vec;

use basis_core::Sequence;

use crate::sequence::fns::Compare;

/// Sequence for the [`reverse`](super::SequenceExt::reverse) method.
///
/// Every traversal buffers the whole source before yielding anything.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Reverse<S> {
    seq: S,
}

impl<S> Reverse<S> {
    pub(super) fn new(seq: S) -> Reverse<S> {
        Reverse { seq }
    }
}

impl<S: Sequence> Sequence for Reverse<S> {
    type Item = S::Item;
    type Cursor = vec::IntoIter<S::Item>;

    fn cursor(&self) -> Self::Cursor {
        let mut items: Vec<_> = self.seq.cursor().collect();
        items.reverse();
        items.into_iter()
    }
}

/// Sequence for the [`sorted`](super::SequenceExt::sorted) family of
/// methods.
///
/// Every traversal buffers and sorts the whole source before yielding
/// anything. The sort is stable.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Sorted<S, C> {
    seq: S,
    compare: C,
}

impl<S, C> Sorted<S, C> {
    pub(super) fn new(seq: S, compare: C) -> Sorted<S, C> {
        Sorted { seq, compare }
    }
}

impl<S, C> Sequence for Sorted<S, C>
where
    S: Sequence,
    C: Compare<S::Item>,
{
    type Item = S::Item;
    type Cursor = vec::IntoIter<S::Item>;

    fn cursor(&self) -> Self::Cursor {
        let mut items: Vec<_> = self.seq.cursor().collect();
        items.sort_by(|a, b| self.compare.compare(a, b));
        items.into_iter()
    }
}
