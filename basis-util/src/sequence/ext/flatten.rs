use core::fmt;

use basis_core::{IntoSequence, Sequence};

type InnerCursor<T> = <<T as IntoSequence>::IntoSeq as Sequence>::Cursor;

/// Sequence for the [`flatten`](super::SequenceExt::flatten) method.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Flatten<S> {
    seq: S,
}

impl<S> Flatten<S> {
    pub(super) fn new(seq: S) -> Flatten<S> {
        Flatten { seq }
    }
}

impl<S> Sequence for Flatten<S>
where
    S: Sequence,
    S::Item: IntoSequence,
{
    type Item = <S::Item as IntoSequence>::Item;
    type Cursor = FlattenCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        FlattenCursor { outer: self.seq.cursor(), inner: None }
    }
}

/// Cursor for [`Flatten`].
pub struct FlattenCursor<C>
where
    C: Iterator,
    C::Item: IntoSequence,
{
    outer: C,
    inner: Option<InnerCursor<C::Item>>,
}

impl<C> fmt::Debug for FlattenCursor<C>
where
    C: Iterator + fmt::Debug,
    C::Item: IntoSequence,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenCursor").field("outer", &self.outer).finish()
    }
}

impl<C> Iterator for FlattenCursor<C>
where
    C: Iterator,
    C::Item: IntoSequence,
{
    type Item = <C::Item as IntoSequence>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.inner.as_mut().and_then(Iterator::next) {
                return Some(x);
            }
            let seq = self.outer.next()?.into_sequence();
            self.inner = Some(seq.cursor());
        }
    }
}
