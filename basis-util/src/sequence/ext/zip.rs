use core::iter;

use basis_core::Sequence;

/// Sequence for the [`zip`](super::SequenceExt::zip) method.
///
/// Ends as soon as either side is exhausted.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Zip<S1, S2> {
    first: S1,
    second: S2,
}

impl<S1, S2> Zip<S1, S2> {
    pub(super) fn new(first: S1, second: S2) -> Zip<S1, S2> {
        Zip { first, second }
    }
}

impl<S1: Sequence, S2: Sequence> Sequence for Zip<S1, S2> {
    type Item = (S1::Item, S2::Item);
    type Cursor = iter::Zip<S1::Cursor, S2::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        self.first.cursor().zip(self.second.cursor())
    }
}
