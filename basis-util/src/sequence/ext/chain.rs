use core::iter;

use basis_core::Sequence;

/// Sequence for the [`chain`](super::SequenceExt::chain) method.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Chain<S1, S2> {
    first: S1,
    second: S2,
}

impl<S1, S2> Chain<S1, S2> {
    pub(super) fn new(first: S1, second: S2) -> Chain<S1, S2> {
        Chain { first, second }
    }
}

impl<S1, S2> Sequence for Chain<S1, S2>
where
    S1: Sequence,
    S2: Sequence<Item = S1::Item>,
{
    type Item = S1::Item;
    type Cursor = iter::Chain<S1::Cursor, S2::Cursor>;

    // The second cursor is created up front but not advanced until the first
    // one is exhausted.
    fn cursor(&self) -> Self::Cursor {
        self.first.cursor().chain(self.second.cursor())
    }
}
