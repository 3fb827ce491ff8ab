use core::iter;

use basis_core::Sequence;

/// Sequence for the [`enumerate`](super::SequenceExt::enumerate) method.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless iterated"]
pub struct Enumerate<S> {
    seq: S,
}

impl<S> Enumerate<S> {
    pub(super) fn new(seq: S) -> Enumerate<S> {
        Enumerate { seq }
    }
}

impl<S: Sequence> Sequence for Enumerate<S> {
    type Item = (usize, S::Item);
    type Cursor = iter::Enumerate<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        self.seq.cursor().enumerate()
    }
}
