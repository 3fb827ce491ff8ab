use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

/// Sequence for the [`cycle`](super::SequenceExt::cycle) and
/// [`cycle_n`](super::SequenceExt::cycle_n) methods.
#[must_use = "sequences do nothing unless iterated"]
pub struct Cycle<S> {
    seq: Rc<S>,
    times: Option<usize>,
}

impl<S> Cycle<S> {
    pub(super) fn new(seq: S, times: Option<usize>) -> Cycle<S> {
        Cycle { seq: Rc::new(seq), times }
    }
}

impl<S> Clone for Cycle<S> {
    fn clone(&self) -> Self {
        Cycle { seq: self.seq.clone(), times: self.times }
    }
}

impl<S: fmt::Debug> fmt::Debug for Cycle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cycle").field("seq", &self.seq).field("times", &self.times).finish()
    }
}

impl<S: Sequence> Sequence for Cycle<S> {
    type Item = S::Item;
    type Cursor = CycleCursor<S>;

    fn cursor(&self) -> Self::Cursor {
        CycleCursor {
            cursor: self.seq.cursor(),
            seq: self.seq.clone(),
            remaining: self.times,
            yielded: false,
        }
    }
}

/// Cursor for [`Cycle`].
pub struct CycleCursor<S: Sequence> {
    seq: Rc<S>,
    cursor: S::Cursor,
    // Passes left including the current one; `None` loops forever.
    remaining: Option<usize>,
    yielded: bool,
}

impl<S: Sequence> fmt::Debug for CycleCursor<S>
where
    S::Cursor: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CycleCursor")
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<S: Sequence> Iterator for CycleCursor<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            if self.remaining == Some(0) {
                return None;
            }
            if let Some(x) = self.cursor.next() {
                self.yielded = true;
                return Some(x);
            }
            // A pass that produced nothing means every pass will.
            if !self.yielded {
                self.remaining = Some(0);
                return None;
            }
            if let Some(remaining) = &mut self.remaining {
                *remaining -= 1;
                if *remaining == 0 {
                    return None;
                }
            }
            self.cursor = self.seq.cursor();
            self.yielded = false;
        }
    }
}
