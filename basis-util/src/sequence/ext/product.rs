use core::fmt;
use std::rc::Rc;

use basis_core::Sequence;

/// Sequence for the [`product`](super::SequenceExt::product) method.
///
/// Pairs are produced in lexicographic order: the second sequence is
/// traversed once, from the start, for every element of the first.
#[must_use = "sequences do nothing unless iterated"]
pub struct Product<S1, S2> {
    first: S1,
    second: Rc<S2>,
}

impl<S1, S2> Product<S1, S2> {
    pub(super) fn new(first: S1, second: S2) -> Product<S1, S2> {
        Product { first, second: Rc::new(second) }
    }
}

impl<S1: fmt::Debug, S2: fmt::Debug> fmt::Debug for Product<S1, S2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Product")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<S1, S2> Sequence for Product<S1, S2>
where
    S1: Sequence,
    S1::Item: Clone,
    S2: Sequence,
{
    type Item = (S1::Item, S2::Item);
    type Cursor = ProductCursor<S1::Cursor, S2>;

    fn cursor(&self) -> Self::Cursor {
        ProductCursor {
            first: self.first.cursor(),
            inner: self.second.cursor(),
            second: self.second.clone(),
            current: None,
            fresh: true,
        }
    }
}

/// Cursor for [`Product`].
pub struct ProductCursor<C: Iterator, S2: Sequence> {
    first: C,
    second: Rc<S2>,
    inner: S2::Cursor,
    current: Option<C::Item>,
    // No pair has come out of `inner` since it was last restarted.
    fresh: bool,
}

impl<C, S2> fmt::Debug for ProductCursor<C, S2>
where
    C: Iterator + fmt::Debug,
    C::Item: fmt::Debug,
    S2: Sequence,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductCursor")
            .field("first", &self.first)
            .field("current", &self.current)
            .finish()
    }
}

impl<C, S2> Iterator for ProductCursor<C, S2>
where
    C: Iterator,
    C::Item: Clone,
    S2: Sequence,
{
    type Item = (C::Item, S2::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = match &self.current {
                Some(current) => current.clone(),
                None => {
                    if !self.fresh {
                        self.inner = self.second.cursor();
                        self.fresh = true;
                    }
                    let next = self.first.next()?;
                    self.current = Some(next.clone());
                    next
                }
            };
            match self.inner.next() {
                Some(b) => {
                    self.fresh = false;
                    return Some((current, b));
                }
                // The second sequence is empty, so is the product.
                None if self.fresh => return None,
                None => self.current = None,
            }
        }
    }
}
