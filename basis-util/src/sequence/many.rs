//! Combinators over an arbitrary number of sequences of the same type.

use core::fmt;
use std::rc::Rc;

use basis_core::{IntoSequence, Sequence};

fn collect_all<I>(seqs: I) -> Rc<[<I::Item as IntoSequence>::IntoSeq]>
where
    I: IntoIterator,
    I::Item: IntoSequence,
{
    seqs.into_iter().map(IntoSequence::into_sequence).collect()
}

/// Sequence for the [`chain_all`] function.
#[must_use = "sequences do nothing unless iterated"]
pub struct ChainAll<S> {
    seqs: Rc<[S]>,
}

impl<S> Clone for ChainAll<S> {
    fn clone(&self) -> Self {
        ChainAll { seqs: self.seqs.clone() }
    }
}

impl<S: fmt::Debug> fmt::Debug for ChainAll<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainAll").field("seqs", &self.seqs).finish()
    }
}

/// Concatenates every sequence of `seqs`, moving on to the next one only
/// once the current one is exhausted.
pub fn chain_all<I>(seqs: I) -> ChainAll<<I::Item as IntoSequence>::IntoSeq>
where
    I: IntoIterator,
    I::Item: IntoSequence,
{
    ChainAll { seqs: collect_all(seqs) }
}

impl<S: Sequence> Sequence for ChainAll<S> {
    type Item = S::Item;
    type Cursor = ChainAllCursor<S>;

    fn cursor(&self) -> Self::Cursor {
        ChainAllCursor { seqs: self.seqs.clone(), index: 0, current: None }
    }
}

/// Cursor for [`ChainAll`].
pub struct ChainAllCursor<S: Sequence> {
    seqs: Rc<[S]>,
    index: usize,
    current: Option<S::Cursor>,
}

impl<S: Sequence> fmt::Debug for ChainAllCursor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainAllCursor").field("index", &self.index).finish()
    }
}

impl<S: Sequence> Iterator for ChainAllCursor<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        loop {
            if let Some(x) = self.current.as_mut().and_then(Iterator::next) {
                return Some(x);
            }
            let seq = self.seqs.get(self.index)?;
            self.index += 1;
            self.current = Some(seq.cursor());
        }
    }
}

/// Sequence for the [`zip_all`] function.
#[must_use = "sequences do nothing unless iterated"]
pub struct ZipAll<S> {
    seqs: Rc<[S]>,
}

impl<S> Clone for ZipAll<S> {
    fn clone(&self) -> Self {
        ZipAll { seqs: self.seqs.clone() }
    }
}

impl<S: fmt::Debug> fmt::Debug for ZipAll<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipAll").field("seqs", &self.seqs).finish()
    }
}

/// Walks every sequence of `seqs` in lockstep, yielding one vector per
/// step and ending with the shortest sequence. Yields nothing if `seqs` is
/// empty.
pub fn zip_all<I>(seqs: I) -> ZipAll<<I::Item as IntoSequence>::IntoSeq>
where
    I: IntoIterator,
    I::Item: IntoSequence,
{
    ZipAll { seqs: collect_all(seqs) }
}

impl<S: Sequence> Sequence for ZipAll<S> {
    type Item = Vec<S::Item>;
    type Cursor = ZipAllCursor<S::Cursor>;

    fn cursor(&self) -> Self::Cursor {
        ZipAllCursor { cursors: self.seqs.iter().map(Sequence::cursor).collect() }
    }
}

/// Cursor for [`ZipAll`].
#[derive(Debug)]
pub struct ZipAllCursor<C> {
    cursors: Vec<C>,
}

impl<C: Iterator> Iterator for ZipAllCursor<C> {
    type Item = Vec<C::Item>;

    fn next(&mut self) -> Option<Vec<C::Item>> {
        if self.cursors.is_empty() {
            return None;
        }
        self.cursors.iter_mut().map(Iterator::next).collect()
    }
}

/// Sequence for the [`product_all`] function.
#[must_use = "sequences do nothing unless iterated"]
pub struct ProductAll<S> {
    seqs: Rc<[S]>,
}

impl<S> Clone for ProductAll<S> {
    fn clone(&self) -> Self {
        ProductAll { seqs: self.seqs.clone() }
    }
}

impl<S: fmt::Debug> fmt::Debug for ProductAll<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductAll").field("seqs", &self.seqs).finish()
    }
}

/// The cartesian product of every sequence of `seqs`, one vector per
/// combination.
///
/// Combinations come in odometer order: the last position advances fastest,
/// and an exhausted position restarts its sequence and carries into the one
/// before it. Yields nothing if `seqs` is empty or any of them is.
///
/// # Examples
///
/// ```
/// use basis_util::sequence::{product_all, SequenceExt};
///
/// let words: Vec<String> = product_all(["01", "ab"])
///     .iter()
///     .map(|tuple| tuple.into_iter().collect())
///     .collect();
/// assert_eq!(words, ["0a", "0b", "1a", "1b"]);
/// ```
pub fn product_all<I>(seqs: I) -> ProductAll<<I::Item as IntoSequence>::IntoSeq>
where
    I: IntoIterator,
    I::Item: IntoSequence,
{
    ProductAll { seqs: collect_all(seqs) }
}

impl<S> Sequence for ProductAll<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;
    type Cursor = ProductAllCursor<S>;

    fn cursor(&self) -> Self::Cursor {
        ProductAllCursor {
            cursors: self.seqs.iter().map(Sequence::cursor).collect(),
            seqs: self.seqs.clone(),
            tuple: None,
            done: self.seqs.is_empty(),
        }
    }
}

/// Cursor for [`ProductAll`].
pub struct ProductAllCursor<S: Sequence> {
    seqs: Rc<[S]>,
    cursors: Vec<S::Cursor>,
    tuple: Option<Vec<S::Item>>,
    done: bool,
}

impl<S: Sequence> fmt::Debug for ProductAllCursor<S>
where
    S::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductAllCursor")
            .field("tuple", &self.tuple)
            .field("done", &self.done)
            .finish()
    }
}

impl<S> ProductAllCursor<S>
where
    S: Sequence,
    S::Item: Clone,
{
    // Moves `tuple` to the following combination. Returns `false` once the
    // leftmost position is exhausted.
    fn advance(&mut self, tuple: &mut [S::Item]) -> bool {
        for i in (0..tuple.len()).rev() {
            if let Some(x) = self.cursors[i].next() {
                tuple[i] = x;
                return true;
            }
            if i == 0 {
                return false;
            }
            self.cursors[i] = self.seqs[i].cursor();
            match self.cursors[i].next() {
                Some(x) => tuple[i] = x,
                None => return false,
            }
        }
        false
    }
}

impl<S> Iterator for ProductAllCursor<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn next(&mut self) -> Option<Vec<S::Item>> {
        if self.done {
            return None;
        }
        let next = match self.tuple.take() {
            None => self.cursors.iter_mut().map(Iterator::next).collect::<Option<Vec<_>>>(),
            Some(mut tuple) => {
                if self.advance(&mut tuple) {
                    Some(tuple)
                } else {
                    None
                }
            }
        };
        match next {
            Some(tuple) => {
                self.tuple = Some(tuple.clone());
                Some(tuple)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
