//! The [`SequenceExt`] combinator algebra.
//!
//! Lazy combinators return a new sequence wrapping the source; nothing is
//! pulled from the source until the derived sequence is iterated, and each
//! traversal of the derived sequence starts a fresh traversal of the source.
//! Consumers drain one traversal eagerly and return a plain value.

use core::cmp::Ordering;
use core::fmt::{Display, Write};
use core::iter::Sum;

use basis_core::sequence::Items;
use basis_core::{Error, IntoSequence, RandomSource, Sequence};

use super::boxed::LocalBoxSequence;
use super::fns::{ByKey, Flip, NaturalOrder};

mod map;
pub use self::map::{Map, MapCursor};

mod filter;
pub use self::filter::{Filter, FilterCursor};

mod filter_map;
pub use self::filter_map::{FilterMap, FilterMapCursor};

mod enumerate;
pub use self::enumerate::Enumerate;

mod scan;
pub use self::scan::{Scanl, Scanl1, Scanl1Cursor, ScanlCursor};

mod zip;
pub use self::zip::Zip;

mod product;
pub use self::product::{Product, ProductCursor};

mod chain;
pub use self::chain::Chain;

mod flatten;
pub use self::flatten::{Flatten, FlattenCursor};

mod cycle;
pub use self::cycle::{Cycle, CycleCursor};

mod buffered;
pub use self::buffered::{Reverse, Sorted};

mod sample;

impl<T: ?Sized> SequenceExt for T where T: Sequence {}

/// An extension trait for [`Sequence`]s that provides a variety of
/// convenient combinator functions.
pub trait SequenceExt: Sequence {
    /// Starts a traversal. Same as [`cursor`](Sequence::cursor).
    fn iter(&self) -> Self::Cursor {
        self.cursor()
    }

    /// Maps every element through `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use basis_util::sequence::SequenceExt;
    /// use basis_core::IntoSequence;
    ///
    /// let doubled = vec![1, 2, 3].into_sequence().map(|x| x * 2);
    /// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    /// assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    /// ```
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Item) -> U,
        Self: Sized,
    {
        Map::new(self, f)
    }

    /// Keeps the elements satisfying `pred`.
    fn filter<P>(self, pred: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
        Self: Sized,
    {
        Filter::new(self, pred)
    }

    /// Maps and filters in one pass: elements for which `f` returns `None`
    /// are skipped.
    fn filter_map<U, F>(self, f: F) -> FilterMap<Self, F>
    where
        F: Fn(Self::Item) -> Option<U>,
        Self: Sized,
    {
        FilterMap::new(self, f)
    }

    /// Pairs every element with its position.
    fn enumerate(self) -> Enumerate<Self>
    where
        Self: Sized,
    {
        Enumerate::new(self)
    }

    /// Yields `init` followed by every intermediate result of folding the
    /// elements from the left with `f`.
    fn scanl<B, F>(self, init: B, f: F) -> Scanl<Self, B, F>
    where
        B: Clone,
        F: Fn(B, Self::Item) -> B,
        Self: Sized,
    {
        Scanl::new(self, init, f)
    }

    /// Like [`scanl`](SequenceExt::scanl) with the first element as the
    /// initial value. Yields nothing for an empty sequence.
    fn scanl1<F>(self, f: F) -> Scanl1<Self, F>
    where
        Self::Item: Clone,
        F: Fn(Self::Item, Self::Item) -> Self::Item,
        Self: Sized,
    {
        Scanl1::new(self, f)
    }

    /// Yields `init` followed by every intermediate result of folding the
    /// elements from the right with `f`.
    ///
    /// This is a left scan over the reversed sequence with `f` flipped, so
    /// every traversal buffers the whole source.
    fn scanr<B, F>(self, init: B, f: F) -> Scanl<Reverse<Self>, B, Flip<F>>
    where
        B: Clone,
        F: Fn(Self::Item, B) -> B,
        Self: Sized,
    {
        Scanl::new(Reverse::new(self), init, Flip(f))
    }

    /// Like [`scanr`](SequenceExt::scanr) with the last element as the
    /// initial value.
    fn scanr1<F>(self, f: F) -> Scanl1<Reverse<Self>, Flip<F>>
    where
        Self::Item: Clone,
        F: Fn(Self::Item, Self::Item) -> Self::Item,
        Self: Sized,
    {
        Scanl1::new(Reverse::new(self), Flip(f))
    }

    /// Walks this sequence and `other` in lockstep, ending with the shorter
    /// of the two.
    fn zip<S>(self, other: S) -> Zip<Self, S::IntoSeq>
    where
        S: IntoSequence,
        Self: Sized,
    {
        Zip::new(self, other.into_sequence())
    }

    /// The cartesian product of this sequence and `other`, in lexicographic
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use basis_util::sequence::SequenceExt;
    /// use basis_core::IntoSequence;
    ///
    /// let pairs = "01".into_sequence().product("ab");
    /// assert_eq!(pairs.to_vec(), [('0', 'a'), ('0', 'b'), ('1', 'a'), ('1', 'b')]);
    /// ```
    fn product<S>(self, other: S) -> Product<Self, S::IntoSeq>
    where
        S: IntoSequence,
        Self::Item: Clone,
        Self: Sized,
    {
        Product::new(self, other.into_sequence())
    }

    /// Yields the elements of this sequence, then those of `other`.
    fn chain<S>(self, other: S) -> Chain<Self, S::IntoSeq>
    where
        S: IntoSequence<Item = Self::Item>,
        Self: Sized,
    {
        Chain::new(self, other.into_sequence())
    }

    /// Chains together the sequences this sequence yields.
    fn flatten(self) -> Flatten<Self>
    where
        Self::Item: IntoSequence,
        Self: Sized,
    {
        Flatten::new(self)
    }

    /// Repeats the whole sequence forever. An empty sequence stays empty.
    fn cycle(self) -> Cycle<Self>
    where
        Self: Sized,
    {
        Cycle::new(self, None)
    }

    /// Repeats the whole sequence `n` times. Yields nothing if `n` is zero.
    fn cycle_n(self, n: usize) -> Cycle<Self>
    where
        Self: Sized,
    {
        Cycle::new(self, Some(n))
    }

    /// The elements in reverse order.
    fn reverse(self) -> Reverse<Self>
    where
        Self: Sized,
    {
        Reverse::new(self)
    }

    /// The elements in ascending order.
    fn sorted(self) -> Sorted<Self, NaturalOrder>
    where
        Self::Item: Ord,
        Self: Sized,
    {
        Sorted::new(self, NaturalOrder)
    }

    /// The elements ordered by `compare`.
    fn sorted_by<F>(self, compare: F) -> Sorted<Self, F>
    where
        F: Fn(&Self::Item, &Self::Item) -> Ordering,
        Self: Sized,
    {
        Sorted::new(self, compare)
    }

    /// The elements ordered by the key `f` extracts.
    fn sorted_by_key<K, F>(self, f: F) -> Sorted<Self, ByKey<F>>
    where
        K: Ord,
        F: Fn(&Self::Item) -> K,
        Self: Sized,
    {
        Sorted::new(self, ByKey(f))
    }

    /// Picks `n` elements at random, keeping their relative order.
    ///
    /// Drains one traversal, holding at most `n + 1` elements at a time.
    /// Every element consumes one draw from `random`.
    fn sample<R>(&self, n: usize, random: &mut R) -> Items<Self::Item>
    where
        R: RandomSource + ?Sized,
    {
        sample::sample(self.cursor(), n, random)
    }

    /// Erases the type of this sequence.
    fn boxed<'a>(self) -> LocalBoxSequence<'a, Self::Item>
    where
        Self: Sized + 'a,
        Self::Cursor: 'a,
    {
        LocalBoxSequence::new(self)
    }

    /// Returns `true` if a traversal yields nothing.
    fn is_empty(&self) -> bool {
        self.cursor().next().is_none()
    }

    /// The number of elements of one traversal.
    fn count(&self) -> usize {
        self.cursor().count()
    }

    /// Applies `f` to every element and its position, returning the last
    /// result, or `None` if there were no elements.
    fn for_each<R, F>(&self, mut f: F) -> Option<R>
    where
        F: FnMut(Self::Item, usize) -> R,
    {
        self.cursor().enumerate().fold(None, |_, (i, x)| Some(f(x, i)))
    }

    /// Like [`for_each`](SequenceExt::for_each) but only for the elements
    /// satisfying `pred`.
    fn for_each_if<R, F, P>(&self, mut f: F, mut pred: P) -> Option<R>
    where
        F: FnMut(Self::Item, usize) -> R,
        P: FnMut(&Self::Item, usize) -> bool,
    {
        let mut last = None;
        for (i, x) in self.cursor().enumerate() {
            if pred(&x, i) {
                last = Some(f(x, i));
            }
        }
        last
    }

    /// The first element.
    fn head(&self) -> Result<Self::Item, Error> {
        self.cursor().next().ok_or(Error::EmptySequence { op: "head" })
    }

    /// The first element, or `default` for an empty sequence.
    fn head_or(&self, default: Self::Item) -> Self::Item {
        self.cursor().next().unwrap_or(default)
    }

    /// The last element.
    fn last(&self) -> Result<Self::Item, Error> {
        self.cursor().last().ok_or(Error::EmptySequence { op: "last" })
    }

    /// The last element, or `default` for an empty sequence.
    fn last_or(&self, default: Self::Item) -> Self::Item {
        self.cursor().last().unwrap_or(default)
    }

    /// Every element sharing the greatest value of `eval`, in order.
    fn greater<K, F>(&self, mut eval: F) -> Vec<Self::Item>
    where
        K: PartialOrd,
        F: FnMut(&Self::Item) -> K,
    {
        extremes(self.cursor(), &mut eval, Ordering::Greater)
    }

    /// Every element sharing the least value of `eval`, in order.
    fn lesser<K, F>(&self, mut eval: F) -> Vec<Self::Item>
    where
        K: PartialOrd,
        F: FnMut(&Self::Item) -> K,
    {
        extremes(self.cursor(), &mut eval, Ordering::Less)
    }

    /// Folds the elements from the left, starting with `init`.
    fn foldl<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.cursor().fold(init, f)
    }

    /// Folds the elements from the left, starting with the first one.
    /// Returns `None` for an empty sequence.
    fn foldl1<F>(&self, f: F) -> Option<Self::Item>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        self.cursor().reduce(f)
    }

    /// Folds the elements from the right, starting with `init`.
    ///
    /// The whole sequence is buffered first.
    fn foldr<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(Self::Item, B) -> B,
    {
        let items: Vec<_> = self.cursor().collect();
        items.into_iter().rev().fold(init, |acc, x| f(x, acc))
    }

    /// Folds the elements from the right, starting with the last one.
    /// Returns `None` for an empty sequence.
    fn foldr1<F>(&self, mut f: F) -> Option<Self::Item>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let items: Vec<_> = self.cursor().collect();
        items.into_iter().rev().reduce(|acc, x| f(x, acc))
    }

    /// The sum of the elements.
    fn sum<R>(&self) -> R
    where
        R: Sum<Self::Item>,
    {
        self.cursor().sum()
    }

    /// The least element, or `None` for an empty sequence. Elements that
    /// do not compare to the current minimum are skipped.
    fn min(&self) -> Option<Self::Item>
    where
        Self::Item: PartialOrd,
    {
        self.cursor().reduce(|a, b| if b < a { b } else { a })
    }

    /// The greatest element, or `None` for an empty sequence. Elements that
    /// do not compare to the current maximum are skipped.
    fn max(&self) -> Option<Self::Item>
    where
        Self::Item: PartialOrd,
    {
        self.cursor().reduce(|a, b| if b > a { b } else { a })
    }

    /// Returns `true` if every element satisfies `pred`, stopping at the
    /// first one that does not. An empty sequence satisfies anything.
    fn all<P>(&self, pred: P) -> bool
    where
        P: FnMut(Self::Item) -> bool,
    {
        self.cursor().all(pred)
    }

    /// Returns `true` if some element satisfies `pred`, stopping at the
    /// first one that does.
    fn any<P>(&self, pred: P) -> bool
    where
        P: FnMut(Self::Item) -> bool,
    {
        self.cursor().any(pred)
    }

    /// Collects one traversal into a vector.
    fn to_vec(&self) -> Vec<Self::Item> {
        self.cursor().collect()
    }

    /// Collects one traversal into any collection, e.g. a map from a
    /// sequence of pairs.
    fn collect<B>(&self) -> B
    where
        B: FromIterator<Self::Item>,
    {
        self.cursor().collect()
    }

    /// Concatenates the elements' `Display` renderings with `sep` between
    /// them.
    fn join(&self, sep: &str) -> String
    where
        Self::Item: Display,
    {
        let mut out = String::new();
        for (i, x) in self.cursor().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            // Writing to a `String` cannot fail.
            let _ = write!(out, "{}", x);
        }
        out
    }
}

fn extremes<I, K, F>(items: I, eval: &mut F, wanted: Ordering) -> Vec<I::Item>
where
    I: Iterator,
    K: PartialOrd,
    F: FnMut(&I::Item) -> K,
{
    let mut best: Option<K> = None;
    let mut result = Vec::new();
    for x in items {
        let e = eval(&x);
        match best.as_ref().map(|best| e.partial_cmp(best)) {
            None => {
                best = Some(e);
                result.push(x);
            }
            Some(Some(ord)) if ord == wanted => {
                best = Some(e);
                result.clear();
                result.push(x);
            }
            Some(Some(Ordering::Equal)) => result.push(x),
            Some(_) => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::range;

    #[test]
    fn right_folds_associate_right() {
        let s = vec![1, 2, 3].into_sequence();
        assert_eq!(s.foldr(String::new(), |x, acc| format!("({}{})", x, acc)), "(1(2(3)))");
        assert_eq!(s.foldl(String::new(), |acc, x| format!("({}{})", acc, x)), "(((1)2)3)");
        assert_eq!(s.foldr1(|x, acc| x - acc), Some(2));
        assert_eq!(s.foldl1(|acc, x| acc - x), Some(-4));
    }

    #[test]
    fn scans() {
        let s = vec![1, 2, 3].into_sequence();
        assert_eq!(s.clone().scanl(0, |acc, x| acc + x).to_vec(), [0, 1, 3, 6]);
        assert_eq!(s.clone().scanl1(|acc, x| acc + x).to_vec(), [1, 3, 6]);
        assert_eq!(s.clone().scanr(0, |x, acc| x + acc).to_vec(), [0, 3, 5, 6]);
        assert_eq!(s.scanr1(|x, acc| x + acc).to_vec(), [3, 5, 6]);
    }

    #[test]
    fn greater_and_lesser_keep_ties() {
        let words = vec!["aa", "b", "cc", "d"].into_sequence();
        assert_eq!(words.greater(|w| w.len()), ["aa", "cc"]);
        assert_eq!(words.lesser(|w| w.len()), ["b", "d"]);
        assert!(range(0, 0).greater(|x: &i32| *x).is_empty());
    }

    #[test]
    fn head_and_last() {
        assert_eq!(range(1, 4).head(), Ok(1));
        assert_eq!(range(1, 4).last(), Ok(3));
        assert_eq!(range(0, 0).head(), Err(Error::EmptySequence { op: "head" }));
        assert_eq!(range(0, 0).last_or(7), 7);
        assert_eq!(range(0, 0).head_or(7), 7);
    }

    #[test]
    fn for_each_returns_the_last_result() {
        let s = vec!['a', 'b', 'c'].into_sequence();
        assert_eq!(s.for_each(|x, i| format!("{}{}", x, i)), Some("c2".to_string()));
        assert_eq!(s.for_each_if(|x, _| x, |_, i| i == 0), Some('a'));
        assert_eq!(range(0, 0).for_each(|x: i32, _| x), None);
    }

    #[test]
    fn join() {
        assert_eq!(range(1, 4).join(","), "1,2,3");
        assert_eq!("abc".into_sequence().join("."), "a.b.c");
        assert_eq!(range(0, 0).join(","), "");
    }
}
