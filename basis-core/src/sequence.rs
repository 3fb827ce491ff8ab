//! Restartable lazy sequences.
//!
//! A [`Sequence`] is a factory of traversals: every call to
//! [`cursor`](Sequence::cursor) starts an independent pass from the first
//! element. The cursor is a plain [`Iterator`], so the "next" operation
//! returns `Some(item)` or `None` once the sequence is exhausted; exhaustion
//! is never reported as an error.
//!
//! Plain collections become sequences through [`IntoSequence`]: vectors,
//! arrays and slices iterate their elements, strings iterate their `char`s,
//! and maps iterate `(key, value)` pairs in key order.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::rc::Rc;

/// A lazily produced, restartable, possibly infinite ordered stream of
/// elements.
pub trait Sequence {
    /// Elements yielded by the sequence.
    type Item;

    /// The stateful traversal handed out by [`cursor`](Sequence::cursor).
    type Cursor: Iterator<Item = Self::Item>;

    /// Starts a new traversal from the first element.
    ///
    /// Traversals are independent of each other: advancing one never
    /// affects another, and the sequence itself is left untouched.
    fn cursor(&self) -> Self::Cursor;
}

impl<S: ?Sized + Sequence> Sequence for &S {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        (**self).cursor()
    }
}

impl<S: ?Sized + Sequence> Sequence for Rc<S> {
    type Item = S::Item;
    type Cursor = S::Cursor;

    fn cursor(&self) -> Self::Cursor {
        (**self).cursor()
    }
}

/// Conversion into a [`Sequence`].
///
/// Every sequence converts into itself, so functions taking
/// `impl IntoSequence` accept both wrapped sequences and raw collections.
pub trait IntoSequence {
    /// Elements yielded by the resulting sequence.
    type Item;

    /// The resulting sequence.
    type IntoSeq: Sequence<Item = Self::Item>;

    /// Performs the conversion.
    fn into_sequence(self) -> Self::IntoSeq;
}

impl<S: Sequence> IntoSequence for S {
    type Item = S::Item;
    type IntoSeq = S;

    fn into_sequence(self) -> S {
        self
    }
}

impl<T: Clone> IntoSequence for Vec<T> {
    type Item = T;
    type IntoSeq = Items<T>;

    fn into_sequence(self) -> Items<T> {
        Items::from(self)
    }
}

impl<T: Clone, const N: usize> IntoSequence for [T; N] {
    type Item = T;
    type IntoSeq = Items<T>;

    fn into_sequence(self) -> Items<T> {
        Items::from(Vec::from(self))
    }
}

impl<T: Clone> IntoSequence for &[T] {
    type Item = T;
    type IntoSeq = Items<T>;

    fn into_sequence(self) -> Items<T> {
        Items::from(self.to_vec())
    }
}

impl<T: Clone> IntoSequence for Option<T> {
    type Item = T;
    type IntoSeq = Items<T>;

    fn into_sequence(self) -> Items<T> {
        self.into_iter().collect()
    }
}

impl IntoSequence for &str {
    type Item = char;
    type IntoSeq = Chars;

    fn into_sequence(self) -> Chars {
        Chars::new(self)
    }
}

impl IntoSequence for String {
    type Item = char;
    type IntoSeq = Chars;

    fn into_sequence(self) -> Chars {
        Chars::new(self)
    }
}

impl<K: Clone, V: Clone> IntoSequence for BTreeMap<K, V> {
    type Item = (K, V);
    type IntoSeq = Items<(K, V)>;

    fn into_sequence(self) -> Items<(K, V)> {
        self.into_iter().collect()
    }
}

impl<K: Ord + Clone, V: Clone, H: BuildHasher> IntoSequence for HashMap<K, V, H> {
    type Item = (K, V);
    type IntoSeq = Items<(K, V)>;

    fn into_sequence(self) -> Items<(K, V)> {
        let mut entries: Vec<_> = self.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Items::from(entries)
    }
}

/// A sequence over a shared, immutable list of elements.
///
/// Cloning an `Items` or starting a cursor never copies the list.
pub struct Items<T> {
    items: Rc<[T]>,
}

impl<T> Items<T> {
    /// The elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for Items<T> {
    fn clone(&self) -> Self {
        Items { items: self.items.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for Items<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Items").field(&&*self.items).finish()
    }
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(items: Vec<T>) -> Self {
        Items { items: items.into() }
    }
}

impl<T> FromIterator<T> for Items<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Items { items: iter.into_iter().collect() }
    }
}

impl<T: Clone> Sequence for Items<T> {
    type Item = T;
    type Cursor = ItemsCursor<T>;

    fn cursor(&self) -> ItemsCursor<T> {
        ItemsCursor { items: self.items.clone(), index: 0 }
    }
}

/// Cursor for [`Items`].
pub struct ItemsCursor<T> {
    items: Rc<[T]>,
    index: usize,
}

impl<T: fmt::Debug> fmt::Debug for ItemsCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemsCursor")
            .field("remaining", &&self.items[self.index.min(self.items.len())..])
            .finish()
    }
}

impl<T: Clone> Iterator for ItemsCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for ItemsCursor<T> {}

/// A sequence over the `char`s of a shared string.
#[derive(Clone)]
pub struct Chars {
    text: Rc<str>,
}

impl Chars {
    /// Wraps a string.
    pub fn new(text: impl Into<Rc<str>>) -> Chars {
        Chars { text: text.into() }
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Chars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chars").field(&&*self.text).finish()
    }
}

impl Sequence for Chars {
    type Item = char;
    type Cursor = CharsCursor;

    fn cursor(&self) -> CharsCursor {
        CharsCursor { text: self.text.clone(), offset: 0 }
    }
}

/// Cursor for [`Chars`].
#[derive(Debug)]
pub struct CharsCursor {
    text: Rc<str>,
    offset: usize,
}

impl Iterator for CharsCursor {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.text.get(self.offset..)?.chars().next()?;
        self.offset += c.len_utf8();
        Some(c)
    }
}
