//! Lazy, restartable sequences.
//!
//! This module contains a number of functions for building sequences from
//! scratch ([`range`], [`repeat`], [`iterate`], [`from_fn`], ...), the
//! [`SequenceExt`] trait which adds combinator methods to every
//! [`Sequence`], and the functions combining many sequences at once
//! ([`chain_all`], [`zip_all`], [`product_all`]).
//!
//! Collections become sequences through [`IntoSequence`]; every argument
//! that takes "another sequence" accepts a collection as well.

pub use basis_core::sequence::{Chars, CharsCursor, IntoSequence, Items, ItemsCursor, Sequence};

mod boxed;
pub use self::boxed::LocalBoxSequence;

mod ext;
pub use self::ext::{
    Chain, Cycle, CycleCursor, Enumerate, Filter, FilterCursor, FilterMap, FilterMapCursor,
    Flatten, FlattenCursor, Map, MapCursor, Product, ProductCursor, Reverse, Scanl, Scanl1,
    Scanl1Cursor, ScanlCursor, SequenceExt, Sorted, Zip,
};

mod fns;
pub use self::fns::{ByKey, Compare, Flip, Fn2, NaturalOrder};

mod many;
pub use self::many::{
    chain_all, product_all, zip_all, ChainAll, ChainAllCursor, ProductAll, ProductAllCursor,
    ZipAll, ZipAllCursor,
};

mod range;
pub use self::range::{range, range_step, Range, RangeCursor, Step};

mod sources;
pub use self::sources::{
    empty, from_fn, iterate, iterate_n, once, repeat, repeat_n, Empty, FromFn, Iterate,
    IterateCursor, Once, Repeat, RepeatCursor,
};
