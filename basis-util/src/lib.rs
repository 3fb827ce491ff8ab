//! Combinators and utilities for promises and sequences.
//!
//! - [`promise`]: the single-assignment [`Promise`](promise::Promise) with its
//!   callback queues, chaining and aggregate combinators.
//! - [`sequence`]: sources, builders and the
//!   [`SequenceExt`](sequence::SequenceExt) combinator algebra for
//!   restartable lazy sequences.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod promise;
pub mod sequence;
