//! Core traits and types for the `basis` library.
//!
//! This crate holds the small set of capabilities the rest of the workspace
//! is written against:
//!
//! - [`Schedule`](schedule::Schedule), the scheduling port promises dispatch
//!   their callbacks through, and its cloneable handle
//!   [`Spawner`](schedule::Spawner).
//! - [`Sequence`](sequence::Sequence), a restartable lazy sequence, and
//!   [`IntoSequence`](sequence::IntoSequence) for plain collections.
//! - [`RandomSource`](random::RandomSource), a source of uniform draws.
//! - [`Truthy`](truthy::Truthy), the boolean coercion used by loop
//!   combinators.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
pub use crate::error::{Error, UnhandledRejection};

pub mod random;
pub use crate::random::RandomSource;

pub mod schedule;
pub use crate::schedule::{Schedule, Spawner, Task};

pub mod sequence;
pub use crate::sequence::{IntoSequence, Sequence};

pub mod truthy;
pub use crate::truthy::Truthy;
