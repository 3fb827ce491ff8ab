//! Promises and restartable lazy sequences.
//!
//! This crate provides two families of abstractions:
//!
//! - [Promises](crate::promise::Promise) are single-assignment containers
//!   for a value that becomes available later. A promise is resolved,
//!   rejected or cancelled exactly once, and every callback registered on it
//!   runs on a later turn of a scheduler, never on the stack of the call that
//!   settled it. Combinators derive new promises from existing ones
//!   ([`then`](crate::promise::Promise::then)) or compose many of them
//!   ([`all`](crate::promise::all), [`any`](crate::promise::any),
//!   [`sequence`](crate::promise::sequence)).
//! - [Sequences](crate::sequence::Sequence) are lazy, restartable, possibly
//!   infinite streams of elements. Every traversal starts from the first
//!   element, and the [`SequenceExt`](crate::sequence::SequenceExt)
//!   combinators build new sequences without touching the old ones.
//!
//! Underlying the promises is the [`Schedule`](crate::schedule::Schedule)
//! port. The [`executor`] module provides a single-threaded implementation
//! of it, [`LocalPool`](crate::executor::LocalPool), whose virtual clock
//! makes timing-dependent code deterministic to test.
//!
//! ```
//! use basis::prelude::*;
//! use basis::executor::{Clock, LocalPool};
//!
//! let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
//! let spawner = pool.spawner();
//!
//! let squares = range(1, 4).map(|x: i32| x * x);
//! let total = all(&spawner, squares.map(|x| Ok::<i32, ()>(x)).to_vec())
//!     .map(|xs| xs.into_iter().sum::<i32>());
//! pool.run();
//! assert_eq!(total.value(), Some(14));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[doc(hidden)]
pub use basis_core::{Error, UnhandledRejection};

pub mod schedule {
    //! The scheduling port promises dispatch their callbacks through.

    pub use basis_core::schedule::{Schedule, Spawner, Task};
}

pub mod executor {
    //! Task execution.
    //!
    //! All promise callbacks run on an executor. [`LocalPool`] runs them on
    //! the current thread in the order they were queued, together with timers
    //! and any spawned [`Future`](std::future::Future)s.

    pub use basis_executor::{block_on, Clock, LocalPool, PoolBuilder, UnhandledPolicy};
}

pub mod promise {
    //! Promises and their combinators.

    pub use basis_util::promise::*;
}

pub mod sequence {
    //! Restartable lazy sequences and their combinators.

    pub use basis_util::sequence::*;
}

pub mod random {
    //! The randomness capability consumed by sampling.

    pub use basis_core::random::RandomSource;
}

pub mod truthy {
    //! Boolean coercion for loop conditions.

    pub use basis_core::truthy::Truthy;
}

pub mod prelude {
    //! A "prelude" for crates using the `basis` crate.
    //!
    //! This prelude is similar to the standard library's prelude in that you'll
    //! almost always want to import its entire contents, but unlike the
    //! standard library's prelude you'll have to do so manually:
    //!
    //! ```
    //! # #[allow(unused_imports)]
    //! use basis::prelude::*;
    //! ```
    //!
    //! The prelude may grow over time as additional items see ubiquitous use.

    pub use crate::promise::{all, any, sequence, when, Awaitable, Promise, State};
    pub use crate::schedule::{Schedule, Spawner};
    pub use crate::sequence::{range, IntoSequence, Sequence, SequenceExt};
}
