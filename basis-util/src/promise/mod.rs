//! Promises and the combinators built on top of them.
//!
//! This module contains the [`Promise`] type, the [`Awaitable`] conversion
//! trait, and free functions composing several promises together
//! ([`all`], [`any`], [`sequence`]), repeating work ([`do_while`],
//! [`while_do`], [`retrying`]) or waiting for time to pass ([`delay`]).
//!
//! Every promise carries the [`Spawner`](basis_core::Spawner) its callbacks
//! are dispatched on; nothing here ever invokes a callback synchronously.

#[allow(clippy::module_inception)]
mod promise;
pub use self::promise::{Promise, Rejection, State};

mod awaitable;
pub use self::awaitable::{invoke, when, Awaitable};

mod all;
pub use self::all::all;

mod any;
pub use self::any::any;

mod sequence;
pub use self::sequence::{sequence, sequence_with};

mod loop_fn;
pub use self::loop_fn::{do_while, do_while_truthy, while_do};

mod delay;
pub use self::delay::{delay, delay_now, MIN_DELAY};

mod retry;
pub use self::retry::{retrying, RetryPolicy};
