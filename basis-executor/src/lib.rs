//! Built-in executor for the `basis` library.
//!
//! Promises dispatch their callbacks and timers through a
//! [`Spawner`](basis_core::Spawner). This crate provides the scheduler behind
//! it: [`LocalPool`], a single-threaded pool that runs queued tasks in
//! order, keeps timers in a deadline queue and can drive ordinary
//! [`Future`](std::future::Future)s alongside.
//!
//! ```
//! use std::time::Duration;
//! use basis_core::Schedule;
//! use basis_executor::{Clock, LocalPool};
//!
//! let mut pool = LocalPool::builder().clock(Clock::Virtual).build();
//! let spawner = pool.spawner();
//! spawner.schedule_after(Duration::from_secs(60), Box::new(|| {})).unwrap();
//! pool.run();
//! assert_eq!(pool.now(), 60_000);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
pub use crate::builder::{Clock, PoolBuilder, UnhandledPolicy};

mod local_pool;
pub use crate::local_pool::{block_on, LocalPool};

mod timer;
mod waker;
