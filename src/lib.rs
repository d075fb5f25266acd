//! # throwable
//!
//! Failure bridging and thread-safe memoization for fallible computations.
//!
//! ## Overview
//!
//! A [`Computation`](computation::Computation) is a fixed-arity operation
//! over an input tuple that either produces an output or fails. Failures come
//! in two categories: checked causes the computation declares, and unchecked
//! failures that pass through every wrapper untouched. Panics are never
//! caught.
//!
//! - **Failure bridge**: [`nest`](computation::ComputationExt::nest) turns
//!   checked causes into unchecked failures,
//!   [`recover`](computation::ComputationExt::recover) replaces them with a
//!   substitute computation, [`lift`](computation::ComputationExt::lift)
//!   reports them as `None`.
//! - **Memoization**: [`memoized`](computation::ComputationExt::memoized)
//!   caches successful outputs per input tuple in a concurrent map. Failures
//!   are never cached.
//!
//! ## Feature Flags
//!
//! - `memoize`: The memoization cache (enabled by default)
//! - `fxhash`: Use `rustc-hash` for cache keys
//! - `ahash`: Use `ahash` for cache keys
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use throwable::prelude::*;
//! use std::io;
//!
//! let read = |a: i32, b: i32| -> Outcome<i32, io::Error> {
//!     if a > b { Ok(a - b) } else { Err(io::Error::other("boom").into()) }
//! };
//!
//! let safe = read.recover(|_: &io::Error| Some(constant(-1)));
//! assert_eq!(safe.apply((3, 4)).ok(), Some(-1));
//! assert_eq!(safe.apply((4, 3)).ok(), Some(1));
//!
//! #[cfg(feature = "memoize")]
//! {
//!     let cached = safe.memoized();
//!     assert_eq!(cached.apply((3, 4)).ok(), Some(-1));
//!     assert!(cached.is_cached(&(3, 4)));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use throwable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bridge::*;
    pub use crate::computation::*;

    #[cfg(feature = "memoize")]
    pub use crate::memoize::*;
}

pub mod bridge;
pub mod computation;

#[cfg(feature = "memoize")]
pub mod memoize;
