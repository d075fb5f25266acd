//! The failure bridge.
//!
//! This module decides how a checked-domain failure surfaces from a
//! computation:
//!
//! - [`Nested`]: the cause is wrapped into an unchecked [`NestedFailure`]
//!   (or whatever unchecked failure a mapper picks)
//! - [`Recovered`]: a recovery function supplies a substitute computation
//!   that runs on the same inputs
//! - [`Lifted`]: the cause is reported as `None`
//!
//! No wrapper intercepts [`UncheckedFailure`]s, and none of them catches
//! panics. Every path either returns the original failure, wraps it exactly
//! once, or hands it to caller-supplied recovery logic whose own failures are
//! returned untouched.
//!
//! # Examples
//!
//! ```rust
//! use throwable::computation::{Computation, ComputationExt, Outcome, constant};
//! use std::io;
//!
//! let read = |_: i32, _: i32| -> Outcome<i32, io::Error> {
//!     Err(io::Error::other("boom").into())
//! };
//!
//! let failure = read.nest().apply((3, 4)).unwrap_err().into_unchecked();
//! assert_eq!(failure.to_string(), "boom");
//!
//! let recovered = read.recover(|_: &io::Error| Some(constant(-1)));
//! assert_eq!(recovered.apply((3, 4)).ok(), Some(-1));
//! ```

mod failure;
mod lift;
mod nest;
mod recover;

pub use failure::{
    ContractViolation, Failure, NestedFailure, RuntimeFailure, SharedError, UncheckedFailure,
};
pub use lift::Lifted;
pub use nest::Nested;
pub use recover::Recovered;
