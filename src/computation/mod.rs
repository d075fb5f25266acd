//! The computation abstraction shared by every wrapper in this crate.
//!
//! A [`Computation<Args>`] is one executable operation of fixed arity. The
//! arity is encoded in `Args`, a tuple of inputs: `()`, `(A,)`, `(A, B)` or
//! `(A, B, C)`. Applying it yields an [`Outcome`], which is either the output
//! or a [`Failure`] carrying a checked cause of type `Error` or an unchecked
//! failure.
//!
//! Closures of arity 0 through 3 returning an `Outcome` are computations
//! without any wrapping:
//!
//! ```rust
//! use throwable::computation::{Computation, Outcome};
//! use std::io;
//!
//! let add = |a: i32, b: i32| -> Outcome<i32, io::Error> { Ok(a + b) };
//! assert_eq!(add.apply((3, 4)).ok(), Some(7));
//! ```
//!
//! The combinators in [`ComputationExt`] return new computations with the
//! same input tuple:
//!
//! - [`nest`](ComputationExt::nest) / [`nest_with`](ComputationExt::nest_with):
//!   checked causes become unchecked failures
//! - [`recover`](ComputationExt::recover): checked causes select a substitute
//! - [`lift`](ComputationExt::lift): checked causes become `None`
//! - [`and_then`](ComputationExt::and_then): transforms the output
//! - [`memoized`](ComputationExt::memoized): caches successful outputs per input
//! - [`boxed`](ComputationExt::boxed): erases the concrete type

mod combinators;
mod ext;

pub use combinators::{AndThen, BoxedComputation, Constant, Raise, constant, raise};
pub use ext::ComputationExt;

use crate::bridge::Failure;

/// The result of applying a computation.
pub type Outcome<T, E> = Result<T, Failure<E>>;

/// A fixed-arity operation over an input tuple.
///
/// # Type Parameters
///
/// * `Args` - The input tuple. Its arity is the computation's arity.
///
/// # Laws
///
/// Implementations are free to perform side effects, but must not mutate
/// themselves through `&self` in a way that changes the meaning of later
/// calls (interior caches that only memoize are fine).
pub trait Computation<Args> {
    /// The success value.
    type Output;

    /// The checked-domain cause this computation declares.
    type Error;

    /// Runs the computation on `args`.
    ///
    /// # Errors
    ///
    /// Returns [`Failure::Checked`] for a declared cause and
    /// [`Failure::Unchecked`] for anything else the computation raises as a
    /// value. Panics are not converted.
    fn apply(&self, args: Args) -> Outcome<Self::Output, Self::Error>;

    /// Returns `true` when the computation already caches its outputs.
    fn is_memoized(&self) -> bool {
        false
    }
}

macro_rules! impl_computation_for_closures {
    ($(($($argument:ident),*)),* $(,)?) => {
        paste::paste! {
            $(
                impl<Function, $($argument,)* Value, Cause> Computation<($($argument,)*)> for Function
                where
                    Function: Fn($($argument),*) -> Outcome<Value, Cause>,
                {
                    type Output = Value;
                    type Error = Cause;

                    #[inline]
                    fn apply(
                        &self,
                        ($([<$argument:lower>],)*): ($($argument,)*),
                    ) -> Outcome<Value, Cause> {
                        self($([<$argument:lower>]),*)
                    }
                }
            )*
        }
    };
}

impl_computation_for_closures!((), (A), (A, B), (A, B, C));
