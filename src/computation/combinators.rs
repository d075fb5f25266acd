//! Small computations and output combinators.

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use super::{Computation, Outcome};
use crate::bridge::{Failure, UncheckedFailure};

// =============================================================================
// Constant
// =============================================================================

/// A computation of any arity that returns a clone of a fixed value.
///
/// Created by [`constant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant<T> {
    value: T,
}

/// Creates a computation that ignores its inputs and returns `value`.
///
/// Commonly used as the substitute handed back by a recovery function.
///
/// # Examples
///
/// ```rust
/// use throwable::computation::{Computation, constant};
///
/// let minus_one = constant(-1);
/// assert_eq!(Computation::<(i32, i32)>::apply(&minus_one, (3, 4)).ok(), Some(-1));
/// ```
#[inline]
pub const fn constant<T: Clone>(value: T) -> Constant<T> {
    Constant { value }
}

impl<T: Clone, Args> Computation<Args> for Constant<T> {
    type Output = T;
    type Error = Infallible;

    #[inline]
    fn apply(&self, _args: Args) -> Outcome<T, Infallible> {
        Ok(self.value.clone())
    }
}

// =============================================================================
// Raise
// =============================================================================

/// A computation of any arity that always fails with the same unchecked
/// failure.
///
/// Created by [`raise`]. Every application returns a clone of the stored
/// failure, so all of them are identical under [`UncheckedFailure::ptr_eq`].
pub struct Raise<T, E = Infallible> {
    failure: UncheckedFailure,
    marker: PhantomData<fn() -> (T, E)>,
}

/// Creates a computation that always fails with `failure`.
///
/// Together with [`recover`](super::ComputationExt::recover) this expresses
/// `nest`: a recovery function that hands back `raise(..)` turns every
/// checked cause into an unchecked failure.
///
/// # Examples
///
/// ```rust
/// use throwable::bridge::UncheckedFailure;
/// use throwable::computation::{Computation, Raise, raise};
/// use std::io;
///
/// let failure = UncheckedFailure::nest(io::Error::other("boom"));
/// let always: Raise<u8> = raise(failure.clone());
/// let raised = always.apply((1, 2)).unwrap_err().into_unchecked();
/// assert!(raised.ptr_eq(&failure));
/// ```
#[inline]
pub const fn raise<T, E>(failure: UncheckedFailure) -> Raise<T, E> {
    Raise {
        failure,
        marker: PhantomData,
    }
}

impl<T, E> Clone for Raise<T, E> {
    fn clone(&self) -> Self {
        raise(self.failure.clone())
    }
}

impl<T, E> fmt::Debug for Raise<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Raise")
            .field("failure", &self.failure)
            .finish()
    }
}

impl<T, E, Args> Computation<Args> for Raise<T, E> {
    type Output = T;
    type Error = E;

    fn apply(&self, _args: Args) -> Outcome<T, E> {
        Err(Failure::Unchecked(self.failure.clone()))
    }
}

// =============================================================================
// AndThen
// =============================================================================

/// Transforms the output of a computation.
///
/// Created by [`and_then`](super::ComputationExt::and_then). Failures of the
/// inner computation are returned unchanged and the transform is not called.
#[derive(Debug, Clone)]
pub struct AndThen<C, G> {
    computation: C,
    transform: G,
}

impl<C, G> AndThen<C, G> {
    pub(crate) const fn new(computation: C, transform: G) -> Self {
        Self {
            computation,
            transform,
        }
    }
}

impl<C, G, Args, P> Computation<Args> for AndThen<C, G>
where
    C: Computation<Args>,
    G: Fn(C::Output) -> P,
{
    type Output = P;
    type Error = C::Error;

    #[inline]
    fn apply(&self, args: Args) -> Outcome<P, C::Error> {
        self.computation.apply(args).map(&self.transform)
    }
}

// =============================================================================
// BoxedComputation
// =============================================================================

type DynComputation<'a, Args, T, E> = dyn Computation<Args, Output = T, Error = E> + Send + Sync + 'a;

/// A type-erased computation.
///
/// Created by [`boxed`](super::ComputationExt::boxed). Lets a recovery
/// function return a different substitute depending on the cause.
pub struct BoxedComputation<'a, Args, T, E> {
    inner: Box<DynComputation<'a, Args, T, E>>,
}

impl<'a, Args, T, E> BoxedComputation<'a, Args, T, E> {
    /// Boxes `computation`.
    pub fn new<C>(computation: C) -> Self
    where
        C: Computation<Args, Output = T, Error = E> + Send + Sync + 'a,
    {
        Self {
            inner: Box::new(computation),
        }
    }
}

impl<Args, T, E> Computation<Args> for BoxedComputation<'_, Args, T, E> {
    type Output = T;
    type Error = E;

    #[inline]
    fn apply(&self, args: Args) -> Outcome<T, E> {
        self.inner.apply(args)
    }

    fn is_memoized(&self) -> bool {
        self.inner.is_memoized()
    }
}

impl<Args, T, E> fmt::Debug for BoxedComputation<'_, Args, T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BoxedComputation")
            .field("memoized", &self.inner.is_memoized())
            .finish_non_exhaustive()
    }
}
