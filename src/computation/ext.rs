//! Extension methods available on every computation.

use std::error::Error;
use std::fmt::Display;

use super::{AndThen, BoxedComputation, Computation};
use crate::bridge::{Lifted, Nested, Recovered, UncheckedFailure};

#[cfg(feature = "memoize")]
use crate::memoize::Memoized;
#[cfg(feature = "memoize")]
use std::hash::Hash;

/// Combinators over [`Computation`].
///
/// Implemented for every computation. Each method consumes the computation
/// and returns a wrapper with the same input tuple.
pub trait ComputationExt<Args>: Computation<Args> + Sized {
    /// Converts every checked cause into an unchecked [`NestedFailure`].
    ///
    /// The returned computation declares no checked failure. Unchecked
    /// failures pass through unchanged.
    ///
    /// [`NestedFailure`]: crate::bridge::NestedFailure
    ///
    /// # Examples
    ///
    /// ```rust
    /// use throwable::computation::{Computation, ComputationExt, Outcome};
    /// use std::io;
    ///
    /// let read = |_: u32, _: u32| -> Outcome<u32, io::Error> { Err(io::Error::other("boom").into()) };
    /// let failure = read.nest().apply((3, 4)).unwrap_err().into_unchecked();
    ///
    /// let nested = failure.as_nested().unwrap();
    /// assert_eq!(nested.message(), "boom");
    /// ```
    fn nest(self) -> Nested<Self, fn(Self::Error) -> UncheckedFailure>
    where
        Self::Error: Error + Send + Sync + 'static,
    {
        Nested::new(self, UncheckedFailure::nest::<Self::Error>)
    }

    /// Converts every checked cause into the unchecked failure `mapper`
    /// returns.
    fn nest_with<M>(self, mapper: M) -> Nested<Self, M>
    where
        M: Fn(Self::Error) -> UncheckedFailure,
    {
        Nested::new(self, mapper)
    }

    /// Answers checked causes with a substitute computation.
    ///
    /// On a checked cause, `recovery` is asked for a substitute, which is then
    /// applied to the same inputs. Its outcome is returned as-is. A `None`
    /// from `recovery` is reported as an unchecked
    /// [`ContractViolation`](crate::bridge::ContractViolation).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use throwable::computation::{Computation, ComputationExt, Outcome, constant};
    /// use std::io;
    ///
    /// let read = |_: i32, _: i32| -> Outcome<i32, io::Error> { Err(io::Error::other("boom").into()) };
    /// let recovered = read.recover(|_: &io::Error| Some(constant(-1)));
    /// assert_eq!(recovered.apply((3, 4)).ok(), Some(-1));
    /// ```
    fn recover<R, S>(self, recovery: R) -> Recovered<Self, R>
    where
        Args: Clone,
        Self::Error: Display,
        R: Fn(&Self::Error) -> Option<S>,
        S: Computation<Args, Output = Self::Output>,
    {
        Recovered::new(self, recovery)
    }

    /// Turns checked causes into `None` and successes into `Some`.
    fn lift(self) -> Lifted<Self> {
        Lifted::new(self)
    }

    /// Transforms the output with `transform`.
    fn and_then<G, P>(self, transform: G) -> AndThen<Self, G>
    where
        G: Fn(Self::Output) -> P,
    {
        AndThen::new(self, transform)
    }

    /// Erases the concrete type of the computation.
    fn boxed<'a>(self) -> BoxedComputation<'a, Args, Self::Output, Self::Error>
    where
        Self: Send + Sync + 'a,
    {
        BoxedComputation::new(self)
    }

    /// Caches successful outputs per input tuple.
    ///
    /// See [`Memoized`] for the caching rules. Calling `memoized` on a value
    /// whose type is statically `Memoized` resolves to
    /// [`Memoized::memoized`], which returns it unchanged.
    ///
    /// This method cannot see through generic parameters or
    /// [`BoxedComputation`]: there a memoized computation is wrapped again.
    /// The inner function still runs at most once per key, but every input is
    /// stored in both maps. Check [`Computation::is_memoized`] first to avoid
    /// the second cache.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use throwable::computation::{Computation, ComputationExt, Outcome};
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let calls = AtomicUsize::new(0);
    /// let square = |value: u64| -> Outcome<u64, String> {
    ///     calls.fetch_add(1, Ordering::SeqCst);
    ///     Ok(value * value)
    /// };
    /// let memoized = square.memoized();
    ///
    /// assert_eq!(memoized.apply((9,)).ok(), Some(81));
    /// assert_eq!(memoized.apply((9,)).ok(), Some(81));
    /// assert_eq!(calls.load(Ordering::SeqCst), 1);
    /// ```
    #[cfg(feature = "memoize")]
    fn memoized(self) -> Memoized<Self, Args>
    where
        Args: Eq + Hash + Clone,
        Self::Output: Clone,
    {
        Memoized::new(self)
    }
}

impl<Args, C> ComputationExt<Args> for C where C: Computation<Args> {}
