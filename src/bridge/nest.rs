//! Nesting checked causes into unchecked failures.

use std::convert::Infallible;
use std::fmt;

use crate::bridge::{Failure, UncheckedFailure};
use crate::computation::{Computation, Outcome};

/// A computation whose checked causes are converted into unchecked failures.
///
/// Created by [`nest`](crate::computation::ComputationExt::nest) and
/// [`nest_with`](crate::computation::ComputationExt::nest_with). The error
/// type is [`Infallible`], so the wrapper declares no checked failure.
///
/// | Inner failure | Result |
/// |---|---|
/// | panic | propagates |
/// | `Failure::Unchecked(u)` | `Failure::Unchecked(u)` |
/// | `Failure::Checked(cause)` | `Failure::Unchecked(mapper(cause))` |
#[derive(Clone)]
pub struct Nested<C, M> {
    computation: C,
    mapper: M,
}

impl<C, M> Nested<C, M> {
    pub(crate) const fn new(computation: C, mapper: M) -> Self {
        Self {
            computation,
            mapper,
        }
    }

    /// Returns the wrapped computation.
    pub fn into_inner(self) -> C {
        self.computation
    }
}

impl<C, M, Args> Computation<Args> for Nested<C, M>
where
    C: Computation<Args>,
    M: Fn(C::Error) -> UncheckedFailure,
{
    type Output = C::Output;
    type Error = Infallible;

    fn apply(&self, args: Args) -> Outcome<C::Output, Infallible> {
        self.computation.apply(args).map_err(|failure| {
            if failure.is_checked() {
                tracing::debug!(
                    cause = std::any::type_name::<C::Error>(),
                    "nesting checked failure"
                );
            }
            Failure::Unchecked(failure.escalate(&self.mapper))
        })
    }

    fn is_memoized(&self) -> bool {
        self.computation.is_memoized()
    }
}

impl<C: fmt::Debug, M> fmt::Debug for Nested<C, M> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Nested")
            .field("computation", &self.computation)
            .finish_non_exhaustive()
    }
}
