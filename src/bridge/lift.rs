//! Lifting checked causes into `Option`.

use std::convert::Infallible;
use std::fmt;

use crate::bridge::Failure;
use crate::computation::{Computation, Outcome};

/// A computation that reports checked causes as `Ok(None)`.
///
/// Created by [`lift`](crate::computation::ComputationExt::lift). Unchecked
/// failures still pass through as failures.
#[derive(Clone)]
pub struct Lifted<C> {
    computation: C,
}

impl<C> Lifted<C> {
    pub(crate) const fn new(computation: C) -> Self {
        Self { computation }
    }

    /// Returns the wrapped computation.
    pub fn into_inner(self) -> C {
        self.computation
    }
}

impl<C, Args> Computation<Args> for Lifted<C>
where
    C: Computation<Args>,
{
    type Output = Option<C::Output>;
    type Error = Infallible;

    fn apply(&self, args: Args) -> Outcome<Option<C::Output>, Infallible> {
        match self.computation.apply(args) {
            Ok(output) => Ok(Some(output)),
            Err(Failure::Checked(_)) => Ok(None),
            Err(Failure::Unchecked(failure)) => Err(Failure::Unchecked(failure)),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Lifted<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Lifted")
            .field("computation", &self.computation)
            .finish()
    }
}
